use serde::Serialize;

/// Sampled projectile position in meters: `x` downrange, `y` above the launcher.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
}

impl TrajectoryPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Points of one animation run in time order.
///
/// Only ever appended to while a run is active; cleared when a new run
/// starts or the scene changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TrajectorySequence {
    points: Vec<TrajectoryPoint>,
}

impl TrajectorySequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: TrajectoryPoint) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn last(&self) -> Option<TrajectoryPoint> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<TrajectoryPoint> for TrajectorySequence {
    fn from_iter<I: IntoIterator<Item = TrajectoryPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
