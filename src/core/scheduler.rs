//! Cancellable timers driven by an explicit clock.
//!
//! The host advances the clock (frame delta in the window, fixed steps in
//! the CLI) and then polls due tasks one at a time. Because each poll
//! delivers a single task, a cancellation made while handling it is seen
//! before the next task is handed out.

use std::time::Duration;

use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Copy, Debug)]
enum Cadence {
    Once,
    Every(Duration),
}

#[derive(Clone, Copy, Debug)]
struct Task {
    id: TaskId,
    due: Duration,
    cadence: Cadence,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    horizon: Duration,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Due time of the task being handled, or the horizon once everything
    /// due has been polled.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fires once after `delay`.
    pub fn after(&mut self, delay: Duration) -> TaskId {
        self.insert(delay, Cadence::Once)
    }

    /// Fires every `period`, first after one full period. A zero period is
    /// bumped to one millisecond so polling always makes progress.
    pub fn every(&mut self, period: Duration) -> TaskId {
        let period = period.max(Duration::from_millis(1));
        self.insert(period, Cadence::Every(period))
    }

    fn insert(&mut self, delay: Duration, cadence: Cadence) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due: self.now + delay,
            cadence,
        });
        id
    }

    /// Cancels a pending task. Returns whether anything was cancelled;
    /// cancelling a fired or already cancelled task is a no-op.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let cancelled = self.tasks.len() != before;
        if cancelled {
            debug!("cancelled timer {id:?}");
        }
        cancelled
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Moves the polling horizon `elapsed` further along.
    pub fn advance(&mut self, elapsed: Duration) {
        self.horizon += elapsed;
    }

    /// Delivers the earliest task due at or before the horizon, advancing
    /// the clock to its due time. Ties go to the task scheduled first.
    pub fn poll(&mut self) -> Option<TaskId> {
        let next = self
            .tasks
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, task)| task.due <= self.horizon)
            .min_by_key(|(_, task)| (task.due, task.id.0));
        let Some((index, task)) = next else {
            self.now = self.horizon;
            return None;
        };

        self.now = task.due;
        match task.cadence {
            Cadence::Once => {
                self.tasks.remove(index);
            }
            Cadence::Every(period) => {
                if let Some(slot) = self.tasks.get_mut(index) {
                    slot.due += period;
                }
            }
        }
        Some(task.id)
    }

    /// Drops every pending task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler) -> Vec<TaskId> {
        std::iter::from_fn(|| scheduler.poll()).collect()
    }

    #[test]
    fn one_shot_fires_once_at_its_deadline() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.after(Duration::from_millis(3000));

        scheduler.advance(Duration::from_millis(2999));
        assert!(drain(&mut scheduler).is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(drain(&mut scheduler), vec![id]);
        assert!(!scheduler.is_pending(id));

        scheduler.advance(Duration::from_secs(10));
        assert!(drain(&mut scheduler).is_empty());
    }

    #[test]
    fn repeating_task_catches_up_after_a_long_frame() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.every(Duration::from_millis(50));

        scheduler.advance(Duration::from_millis(175));
        assert_eq!(scheduler.poll(), Some(id));
        assert_eq!(scheduler.poll(), Some(id));
        assert_eq!(scheduler.poll(), Some(id));
        assert_eq!(scheduler.now(), Duration::from_millis(150));
        assert_eq!(scheduler.poll(), None);
        assert_eq!(scheduler.now(), Duration::from_millis(175));

        scheduler.advance(Duration::from_millis(25));
        assert_eq!(drain(&mut scheduler), vec![id]);
    }

    #[test]
    fn interleaves_tasks_by_due_time() {
        let mut scheduler = Scheduler::new();
        let tick = scheduler.every(Duration::from_millis(40));
        let done = scheduler.after(Duration::from_millis(100));

        scheduler.advance(Duration::from_millis(130));
        assert_eq!(drain(&mut scheduler), vec![tick, tick, done, tick]);
    }

    #[test]
    fn cancelling_mid_batch_stops_further_deliveries() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.every(Duration::from_millis(10));

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(scheduler.poll(), Some(id));
        assert!(scheduler.cancel(id));
        assert_eq!(scheduler.poll(), None);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.after(Duration::from_millis(5));

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        let fired = scheduler.after(Duration::from_millis(1));
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(scheduler.poll(), Some(fired));
        assert!(!scheduler.cancel(fired));
    }

    #[test]
    fn tasks_scheduled_later_start_from_current_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(Duration::from_millis(500));
        assert_eq!(scheduler.poll(), None);

        let id = scheduler.after(Duration::from_millis(10));
        scheduler.advance(Duration::from_millis(9));
        assert_eq!(scheduler.poll(), None);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(scheduler.poll(), Some(id));
    }
}
