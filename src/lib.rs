//! Parabolic Target: guess the launch speed that lands a projectile on the target.
//!
//! - `core`: solver, animation driver, scene rendering and the round session
//! - `logging`: `env_logger` setup shared by both binaries

pub mod core;
pub mod logging;
