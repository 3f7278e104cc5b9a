//! Swing Platformer - tile-map platformer core with a grappling-hook rope
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision world, raycast, rope, kinematics)
//! - `flow`: Screen flow state machine (menu, playing, game over, ...)
//! - `highscores`: Top-10 leaderboard
//! - `settings`: Data-driven physics tuning

pub mod flow;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use flow::{FlowEvent, Screen, Transition};
pub use highscores::HighScores;
pub use settings::{MovementModel, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one physics tick per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default tile size in pixels
    pub const TILE_SIZE: f32 = 32.0;
    /// Rope reach: six tiles
    pub const MAX_ROPE_DIST: f32 = TILE_SIZE * 6.0;
    /// Raycast resolution used when firing the rope
    pub const RAYCAST_STEPS: u32 = 100;
}

/// Clamp `target` so it lies no further than `max_dist` from `origin`.
///
/// Points already within range are returned unchanged; points beyond it are
/// pulled back along the same direction.
#[inline]
pub fn clamp_point(origin: Vec2, target: Vec2, max_dist: f32) -> Vec2 {
    let delta = target - origin;
    let dist = delta.length();
    if dist > max_dist {
        origin + delta * (max_dist / dist)
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_point_within_range() {
        let p = clamp_point(Vec2::ZERO, Vec2::new(30.0, 40.0), 100.0);
        assert_eq!(p, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_clamp_point_beyond_range() {
        let p = clamp_point(Vec2::new(10.0, 10.0), Vec2::new(10.0 + 300.0, 10.0 + 400.0), 50.0);
        assert!((p - Vec2::new(40.0, 50.0)).length() < 0.001);
    }
}
