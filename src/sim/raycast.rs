//! Sampled line-segment cast against the collision world
//!
//! Not an exact sweep: the segment is sampled at a fixed resolution, so a
//! rect thinner than the sample spacing can be skipped. Callers pick `steps`
//! so that `segment_length / steps` stays below the thinnest obstacle.

use glam::Vec2;

use super::world::CollisionWorld;

/// Walk `steps + 1` evenly spaced samples from `start` to `end` and return the
/// first one that lands inside a blocking rect.
///
/// `steps == 0` is treated as a single step (start and end only).
pub fn cast(start: Vec2, end: Vec2, world: &CollisionWorld, steps: u32) -> Option<Vec2> {
    let steps = steps.max(1);
    let delta = end - start;

    (0..=steps)
        .map(|i| start + delta * (i as f32 / steps as f32))
        .find(|&p| world.contains_point(p))
}
