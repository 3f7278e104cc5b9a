//! Grappling-hook rope
//!
//! The rope is a distance constraint, not a simulated cable: whenever the
//! actor drifts past the rope length it is projected back onto the circle
//! around the anchor and loses the velocity component pointing away from the
//! anchor. What remains is tangential, which gives the pendulum swing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::raycast;
use super::world::CollisionWorld;
use crate::clamp_point;
use crate::consts::MAX_ROPE_DIST;

/// An attached rope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rope {
    /// Fixed world point the hook caught on
    pub anchor: Vec2,
    /// Current allowed distance between actor center and anchor
    pub length: f32,
}

/// Owns the optional rope and its length limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RopeController {
    rope: Option<Rope>,
    min_length: f32,
    max_length: f32,
}

impl RopeController {
    /// `max_length` is clamped into `[0, MAX_ROPE_DIST]` and `min_length`
    /// into `[0, max_length]`
    pub fn new(min_length: f32, max_length: f32) -> Self {
        let max_length = max_length.max(0.0).min(MAX_ROPE_DIST);
        Self {
            rope: None,
            min_length: min_length.clamp(0.0, max_length),
            max_length,
        }
    }

    pub fn rope(&self) -> Option<&Rope> {
        self.rope.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.rope.is_some()
    }

    pub fn max_length(&self) -> f32 {
        self.max_length
    }

    /// Shoot the hook from `actor_center` toward `aim`.
    ///
    /// The aim point is pulled in to `max_length`, then the segment is
    /// raycast. On a hit the rope attaches at the hit point with the current
    /// distance as its length. A miss leaves the controller as it was.
    pub fn fire(
        &mut self,
        actor_center: Vec2,
        aim: Vec2,
        world: &CollisionWorld,
        steps: u32,
    ) -> Option<Rope> {
        let target = clamp_point(actor_center, aim, self.max_length);
        let anchor = raycast::cast(actor_center, target, world, steps)?;
        let rope = Rope {
            anchor,
            length: actor_center
                .distance(anchor)
                .clamp(self.min_length, self.max_length),
        };
        self.rope = Some(rope);
        Some(rope)
    }

    /// Detach, whether or not a rope was attached
    pub fn release(&mut self) {
        self.rope = None;
    }

    /// Lengthen (positive) or shorten (negative) the rope, staying in range.
    ///
    /// NaN deltas are ignored; infinite deltas pin the length to a bound.
    pub fn adjust_length(&mut self, delta: f32) {
        if delta.is_nan() {
            return;
        }
        if let Some(rope) = self.rope.as_mut() {
            rope.length = (rope.length + delta).clamp(self.min_length, self.max_length);
        }
    }
}

/// Keep `pos` within `length` of `anchor`.
///
/// Inside the circle nothing changes. Outside, the position is projected onto
/// the circle and the radial part of `vel` is removed: `v' = v - (v·r̂) r̂`.
pub fn apply_constraint(pos: Vec2, vel: Vec2, anchor: Vec2, length: f32) -> (Vec2, Vec2) {
    let offset = pos - anchor;
    let dist = offset.length();
    if dist <= length || dist == 0.0 {
        return (pos, vel);
    }

    let radial = offset / dist;
    let new_pos = anchor + radial * length;
    let new_vel = vel - vel.dot(radial) * radial;
    (new_pos, new_vel)
}

/// Limit speed after the rope pulled on the actor
#[inline]
pub fn cap_speed(vel: Vec2, max_speed: Option<f32>) -> Vec2 {
    match max_speed {
        Some(max) => vel.clamp_length_max(max.max(0.0)),
        None => vel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;

    fn ceiling_world() -> CollisionWorld {
        // Ceiling slab spanning y = 0..32
        CollisionWorld::new(
            640.0,
            640.0,
            vec![Rect::new(0.0, 0.0, 640.0, 32.0)],
            Vec::new(),
        )
    }

    #[test]
    fn test_fire_attaches_to_ceiling() {
        let world = ceiling_world();
        let mut ctl = RopeController::new(0.0, MAX_ROPE_DIST);
        let center = Vec2::new(100.0, 132.0);

        let rope = ctl.fire(center, Vec2::new(100.0, 0.0), &world, 100).unwrap();
        assert!(ctl.is_active());
        // True distance to the ceiling underside is 100; sampling error < 1.32px
        assert!((rope.length - 100.0).abs() < 1.5);
        assert!(rope.anchor.y < 32.0);
    }

    #[test]
    fn test_fire_out_of_reach_misses() {
        let world = ceiling_world();
        let mut ctl = RopeController::new(0.0, MAX_ROPE_DIST);
        // Ceiling is 268px away, beyond the 192px reach
        let center = Vec2::new(100.0, 300.0);
        assert!(ctl.fire(center, Vec2::new(100.0, 0.0), &world, 100).is_none());
        assert!(!ctl.is_active());
    }

    #[test]
    fn test_fire_miss_keeps_existing_rope() {
        let world = ceiling_world();
        let mut ctl = RopeController::new(0.0, MAX_ROPE_DIST);
        let center = Vec2::new(100.0, 132.0);
        let first = ctl.fire(center, Vec2::new(100.0, 0.0), &world, 100).unwrap();

        assert!(ctl.fire(center, Vec2::new(100.0, 600.0), &world, 100).is_none());
        assert_eq!(ctl.rope(), Some(&first));
    }

    #[test]
    fn test_release_clears() {
        let world = ceiling_world();
        let mut ctl = RopeController::new(0.0, MAX_ROPE_DIST);
        ctl.fire(Vec2::new(50.0, 100.0), Vec2::new(50.0, 0.0), &world, 100);
        ctl.release();
        assert!(!ctl.is_active());
        // Releasing twice is fine
        ctl.release();
        assert!(ctl.rope().is_none());
    }

    #[test]
    fn test_adjust_length_clamps() {
        let world = ceiling_world();
        let mut ctl = RopeController::new(0.0, MAX_ROPE_DIST);
        ctl.fire(Vec2::new(50.0, 132.0), Vec2::new(50.0, 0.0), &world, 100);

        ctl.adjust_length(-1000.0);
        assert_eq!(ctl.rope().unwrap().length, 0.0);
        ctl.adjust_length(f32::INFINITY);
        assert_eq!(ctl.rope().unwrap().length, MAX_ROPE_DIST);
        ctl.adjust_length(f32::NAN);
        assert_eq!(ctl.rope().unwrap().length, MAX_ROPE_DIST);
        ctl.adjust_length(-3.0);
        assert_eq!(ctl.rope().unwrap().length, MAX_ROPE_DIST - 3.0);
    }

    #[test]
    fn test_adjust_length_respects_min() {
        let world = ceiling_world();
        let mut ctl = RopeController::new(32.0, MAX_ROPE_DIST);
        ctl.fire(Vec2::new(50.0, 132.0), Vec2::new(50.0, 0.0), &world, 100);
        ctl.adjust_length(-500.0);
        assert_eq!(ctl.rope().unwrap().length, 32.0);
    }

    #[test]
    fn test_reach_never_exceeds_max_rope_dist() {
        // Ceiling underside 484 px above the actor center
        let world = ceiling_world();
        let mut ctl = RopeController::new(0.0, 1000.0);
        assert_eq!(ctl.max_length(), MAX_ROPE_DIST);
        assert!(ctl.fire(Vec2::new(100.0, 516.0), Vec2::new(100.0, 0.0), &world, 100).is_none());
        assert!(!ctl.is_active());
    }

    #[test]
    fn test_constraint_scenario() {
        let (pos, vel) = apply_constraint(
            Vec2::new(100.0, 100.0),
            Vec2::new(3.0, 5.0),
            Vec2::new(100.0, 0.0),
            50.0,
        );
        assert_eq!(pos, Vec2::new(100.0, 50.0));
        // Radial (vertical) velocity removed, tangential kept
        assert_eq!(vel, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_constraint_noop_inside() {
        let pos = Vec2::new(110.0, 30.0);
        let vel = Vec2::new(-4.0, 9.0);
        assert_eq!(apply_constraint(pos, vel, Vec2::new(100.0, 0.0), 50.0), (pos, vel));
    }

    #[test]
    fn test_cap_speed() {
        let v = cap_speed(Vec2::new(30.0, 40.0), Some(10.0));
        assert!((v.length() - 10.0).abs() < 0.001);
        assert_eq!(cap_speed(Vec2::new(3.0, 4.0), Some(10.0)), Vec2::new(3.0, 4.0));
        assert_eq!(cap_speed(Vec2::new(30.0, 40.0), None), Vec2::new(30.0, 40.0));
    }
}
