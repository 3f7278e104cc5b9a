//! Follow camera
//!
//! Keeps the actor centered on screen, but never shows space beyond the map
//! edges. Maps smaller than the screen pin the camera at the origin.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World position of the screen's top-left corner
    pub offset: Vec2,
}

impl Camera {
    pub fn follow(&mut self, target: Vec2, map_size: Vec2, screen_size: Vec2) {
        let max = (map_size - screen_size).max(Vec2::ZERO);
        self.offset = (target - screen_size / 2.0).clamp(Vec2::ZERO, max);
    }

    #[inline]
    pub fn to_world(&self, screen_point: Vec2) -> Vec2 {
        screen_point + self.offset
    }

    #[inline]
    pub fn to_screen(&self, world_point: Vec2) -> Vec2 {
        world_point - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(1200.0, 720.0);

    #[test]
    fn test_follow_centers_target() {
        let mut cam = Camera::default();
        cam.follow(Vec2::new(2000.0, 1000.0), Vec2::new(4000.0, 4000.0), SCREEN);
        assert_eq!(cam.offset, Vec2::new(1400.0, 640.0));
        assert_eq!(cam.to_screen(Vec2::new(2000.0, 1000.0)), SCREEN / 2.0);
    }

    #[test]
    fn test_follow_clamps_to_edges() {
        let mut cam = Camera::default();
        let map = Vec2::new(4000.0, 3200.0);
        cam.follow(Vec2::new(10.0, 3190.0), map, SCREEN);
        assert_eq!(cam.offset, Vec2::new(0.0, 3200.0 - 720.0));
    }

    #[test]
    fn test_small_map_pins_origin() {
        let mut cam = Camera::default();
        cam.follow(Vec2::new(300.0, 200.0), Vec2::new(640.0, 320.0), SCREEN);
        assert_eq!(cam.offset, Vec2::ZERO);
    }

    #[test]
    fn test_world_screen_round_trip() {
        let cam = Camera {
            offset: Vec2::new(100.0, 50.0),
        };
        let p = Vec2::new(12.0, 34.0);
        assert_eq!(cam.to_screen(cam.to_world(p)), p);
    }
}
