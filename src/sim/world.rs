//! Static collision world
//!
//! Built once from map data: every tile or object flagged `collision` becomes
//! a blocking rect, every one flagged `climbable` becomes a ladder rect. The
//! world is never mutated afterwards.

use glam::Vec2;

use super::map::{Layer, MapData, MapError};
use super::rect::Rect;

/// Direction of travel along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionWorld {
    width_px: f32,
    height_px: f32,
    collidable: Vec<Rect>,
    climbable: Vec<Rect>,
}

impl CollisionWorld {
    pub fn new(width_px: f32, height_px: f32, collidable: Vec<Rect>, climbable: Vec<Rect>) -> Self {
        Self {
            width_px,
            height_px,
            collidable,
            climbable,
        }
    }

    /// Collect collidable and climbable rects from every layer of a map
    pub fn from_map(map: &MapData) -> Result<Self, MapError> {
        let tw = map.tile_width as f32;
        let th = map.tile_height as f32;
        let width = map.width as usize;

        let mut collidable = Vec::new();
        let mut climbable = Vec::new();

        for layer in &map.layers {
            match layer {
                Layer::Tiles { name, data } => {
                    if data.len() != width * map.height as usize {
                        return Err(MapError::InvalidFormat(format!(
                            "tile layer '{name}' does not match map size"
                        )));
                    }
                    for (i, &gid) in data.iter().enumerate() {
                        if gid == 0 {
                            continue;
                        }
                        let props = map.properties(gid);
                        let x = (i % width) as f32 * tw;
                        let y = (i / width) as f32 * th;
                        let rect = Rect::new(x, y, tw, th);
                        if props.collision {
                            collidable.push(rect);
                        }
                        if props.climbable {
                            climbable.push(rect);
                        }
                    }
                }
                Layer::Objects { objects, .. } => {
                    for obj in objects {
                        let rect = Rect::new(obj.x, obj.y, obj.width, obj.height);
                        if obj.collision {
                            collidable.push(rect);
                        }
                        if obj.climbable {
                            climbable.push(rect);
                        }
                    }
                }
            }
        }

        log::debug!(
            "Collision world: {} collidable, {} climbable",
            collidable.len(),
            climbable.len()
        );

        Ok(Self::new(map.width_px(), map.height_px(), collidable, climbable))
    }

    #[inline]
    pub fn width_px(&self) -> f32 {
        self.width_px
    }

    #[inline]
    pub fn height_px(&self) -> f32 {
        self.height_px
    }

    pub fn collidable(&self) -> &[Rect] {
        &self.collidable
    }

    pub fn climbable(&self) -> &[Rect] {
        &self.climbable
    }

    /// Does `rect` overlap any blocking rect?
    pub fn intersects(&self, rect: &Rect) -> bool {
        self.collidable.iter().any(|c| c.overlaps(rect))
    }

    /// Does a zero-area probe at `p` land inside a blocking rect?
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.collidable.iter().any(|c| c.contains_point(p))
    }

    /// Does `rect` overlap any ladder?
    pub fn touches_climbable(&self, rect: &Rect) -> bool {
        self.climbable.iter().any(|c| c.overlaps(rect))
    }

    /// First blocking rect met when travelling in `dir` through `swept`.
    ///
    /// `swept` is the union of the mover's box before and after the move.
    /// Among the rects it overlaps, the one whose near edge comes first along
    /// the direction of travel wins.
    pub fn first_blocking(&self, swept: &Rect, dir: Direction) -> Option<Rect> {
        let hits = self.collidable.iter().filter(|c| c.overlaps(swept));
        match dir {
            Direction::Right => hits.min_by(|a, b| a.left().total_cmp(&b.left())),
            Direction::Left => hits.max_by(|a, b| a.right().total_cmp(&b.right())),
            Direction::Down => hits.min_by(|a, b| a.top().total_cmp(&b.top())),
            Direction::Up => hits.max_by(|a, b| a.bottom().total_cmp(&b.bottom())),
        }
        .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii_world(rows: &[&str]) -> CollisionWorld {
        let map = MapData::from_ascii(rows, 32).unwrap();
        CollisionWorld::from_map(&map).unwrap()
    }

    #[test]
    fn test_from_map_tiles() {
        let world = ascii_world(&["..H", "###"]);
        assert_eq!(world.collidable().len(), 3);
        assert_eq!(world.climbable(), &[Rect::new(64.0, 0.0, 32.0, 32.0)]);
        assert_eq!(world.width_px(), 96.0);
        assert_eq!(world.height_px(), 64.0);
    }

    #[test]
    fn test_from_map_objects_can_be_both() {
        let json = r#"{
            "width": 4, "height": 4, "tile_width": 32, "tile_height": 32,
            "layers": [ { "type": "objects", "objects": [
                { "x": 10, "y": 20, "width": 30, "height": 5, "collision": true, "climbable": true }
            ] } ]
        }"#;
        let map = MapData::from_json_str(json).unwrap();
        let world = CollisionWorld::from_map(&map).unwrap();
        assert_eq!(world.collidable(), &[Rect::new(10.0, 20.0, 30.0, 5.0)]);
        assert_eq!(world.climbable(), world.collidable());
    }

    #[test]
    fn test_intersects_and_probe() {
        let world = ascii_world(&["...", ".#."]);
        assert!(world.intersects(&Rect::new(40.0, 40.0, 4.0, 4.0)));
        assert!(!world.intersects(&Rect::new(0.0, 0.0, 32.0, 32.0)));
        assert!(world.contains_point(Vec2::new(32.0, 32.0)));
        assert!(!world.contains_point(Vec2::new(64.0, 40.0)));
    }

    #[test]
    fn test_first_blocking_picks_nearest() {
        let world = ascii_world(&["..#.#"]);
        let swept = Rect::new(0.0, 0.0, 160.0, 32.0);
        let right = world.first_blocking(&swept, Direction::Right).unwrap();
        assert_eq!(right.x, 64.0);
        let left = world.first_blocking(&swept, Direction::Left).unwrap();
        assert_eq!(left.x, 128.0);
    }

    #[test]
    fn test_first_blocking_vertical() {
        let world = ascii_world(&["#", ".", "#"]);
        let swept = Rect::new(0.0, 0.0, 32.0, 96.0);
        assert_eq!(world.first_blocking(&swept, Direction::Down).unwrap().y, 0.0);
        assert_eq!(world.first_blocking(&swept, Direction::Up).unwrap().y, 64.0);
    }

    #[test]
    fn test_empty_world_blocks_nothing() {
        let world = CollisionWorld::new(100.0, 100.0, Vec::new(), Vec::new());
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!world.intersects(&r));
        assert!(world.first_blocking(&r, Direction::Down).is_none());
    }
}
