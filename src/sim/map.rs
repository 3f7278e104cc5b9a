//! Static map description
//!
//! A Tiled-style layout: a grid of tile ids per layer, a property table saying
//! which ids block movement or can be climbed, and free-form object layers for
//! collision boxes and ladders that don't line up with the grid.
//!
//! Maps are read from JSON or built from ASCII art:
//! ```text
//!   '#' = solid tile      'H' = ladder
//!   'S' = spawn point     '.' or ' ' = empty
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tile id used by the ASCII builder for solid ground
pub const SOLID_GID: u32 = 1;
/// Tile id used by the ASCII builder for ladders
pub const LADDER_GID: u32 = 2;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map has invalid format: {0}")]
    InvalidFormat(String),
}

/// Per-tile-id flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileProperties {
    #[serde(default)]
    pub collision: bool,
    #[serde(default)]
    pub climbable: bool,
}

/// A free-standing rectangle from an object layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub collision: bool,
    #[serde(default)]
    pub climbable: bool,
}

/// One map layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// Row-major tile ids, `0` = empty
    Tiles {
        #[serde(default)]
        name: String,
        data: Vec<u32>,
    },
    Objects {
        #[serde(default)]
        name: String,
        objects: Vec<MapObject>,
    },
}

/// Complete static map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Flags keyed by tile id
    #[serde(default)]
    pub tile_properties: HashMap<u32, TileProperties>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Player start (top-left, world pixels)
    #[serde(default)]
    pub spawn: Option<Vec2>,
}

impl MapData {
    /// Parse a map from a JSON string and check its layer sizes
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        let map: MapData = serde_json::from_str(json)?;
        map.validate()?;
        Ok(map)
    }

    /// Read a JSON map from disk
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let json = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::from_json_str(&json)?;
        log::info!(
            "Loaded map {} ({}x{} tiles, {} layers)",
            path.display(),
            map.width,
            map.height,
            map.layers.len()
        );
        Ok(map)
    }

    /// Build a map from ASCII rows (see module docs for the legend).
    ///
    /// Short rows are padded with empty cells. Unknown characters are
    /// rejected so typos in hand-written levels surface immediately.
    pub fn from_ascii(rows: &[&str], tile_size: u32) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(MapError::InvalidFormat("ASCII map is empty".to_string()));
        }

        let mut data = vec![0u32; width * height];
        let mut spawn = None;

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let gid = match ch {
                    '#' => SOLID_GID,
                    'H' => LADDER_GID,
                    'S' => {
                        spawn = Some(Vec2::new(
                            (x as u32 * tile_size) as f32,
                            (y as u32 * tile_size) as f32,
                        ));
                        0
                    }
                    '.' | ' ' => 0,
                    other => {
                        return Err(MapError::InvalidFormat(format!(
                            "unknown tile '{other}' at row {y}, column {x}"
                        )));
                    }
                };
                data[y * width + x] = gid;
            }
        }

        let mut tile_properties = HashMap::new();
        tile_properties.insert(
            SOLID_GID,
            TileProperties {
                collision: true,
                climbable: false,
            },
        );
        tile_properties.insert(
            LADDER_GID,
            TileProperties {
                collision: false,
                climbable: true,
            },
        );

        let map = MapData {
            width: width as u32,
            height: height as u32,
            tile_width: tile_size,
            tile_height: tile_size,
            tile_properties,
            layers: vec![Layer::Tiles {
                name: "ground".to_string(),
                data,
            }],
            spawn,
        };
        map.validate()?;
        Ok(map)
    }

    /// Width of the whole map in pixels
    pub fn width_px(&self) -> f32 {
        (self.width * self.tile_width) as f32
    }

    /// Height of the whole map in pixels
    pub fn height_px(&self) -> f32 {
        (self.height * self.tile_height) as f32
    }

    /// Flags for a tile id; unknown ids have no flags
    pub fn properties(&self, gid: u32) -> TileProperties {
        self.tile_properties.get(&gid).copied().unwrap_or_default()
    }

    fn validate(&self) -> Result<(), MapError> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(MapError::InvalidFormat(
                "tile dimensions must be non-zero".to_string(),
            ));
        }
        let too_big = || MapError::InvalidFormat("map size in pixels overflows".to_string());
        self.width.checked_mul(self.tile_width).ok_or_else(too_big)?;
        self.height.checked_mul(self.tile_height).ok_or_else(too_big)?;
        let cells = (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(too_big)?;
        for layer in &self.layers {
            match layer {
                Layer::Tiles { name, data } if data.len() != cells => {
                    return Err(MapError::InvalidFormat(format!(
                        "tile layer '{name}' has {} cells, expected {cells}",
                        data.len()
                    )));
                }
                Layer::Objects { name, objects } => {
                    if let Some(bad) = objects.iter().find(|o| o.width < 0.0 || o.height < 0.0) {
                        return Err(MapError::InvalidFormat(format!(
                            "object layer '{name}' has negative size at ({}, {})",
                            bad.x, bad.y
                        )));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii_legend() {
        let map = MapData::from_ascii(&["S.H", "###"], 32).unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(map.height, 2);
        assert_eq!(map.spawn, Some(Vec2::ZERO));
        match &map.layers[0] {
            Layer::Tiles { data, .. } => {
                assert_eq!(data, &vec![0, 0, LADDER_GID, SOLID_GID, SOLID_GID, SOLID_GID]);
            }
            other => panic!("unexpected layer {other:?}"),
        }
        assert!(map.properties(SOLID_GID).collision);
        assert!(map.properties(LADDER_GID).climbable);
        assert_eq!(map.properties(99), TileProperties::default());
    }

    #[test]
    fn test_from_ascii_pads_short_rows() {
        let map = MapData::from_ascii(&["#", "###"], 16).unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(map.width_px(), 48.0);
        assert_eq!(map.height_px(), 32.0);
    }

    #[test]
    fn test_from_ascii_rejects_unknown_tile() {
        let err = MapData::from_ascii(&["#?#"], 32).unwrap_err();
        assert!(matches!(err, MapError::InvalidFormat(_)));
    }

    #[test]
    fn test_from_json_with_objects() {
        let json = r#"{
            "width": 2, "height": 2, "tile_width": 32, "tile_height": 32,
            "tile_properties": { "5": { "collision": true } },
            "layers": [
                { "type": "tiles", "name": "ground", "data": [0, 0, 5, 5] },
                { "type": "objects", "objects": [
                    { "x": 8, "y": 0, "width": 16, "height": 32, "climbable": true }
                ] }
            ],
            "spawn": [0, 0]
        }"#;
        let map = MapData::from_json_str(json).unwrap();
        assert_eq!(map.layers.len(), 2);
        assert!(map.properties(5).collision);
        assert_eq!(map.spawn, Some(Vec2::ZERO));
    }

    #[test]
    fn test_from_json_rejects_wrong_layer_size() {
        let json = r#"{
            "width": 2, "height": 2, "tile_width": 32, "tile_height": 32,
            "layers": [ { "type": "tiles", "data": [0, 0, 5] } ]
        }"#;
        let err = MapData::from_json_str(json).unwrap_err();
        assert!(matches!(err, MapError::InvalidFormat(_)));
    }

    #[test]
    fn test_from_json_rejects_pixel_size_overflow() {
        let json = r#"{
            "width": 1048576, "height": 0, "tile_width": 8192, "tile_height": 32,
            "layers": []
        }"#;
        let err = MapData::from_json_str(json).unwrap_err();
        assert!(matches!(err, MapError::InvalidFormat(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            MapData::from_json_str("not json"),
            Err(MapError::Json(_))
        ));
    }
}
