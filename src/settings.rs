//! Physics tuning and screen settings
//!
//! Loaded from JSON; every field has a default so a settings file only needs
//! the values it changes. Speeds and accelerations are per tick, not per
//! second: the simulation advances in fixed 60 Hz steps.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_ROPE_DIST, RAYCAST_STEPS, TILE_SIZE};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// How horizontal input turns into horizontal velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MovementModel {
    /// Velocity is set straight from input every tick
    #[default]
    Direct,
    /// Input accelerates; friction bleeds speed off when idle on the ground
    /// and slowly while airborne, so rope swings keep their momentum
    Momentum {
        accel: f32,
        max_speed: f32,
        /// Multiplier applied per idle tick on the ground
        ground_friction: f32,
        /// Multiplier applied per tick in the air
        air_friction: f32,
    },
}

impl MovementModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementModel::Direct => "Direct",
            MovementModel::Momentum { .. } => "Momentum",
        }
    }

    /// Momentum preset matching the pendulum prototype's feel
    pub fn momentum() -> Self {
        MovementModel::Momentum {
            accel: 0.4,
            max_speed: 9.0,
            ground_friction: 0.5,
            air_friction: 0.98,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Movement ===
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub movement: MovementModel,

    // === Ladders ===
    pub climb_speed: f32,
    /// Vertical speed given when sprint-dropping off a ladder
    pub ladder_release_impulse: f32,

    // === Actor ===
    pub actor_size: Vec2,
    /// Used when the map doesn't define a spawn point
    pub spawn: Vec2,

    // === Rope ===
    pub max_rope_length: f32,
    pub min_rope_length: f32,
    /// Length change per tick while holding up/down
    pub rope_adjust_speed: f32,
    /// Speed cap applied after the rope constraint (None = uncapped)
    pub max_pull_speed: Option<f32>,
    pub raycast_steps: u32,
    /// Ignore aim points below the actor's center
    pub fire_upward_only: bool,

    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 9.0,
            gravity: 0.8,
            jump_power: 15.0,
            movement: MovementModel::Direct,

            climb_speed: 4.0,
            ladder_release_impulse: 15.0,

            actor_size: Vec2::splat(TILE_SIZE),
            spawn: Vec2::new(64.0, 3072.0),

            max_rope_length: MAX_ROPE_DIST,
            min_rope_length: 0.0,
            rope_adjust_speed: 3.0,
            max_pull_speed: Some(12.0),
            raycast_steps: RAYCAST_STEPS,
            fire_upward_only: false,

            screen_width: 1200.0,
            screen_height: 720.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, message: &str) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid {
                field,
                message: message.to_string(),
            })
        }

        if !(self.actor_size.x > 0.0 && self.actor_size.y > 0.0) {
            return invalid("actor_size", "must be positive");
        }
        if !(0.0..=MAX_ROPE_DIST).contains(&self.max_rope_length) {
            return invalid(
                "max_rope_length",
                &format!("must lie in [0, {MAX_ROPE_DIST}]"),
            );
        }
        if !(self.min_rope_length >= 0.0 && self.min_rope_length <= self.max_rope_length) {
            return invalid("min_rope_length", "must lie in [0, max_rope_length]");
        }
        if self.raycast_steps == 0 {
            return invalid("raycast_steps", "must be at least 1");
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return invalid("screen_width/screen_height", "must be positive");
        }
        if let Some(max) = self.max_pull_speed {
            if !(max >= 0.0) {
                return invalid("max_pull_speed", "must be non-negative");
            }
        }
        if let MovementModel::Momentum {
            accel,
            max_speed,
            ground_friction,
            air_friction,
        } = self.movement
        {
            if !accel.is_finite() {
                return invalid("movement", "accel must be a finite number");
            }
            if !(max_speed >= 0.0 && max_speed.is_finite()) {
                return invalid("movement", "max_speed must be a non-negative number");
            }
            if !(0.0..=1.0).contains(&ground_friction) || !(0.0..=1.0).contains(&air_friction) {
                return invalid("movement", "friction multipliers must lie in [0, 1]");
            }
        }
        Ok(())
    }

    /// Screen size as a vector
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_rope_length, 192.0);
        assert_eq!(settings.movement.as_str(), "Direct");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json_str(r#"{ "gravity": 0.5, "fire_upward_only": true }"#).unwrap();
        assert_eq!(settings.gravity, 0.5);
        assert!(settings.fire_upward_only);
        assert_eq!(settings.jump_power, 15.0);
    }

    #[test]
    fn test_momentum_model_from_json() {
        let settings = Settings::from_json_str(
            r#"{ "movement": { "kind": "momentum", "accel": 0.4, "max_speed": 9,
                 "ground_friction": 0.5, "air_friction": 0.98 } }"#,
        )
        .unwrap();
        assert_eq!(settings.movement, MovementModel::momentum());
    }

    #[test]
    fn test_rejects_min_above_max() {
        let err = Settings::from_json_str(r#"{ "min_rope_length": 500 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "min_rope_length", .. }));
    }

    #[test]
    fn test_rejects_negative_max_speed() {
        let json = r#"{ "movement": { "kind": "momentum", "accel": 0.4, "max_speed": -1,
                        "ground_friction": 0.5, "air_friction": 0.98 } }"#;
        let err = Settings::from_json_str(json).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "movement", .. }));

        let settings = Settings {
            movement: MovementModel::Momentum {
                accel: f32::NAN,
                max_speed: 9.0,
                ground_friction: 0.5,
                air_friction: 0.98,
            },
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_rope_longer_than_reach() {
        let err = Settings::from_json_str(r#"{ "max_rope_length": 1000 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "max_rope_length", .. }));
        assert!(Settings::from_json_str(r#"{ "max_rope_length": 192 }"#).is_ok());
    }

    #[test]
    fn test_rejects_zero_raycast_steps() {
        let err = Settings::from_json_str(r#"{ "raycast_steps": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "raycast_steps", .. }));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Settings::from_json_str("{ gravity: }"),
            Err(SettingsError::Json(_))
        ));
    }
}
