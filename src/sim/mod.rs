//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, windowing or input-device dependencies

pub mod actor;
pub mod camera;
pub mod clock;
pub mod map;
pub mod pilot;
pub mod raycast;
pub mod rect;
pub mod rope;
pub mod state;
pub mod tick;
pub mod world;

pub use actor::{Actor, ActorState, Contacts};
pub use camera::Camera;
pub use clock::FixedStep;
pub use map::{Layer, MapData, MapError, MapObject, TileProperties};
pub use pilot::Pilot;
pub use rect::Rect;
pub use rope::{Rope, RopeController, apply_constraint, cap_speed};
pub use state::{GameEvent, GameState, MotionState, RenderFrame};
pub use tick::{TickInput, tick};
pub use world::{CollisionWorld, Direction};
