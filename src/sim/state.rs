//! Game session state
//!
//! Everything one run needs lives in `GameState`; subsystems receive it (or
//! the parts they need) explicitly from the loop that owns it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorState};
use super::camera::Camera;
use super::map::{MapData, MapError};
use super::rope::RopeController;
use super::world::CollisionWorld;
use crate::clamp_point;
use crate::consts::TILE_SIZE;
use crate::settings::Settings;

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RopeAttached { anchor: Vec2, length: f32 },
    /// Fired, but nothing within reach along the aim line
    RopeMissed,
    RopeReleased,
    Jumped,
    Landed,
    LadderGrabbed,
    LadderLeft,
    /// Fell off the bottom of the map and was put back at spawn
    Respawned,
}

/// Movement state plus whether the rope is attached (the two compose)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionState {
    pub state: ActorState,
    pub roped: bool,
}

/// Per-tick values handed to the renderer, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    /// Actor's top-left corner on screen
    pub actor_pos: Vec2,
    pub actor_size: Vec2,
    /// Actor center to anchor
    pub rope_line: Option<(Vec2, Vec2)>,
    /// Actor center to the aim point, shortened to rope reach
    pub aim_line: (Vec2, Vec2),
    /// World position of the screen's top-left corner
    pub camera: Vec2,
}

/// Complete session state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub world: CollisionWorld,
    pub actor: Actor,
    pub rope: RopeController,
    pub camera: Camera,
    pub settings: Settings,
    pub spawn: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Times the actor fell off the map
    pub respawns: u32,
    /// Highest point reached above spawn, in pixels
    pub best_altitude: f32,
}

impl GameState {
    pub fn new(world: CollisionWorld, settings: Settings, spawn: Vec2) -> Self {
        let mut state = Self {
            actor: Actor::new(spawn, settings.actor_size),
            rope: RopeController::new(settings.min_rope_length, settings.max_rope_length),
            camera: Camera::default(),
            world,
            settings,
            spawn,
            time_ticks: 0,
            respawns: 0,
            best_altitude: 0.0,
        };
        state.update_camera();
        state
    }

    /// Build a session from map data; the map's spawn wins over the settings'
    pub fn from_map(map: &MapData, settings: Settings) -> Result<Self, MapError> {
        let world = CollisionWorld::from_map(map)?;
        let spawn = map.spawn.unwrap_or(settings.spawn);
        log::info!(
            "New session: {}x{} px map, spawn at ({}, {})",
            world.width_px(),
            world.height_px(),
            spawn.x,
            spawn.y
        );
        Ok(Self::new(world, settings, spawn))
    }

    pub fn motion(&self) -> MotionState {
        MotionState {
            state: self.actor.state(),
            roped: self.rope.is_active(),
        }
    }

    /// Put the actor back at spawn and drop the rope
    pub fn respawn(&mut self) {
        self.actor.reset(self.spawn);
        self.rope.release();
        self.respawns += 1;
        log::info!("Actor fell off the map, respawn #{}", self.respawns);
    }

    /// Score for the leaderboard: whole tiles climbed above spawn
    pub fn score(&self) -> u64 {
        (self.best_altitude / TILE_SIZE).floor() as u64
    }

    pub fn map_size(&self) -> Vec2 {
        Vec2::new(self.world.width_px(), self.world.height_px())
    }

    pub fn update_camera(&mut self) {
        let map_size = self.map_size();
        self.camera
            .follow(self.actor.center(), map_size, self.settings.screen_size());
    }

    /// Values the renderer needs this frame; `aim` is the mouse in screen space
    pub fn render_frame(&self, aim: Vec2) -> RenderFrame {
        let center = self.actor.center();
        let aim_world = clamp_point(
            center,
            self.camera.to_world(aim),
            self.rope.max_length(),
        );
        RenderFrame {
            actor_pos: self.camera.to_screen(self.actor.pos),
            actor_size: self.actor.size,
            rope_line: self.rope.rope().map(|rope| {
                (
                    self.camera.to_screen(center),
                    self.camera.to_screen(rope.anchor),
                )
            }),
            aim_line: (self.camera.to_screen(center), self.camera.to_screen(aim_world)),
            camera: self.camera.offset,
        }
    }
}
