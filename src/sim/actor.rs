//! Actor kinematics
//!
//! Velocity comes from input plus gravity (or ladder climbing), then the move
//! is resolved one axis at a time: horizontal first, then vertical. Each axis
//! sweeps the actor's box from its old to its new position and stops at the
//! first blocking rect, zeroing velocity on that axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tick::TickInput;
use super::world::{CollisionWorld, Direction};
use crate::settings::{MovementModel, Settings};

/// Horizontal speed below which ground friction snaps to a stop
const STOP_SPEED: f32 = 0.5;

/// Coarse movement state, derived from the contact flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorState {
    Grounded,
    Airborne,
    OnLadder,
}

/// The player-controlled box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner (world pixels)
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    pub on_ladder: bool,
}

impl Actor {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
            on_ladder: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn state(&self) -> ActorState {
        if self.on_ladder {
            ActorState::OnLadder
        } else if self.on_ground {
            ActorState::Grounded
        } else {
            ActorState::Airborne
        }
    }

    /// Put the actor back at `spawn` at rest
    pub fn reset(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.on_ladder = false;
    }
}

/// Which axes were clipped while resolving a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub hit_x: bool,
    pub hit_y: bool,
    /// Clipped while moving down
    pub landed: bool,
}

/// Turn this tick's input into velocity.
///
/// Uses the contact flags from the previous tick. Returns true if the actor
/// jumped.
pub fn integrate_velocity(actor: &mut Actor, input: &TickInput, settings: &Settings) -> bool {
    let dir = input.horizontal();
    let speed = if input.sprint {
        settings.sprint_speed
    } else {
        settings.walk_speed
    };

    match settings.movement {
        MovementModel::Direct => actor.vel.x = dir * speed,
        MovementModel::Momentum { accel, max_speed, .. } => {
            actor.vel.x = (actor.vel.x + dir * accel).clamp(-max_speed, max_speed);
        }
    }

    let mut jumped = false;
    if input.jump && (actor.on_ground || actor.on_ladder) {
        actor.on_ladder = false;
        actor.on_ground = false;
        actor.vel.y = -settings.jump_power;
        jumped = true;
    }

    if actor.on_ladder {
        if input.sprint && input.down {
            actor.on_ladder = false;
            actor.vel.y = settings.ladder_release_impulse;
        } else if input.sprint && input.up {
            actor.on_ladder = false;
            actor.vel.y = -settings.ladder_release_impulse;
        } else {
            actor.vel.y = input.vertical() * settings.climb_speed;
        }
    } else {
        actor.vel.y += settings.gravity;
    }

    if let MovementModel::Momentum {
        ground_friction,
        air_friction,
        ..
    } = settings.movement
    {
        if actor.on_ground {
            if dir == 0.0 {
                actor.vel.x *= ground_friction;
                if actor.vel.x.abs() < STOP_SPEED {
                    actor.vel.x = 0.0;
                }
            }
        } else {
            actor.vel.x *= air_friction;
        }
    }

    jumped
}

/// Move along x, stopping at the first blocking rect. Returns true if clipped.
pub fn move_x(actor: &mut Actor, dx: f32, world: &CollisionWorld) -> bool {
    if dx == 0.0 {
        return false;
    }
    let start = actor.rect();
    let swept = start.union(&start.translated(Vec2::new(dx, 0.0)));
    let dir = if dx > 0.0 {
        Direction::Right
    } else {
        Direction::Left
    };

    match world.first_blocking(&swept, dir) {
        Some(block) => {
            actor.pos.x = if dx > 0.0 {
                block.left() - actor.size.x
            } else {
                block.right()
            };
            actor.vel.x = 0.0;
            true
        }
        None => {
            actor.pos.x += dx;
            false
        }
    }
}

/// Move along y, stopping at the first blocking rect. Returns true if clipped;
/// sets `on_ground` when clipped moving down.
pub fn move_y(actor: &mut Actor, dy: f32, world: &CollisionWorld) -> bool {
    if dy == 0.0 {
        return false;
    }
    let start = actor.rect();
    let swept = start.union(&start.translated(Vec2::new(0.0, dy)));
    let dir = if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };

    match world.first_blocking(&swept, dir) {
        Some(block) => {
            if dy > 0.0 {
                actor.pos.y = block.top() - actor.size.y;
                actor.on_ground = true;
            } else {
                actor.pos.y = block.bottom();
            }
            actor.vel.y = 0.0;
            true
        }
        None => {
            actor.pos.y += dy;
            false
        }
    }
}

/// Keep the actor inside the map horizontally
pub fn clamp_to_map_x(actor: &mut Actor, world: &CollisionWorld) {
    let max_x = (world.width_px() - actor.size.x).max(0.0);
    actor.pos.x = actor.pos.x.min(max_x).max(0.0);
}

/// Resolve a displacement: horizontal sweep, map clamp, then vertical sweep
pub fn resolve(actor: &mut Actor, delta: Vec2, world: &CollisionWorld) -> Contacts {
    let hit_x = move_x(actor, delta.x, world);
    clamp_to_map_x(actor, world);
    let hit_y = move_y(actor, delta.y, world);
    Contacts {
        hit_x,
        hit_y,
        landed: hit_y && delta.y > 0.0,
    }
}
