//! Fixed timestep simulation tick
//!
//! One call advances the session by one step, strictly in this order:
//! rope fire/release, input velocity, rope length, collision, rope
//! constraint, second collision pass, ladder check, fall-off, camera.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor;
use super::actor::ActorState;
use super::rope::{apply_constraint, cap_speed};
use super::state::{GameEvent, GameState};

/// Input snapshot for a single tick, assembled once by the input layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub sprint: bool,
    /// Shoot the grappling hook toward `aim` (edge-triggered)
    pub fire: bool,
    /// Detach the rope (edge-triggered)
    pub release: bool,
    /// Mouse position in screen pixels
    pub aim: Vec2,
}

impl TickInput {
    /// -1 left, +1 right, 0 for neither or both
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// -1 up, +1 down, 0 for neither or both
    pub fn vertical(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the session by one fixed step
pub fn tick(state: &mut GameState, input: TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let before = state.actor.state();
    state.time_ticks += 1;

    // Rope events
    if input.fire {
        fire_rope(state, input.aim, &mut events);
    }
    if input.release && state.rope.is_active() {
        state.rope.release();
        log::debug!("Rope released");
        events.push(GameEvent::RopeReleased);
    }

    // Velocity from input, gravity or ladder
    if actor::integrate_velocity(&mut state.actor, &input, &state.settings) {
        events.push(GameEvent::Jumped);
    }

    // Up retracts, down extends
    if state.rope.is_active() {
        state
            .rope
            .adjust_length(input.vertical() * state.settings.rope_adjust_speed);
    }

    // Collision pass
    state.actor.on_ground = false;
    let vel = state.actor.vel;
    actor::resolve(&mut state.actor, vel, &state.world);

    // Rope constraint, then resolve whatever displacement it caused
    if let Some(rope) = state.rope.rope().copied() {
        let center = state.actor.center();
        let (new_center, new_vel) =
            apply_constraint(center, state.actor.vel, rope.anchor, rope.length);
        state.actor.vel = cap_speed(new_vel, state.settings.max_pull_speed);

        let shift = new_center - center;
        if shift != Vec2::ZERO {
            actor::resolve(&mut state.actor, shift, &state.world);
        }
    }

    state.actor.on_ladder = state.world.touches_climbable(&state.actor.rect());

    if state.actor.pos.y > state.world.height_px() {
        state.respawn();
        events.push(GameEvent::Respawned);
    } else {
        let altitude = state.spawn.y - state.actor.pos.y;
        state.best_altitude = state.best_altitude.max(altitude);
    }

    push_state_events(before, state.actor.state(), &mut events);
    state.update_camera();

    events
}

/// Shoot the hook from the actor's center toward the mouse
fn fire_rope(state: &mut GameState, aim: Vec2, events: &mut Vec<GameEvent>) {
    let center = state.actor.center();
    let target = state.camera.to_world(aim);

    if state.settings.fire_upward_only && target.y > center.y {
        log::debug!("Ignoring rope aimed below the actor");
        return;
    }

    match state
        .rope
        .fire(center, target, &state.world, state.settings.raycast_steps)
    {
        Some(rope) => {
            log::debug!(
                "Rope attached at ({:.1}, {:.1}), length {:.1}",
                rope.anchor.x,
                rope.anchor.y,
                rope.length
            );
            events.push(GameEvent::RopeAttached {
                anchor: rope.anchor,
                length: rope.length,
            });
        }
        None => events.push(GameEvent::RopeMissed),
    }
}

fn push_state_events(before: ActorState, after: ActorState, events: &mut Vec<GameEvent>) {
    if before == after {
        return;
    }
    if before == ActorState::OnLadder {
        events.push(GameEvent::LadderLeft);
    }
    match after {
        ActorState::Grounded => events.push(GameEvent::Landed),
        ActorState::OnLadder => events.push(GameEvent::LadderGrabbed),
        ActorState::Airborne => {}
    }
}
