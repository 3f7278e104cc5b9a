//! Seeded autoplay
//!
//! Produces a plausible stream of inputs (walk bursts, jumps, ladder climbs,
//! grapple swings) from a seed. Drives the headless binary and lets tests
//! check that identical seeds give identical runs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::ActorState;
use super::state::GameState;
use super::tick::TickInput;

/// Chance per tick of jumping while grounded
const JUMP_CHANCE: f64 = 0.04;
/// Chance per tick of firing the hook while airborne
const FIRE_CHANCE: f64 = 0.06;

pub struct Pilot {
    rng: Pcg32,
    /// -1, 0 or +1
    walk_dir: i32,
    walk_ticks: u32,
    sprint: bool,
    /// Ticks left before letting go of the rope
    swing_ticks: u32,
    /// Rope length change while swinging: -1 retract, +1 extend
    reel: i32,
}

impl Pilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            walk_dir: 0,
            walk_ticks: 0,
            sprint: false,
            swing_ticks: 0,
            reel: 0,
        }
    }

    /// Decide the input for the next tick from the current state
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        if self.walk_ticks == 0 {
            self.walk_dir = self.rng.random_range(-1..=1);
            self.walk_ticks = self.rng.random_range(20..90);
            self.sprint = self.rng.random_bool(0.3);
        }
        self.walk_ticks -= 1;

        let mut input = TickInput {
            left: self.walk_dir < 0,
            right: self.walk_dir > 0,
            sprint: self.sprint,
            ..Default::default()
        };

        let motion = state.motion();
        if motion.roped {
            self.swing(&mut input);
        } else {
            match motion.state {
                ActorState::Grounded => input.jump = self.rng.random_bool(JUMP_CHANCE),
                ActorState::OnLadder => {
                    // Mostly climb, sometimes hop off
                    input.up = self.rng.random_bool(0.8);
                    input.sprint = false;
                    input.jump = self.rng.random_bool(0.02);
                }
                ActorState::Airborne => {
                    if self.rng.random_bool(FIRE_CHANCE) {
                        input.fire = true;
                        input.aim = self.pick_aim(state);
                        self.swing_ticks = self.rng.random_range(30..120);
                        self.reel = self.rng.random_range(-1..=1);
                    }
                }
            }
        }

        input
    }

    fn swing(&mut self, input: &mut TickInput) {
        if self.swing_ticks == 0 {
            input.release = true;
            return;
        }
        self.swing_ticks -= 1;
        input.up = self.reel < 0;
        input.down = self.reel > 0;
    }

    /// A point above the actor within rope reach, in screen space
    fn pick_aim(&mut self, state: &GameState) -> Vec2 {
        let reach = state.rope.max_length();
        let offset = Vec2::new(
            self.rng.random_range(-reach..=reach),
            -self.rng.random_range(reach * 0.3..=reach),
        );
        state.camera.to_screen(state.actor.center() + offset)
    }
}
