//! Fixed timestep simulation tick
//!
//! Owns the `Idle -> Playing -> Ended` lifecycle and the per-tick stage
//! order: clock, physics, terrain, spawning, collisions, particles.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::events::GameEvent;
use super::particles::{self, colors};
use super::state::{GamePhase, GameState, Viewport};
use super::{collision, cue, physics, spawn};

/// Particles thrown up by a jump
const JUMP_BURST: usize = 15;
/// Where snow leaves the runners, relative to the sled origin
const RUNNER_OFFSET: Vec2 = Vec2::new(0.0, 10.0);
/// Where the trail is dropped, relative to the sled origin
const TRAIL_OFFSET: Vec2 = Vec2::new(-20.0, 10.0);
/// Autopilot jumps this many ticks of travel before reaching an obstacle
const AUTOPILOT_LEAD_TICKS: f32 = 6.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (click/tap/space)
    pub jump: bool,
    /// Start a fresh run before ticking
    pub restart: bool,
    /// Idle/demo mode - autopilot jumps over obstacles
    pub idle_mode: bool,
}

impl GameState {
    /// Reset everything and begin a run, continuing the current RNG stream
    pub fn start(&mut self) {
        self.sim.phase = GamePhase::Playing;
        self.reset_world();
        log::info!(
            "Run started (seed {}, viewport {}x{})",
            self.seed,
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Reseed the RNG, then [`start`](Self::start). Same seed, same run.
    pub fn start_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.start();
    }

    /// Kick the sled upward. Returns false (and does nothing) unless grounded mid-run.
    pub fn jump(&mut self) -> bool {
        if self.sim.phase != GamePhase::Playing || !self.player.grounded {
            return false;
        }
        self.player.vertical_velocity = self.tuning.jump_impulse;
        self.player.grounded = false;
        let pos = self.player.pos() + RUNNER_OFFSET;
        self.emit_particles(pos, JUMP_BURST, colors::SNOW);
        true
    }

    /// Change the viewport. Terrain and entities keep their world X; every
    /// screen Y is scaled by the height ratio so heights stay inside the new
    /// bounds and the sled keeps its clearance above the ground.
    pub fn resize(&mut self, width: f32, height: f32) {
        let old_height = self.viewport.height;
        self.viewport = Viewport { width, height };
        self.terrain.set_fallback_height(height / 2.0);
        log::debug!("Viewport resized to {}x{}", width, height);

        if old_height <= 0.0 || height == old_height {
            return;
        }
        let factor = height / old_height;
        let world_x = self.player_world_x();
        let clearance = self.terrain.height_at(world_x) - self.player.y;

        self.terrain.scale_heights(factor);
        for orb in &mut self.orbs {
            orb.y *= factor;
        }
        for powerup in &mut self.powerups {
            powerup.y *= factor;
        }
        for particle in &mut self.particles {
            particle.pos.y *= factor;
        }
        self.player.y = self.terrain.height_at(world_x) - clearance;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.start();
    }

    // Idle and Ended are frozen
    if state.sim.phase != GamePhase::Playing {
        return;
    }

    if input.jump || (input.idle_mode && autopilot_wants_jump(state)) {
        state.jump();
    }

    state.sim.elapsed_ticks += 1;
    count_down_shield(state);
    cue::advance(state);

    physics::integrate(state);
    if state.sim.phase != GamePhase::Playing {
        return;
    }

    let new_points = state.terrain.extend(
        &mut state.rng,
        &state.tuning,
        state.sim.distance,
        state.viewport,
    );
    for point in new_points {
        spawn::spawn_at(state, point);
    }
    state
        .terrain
        .retire(state.sim.distance, state.tuning.eviction_x);
    spawn::place_markers(state);
    spawn::retire(state);

    collision::resolve(state);
    if state.sim.phase != GamePhase::Playing {
        return;
    }

    particles::advance(&mut state.particles, state.tuning.particle_decay);
    if state.player.grounded && state.sim.speed > state.tuning.trail_speed {
        let pos = state.player.pos() + TRAIL_OFFSET;
        state.emit_particles(pos, 1, colors::TRAIL);
    }
}

fn count_down_shield(state: &mut GameState) {
    if state.sim.invincibility_ticks_remaining == 0 {
        return;
    }
    state.sim.invincibility_ticks_remaining -= 1;
    if state.sim.invincibility_ticks_remaining == 0 {
        state.sim.invincible = false;
        state.push_event(GameEvent::ShieldExpired);
    }
}

/// Demo mode: jump when a solid obstacle is about to arrive
fn autopilot_wants_jump(state: &GameState) -> bool {
    if !state.player.grounded {
        return false;
    }
    let lead = state.tuning.obstacle_half_width + state.sim.speed * AUTOPILOT_LEAD_TICKS;
    let player_x = state.player_world_x();
    state
        .obstacles
        .iter()
        .filter(|o| o.blocks())
        .map(|o| o.x - player_x)
        .any(|dx| dx > 0.0 && dx <= lead)
}
