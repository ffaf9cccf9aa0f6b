//! Collision detection and pickup effects
//!
//! Everything is compared in screen space: the player sits at its fixed
//! anchor and entities at `x - distance`. Solid obstacles use an
//! axis-aligned box around a point `obstacle_top_offset` above the terrain;
//! pickups use a circle.

use glam::Vec2;

use super::events::{DeathCause, GameEvent};
use super::particles::colors;
use super::state::{GameState, PowerUpKind};
use crate::screen_x;

/// Particles emitted when grabbing an orb
const ORB_BURST: usize = 10;
/// Particles emitted when grabbing a power-up
const POWERUP_BURST: usize = 15;

/// Box overlap between the player and an obstacle centre
#[inline]
pub fn obstacle_hit(player: Vec2, obstacle: Vec2, half_extents: Vec2) -> bool {
    let d = (player - obstacle).abs();
    d.x < half_extents.x && d.y < half_extents.y
}

/// Circle overlap between the player and a pickup
#[inline]
pub fn pickup_hit(player: Vec2, pickup: Vec2, radius: f32) -> bool {
    player.distance(pickup) < radius
}

/// Check the player against every live entity and apply the results.
/// A lethal hit ends the run and skips the pickup checks.
pub fn resolve(state: &mut GameState) {
    let player = state.player.pos();
    let distance = state.sim.distance;
    let tuning = &state.tuning;

    let half = Vec2::new(tuning.obstacle_half_width, tuning.obstacle_half_height);
    let crashed = state.obstacles.iter().filter(|o| o.blocks()).any(|o| {
        let centre = Vec2::new(
            screen_x(o.x, distance),
            state.terrain.height_at(o.x) - tuning.obstacle_top_offset,
        );
        obstacle_hit(player, centre, half)
    });
    if crashed && !state.sim.invincible {
        state.game_over(DeathCause::Obstacle);
        return;
    }

    // Collect first, apply after, so effects can borrow the whole state
    let radius = tuning.pickup_radius;
    let mut powerups = Vec::new();
    for powerup in state.powerups.iter_mut().filter(|p| !p.collected) {
        let pos = Vec2::new(screen_x(powerup.x, distance), powerup.y);
        if pickup_hit(player, pos, radius) {
            powerup.collected = true;
            powerups.push((powerup.kind, pos));
        }
    }

    let mut orbs = Vec::new();
    for orb in state.orbs.iter_mut().filter(|o| !o.collected) {
        let pos = Vec2::new(screen_x(orb.x, distance), orb.y);
        if pickup_hit(player, pos, radius) {
            orb.collected = true;
            orbs.push((orb.symbol.clone(), pos));
        }
    }

    for (kind, pos) in powerups {
        apply_powerup(state, kind, pos);
    }
    for (symbol, pos) in orbs {
        let bonus = state.tuning.orb_bonus;
        state.sim.bonus_score += bonus;
        state.emit_particles(pos, ORB_BURST, colors::ORB);
        state.push_event(GameEvent::OrbCollected { symbol, bonus });
        state.refresh_score();
    }
}

fn apply_powerup(state: &mut GameState, kind: PowerUpKind, pos: Vec2) {
    match kind {
        PowerUpKind::Speed => {
            let boosted = state.sim.speed + state.tuning.speed_boost;
            state.sim.speed = boosted.min(state.tuning.max_speed);
            state.emit_particles(pos, POWERUP_BURST, colors::SPEED);
        }
        PowerUpKind::Shield => {
            state.sim.invincible = true;
            state.sim.invincibility_ticks_remaining = state.tuning.shield_ticks;
            state.emit_particles(pos, POWERUP_BURST, colors::SHIELD);
        }
    }
    log::debug!("Picked up {:?} at distance {:.0}", kind, state.sim.distance);
    state.push_event(GameEvent::PowerUpCollected { kind });
}
