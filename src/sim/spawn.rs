//! Entity spawning and retirement
//!
//! Probabilistic spawns happen only at the terrain frontier, once per newly
//! generated point, so every collection stays sorted by world X. Rules are
//! rolled in a fixed order (obstacle, power-up, orb) and each roll is drawn
//! whether or not its gates pass, keeping the RNG stream independent of
//! gameplay state.

use rand::Rng;

use super::events::GameEvent;
use super::state::{GameState, Marker, Obstacle, ObstacleKind, Orb, PowerUp, PowerUpKind};
use super::terrain::TerrainPoint;
use crate::screen_x;

/// Symbols printed on orbs
pub const ORB_SYMBOLS: [&str; 6] = ["{", "}", "</>", ":=", "&&", "||"];

/// Roll every spawn rule for a freshly generated terrain point
pub fn spawn_at(state: &mut GameState, point: TerrainPoint) {
    let distance = state.sim.distance;
    let elapsed = state.sim.elapsed_ticks;
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    // Obstacles
    let roll = rng.random::<f32>();
    let spacing = state
        .obstacles
        .last()
        .map_or(f32::INFINITY, |last| point.x - last.x);
    if roll < tuning.obstacle_chance
        && distance > tuning.obstacle_unlock_distance
        && spacing >= tuning.min_obstacle_spacing
    {
        let kind = if rng.random_bool(0.5) {
            ObstacleKind::Solid
        } else {
            ObstacleKind::Decorative
        };
        state.obstacles.push(Obstacle { x: point.x, kind });
    }

    // Power-ups
    let roll = rng.random::<f32>();
    let since_last = elapsed.saturating_sub(state.last_powerup_tick);
    if roll < tuning.powerup_chance
        && distance > tuning.powerup_unlock_distance
        && since_last >= u64::from(tuning.powerup_cooldown_ticks)
    {
        let kind = if rng.random::<f32>() < tuning.speed_powerup_weight {
            PowerUpKind::Speed
        } else {
            PowerUpKind::Shield
        };
        state.last_powerup_tick = elapsed;
        state.powerups.push(PowerUp {
            x: point.x,
            y: point.height - tuning.powerup_lift,
            kind,
            collected: false,
        });
        log::debug!("Spawned {:?} power-up at x={:.0}", kind, point.x);
    }

    // Orbs
    let roll = rng.random::<f32>();
    if roll < tuning.orb_chance && distance > tuning.orb_unlock_distance {
        let lift = tuning.orb_min_lift + rng.random::<f32>() * tuning.orb_lift_band;
        let symbol = ORB_SYMBOLS[rng.random_range(0..ORB_SYMBOLS.len())];
        state.orbs.push(Orb {
            x: point.x,
            y: point.height - lift,
            symbol: symbol.to_string(),
            collected: false,
        });
    }
}

/// Drop a progress marker one screen ahead each time distance crosses an interval
pub fn place_markers(state: &mut GameState) {
    let interval = state.tuning.marker_interval;
    if interval <= 0.0 {
        return;
    }

    let reached = (state.sim.distance / interval).floor() as u32;
    if reached > state.markers_placed {
        state.markers_placed = reached;
        let marker = Marker {
            x: state.sim.distance + state.viewport.width,
            ordinal: reached,
        };
        state.markers.push(marker);
        log::debug!("Marker {} placed at x={:.0}", marker.ordinal, marker.x);
        state.push_event(GameEvent::MarkerReached {
            ordinal: marker.ordinal,
        });
    }
}

/// Remove every entity that has scrolled past the eviction line.
/// Collected pickups stay until then so the host can animate them.
pub fn retire(state: &mut GameState) {
    let distance = state.sim.distance;
    let line = state.tuning.eviction_x;
    let ahead = |x: f32| screen_x(x, distance) >= line;

    state.obstacles.retain(|o| ahead(o.x));
    state.orbs.retain(|o| ahead(o.x));
    state.powerups.retain(|p| ahead(p.x));
    state.markers.retain(|m| ahead(m.x));
}
