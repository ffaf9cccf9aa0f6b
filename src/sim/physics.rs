//! Sled physics
//!
//! Arcade model: constant gravity, snap-to-surface ground contact, and slope
//! feeding into horizontal speed like a sled on snow. The player never moves
//! horizontally on screen; `distance` scrolls the world instead.

use super::events::DeathCause;
use super::state::GameState;

/// Advance the player one tick. May end the run on a floor breach.
pub fn integrate(state: &mut GameState) {
    let world_x = state.player_world_x();
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.vertical_velocity += tuning.gravity;
    player.y += player.vertical_velocity;

    let ground = state.terrain.height_at(world_x);
    let slope = state.terrain.slope_at(world_x);
    let rest_y = ground - tuning.sled_height;

    if player.y >= rest_y - tuning.ground_margin {
        player.y = rest_y;
        player.vertical_velocity = 0.0;
        player.grounded = true;
        player.rotation = slope.atan();

        // Downhill (positive slope) speeds up, uphill slows down
        let speed = state.sim.speed + slope * tuning.slope_influence;
        state.sim.speed = speed.clamp(tuning.min_speed, tuning.max_speed);
    } else {
        player.grounded = false;
        player.rotation += tuning.air_spin;
    }

    // Falling off the world is fatal even with a shield
    let floor = state.viewport.height - tuning.floor_margin;
    if player.y > floor {
        player.y = floor;
        state.game_over(DeathCause::FellOffWorld);
        return;
    }

    state.sim.distance += state.sim.speed;
    state.refresh_score();
}
