//! Read-only view of the state for renderers and audio
//!
//! A [`Snapshot`] borrows the state, so the borrow checker guarantees no
//! tick can run while a reader holds one.

use serde::Serialize;

use super::state::{
    GamePhase, GameState, Marker, Obstacle, Orb, Particle, Player, PowerUp, Thought, Viewport,
};
use super::terrain::TerrainPoint;

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub speed: f32,
    pub distance: f32,
    pub elapsed_ticks: u64,
    pub player: Player,
    pub invincible: bool,
    pub invincibility_ticks_remaining: u32,
    /// 0 (night) to 1 (day)
    pub day_night: f32,
    pub viewport: Viewport,
    pub terrain: &'a [TerrainPoint],
    pub obstacles: &'a [Obstacle],
    pub orbs: &'a [Orb],
    pub powerups: &'a [PowerUp],
    pub markers: &'a [Marker],
    pub particles: &'a [Particle],
    pub thought: Option<&'a Thought>,
}

impl Snapshot<'_> {
    /// Camera-relative X for a world X
    pub fn screen_x(&self, world_x: f32) -> f32 {
        crate::screen_x(world_x, self.distance)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl GameState {
    /// Borrow the current state for drawing. Take it after `tick` returns.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let cycle = self.sim.elapsed_ticks as f32 * self.tuning.day_night_rate;
        Snapshot {
            phase: self.sim.phase,
            score: self.sim.score,
            speed: self.sim.speed,
            distance: self.sim.distance,
            elapsed_ticks: self.sim.elapsed_ticks,
            player: self.player,
            invincible: self.sim.invincible,
            invincibility_ticks_remaining: self.sim.invincibility_ticks_remaining,
            day_night: (cycle.sin() + 1.0) / 2.0,
            viewport: self.viewport,
            terrain: self.terrain.points(),
            obstacles: &self.obstacles,
            orbs: &self.orbs,
            powerups: &self.powerups,
            markers: &self.markers,
            particles: &self.particles,
            thought: self.thought.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(3);
        state.start();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }

        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.score, state.sim.score);
        assert_eq!(snap.distance, state.sim.distance);
        assert_eq!(snap.player, state.player);
        assert_eq!(snap.terrain.len(), state.terrain.points().len());
        assert!((snap.screen_x(snap.distance + 200.0) - 200.0).abs() < 1e-3);
        assert!(snap.day_night >= 0.0 && snap.day_night <= 1.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3);
        let json = state.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Idle");
        assert_eq!(value["score"], 0);
        assert!(value["terrain"].as_array().is_some_and(|t| !t.is_empty()));
        assert!(value["thought"].is_null());
    }
}
