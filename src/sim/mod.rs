//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Collections kept in ascending world-X order
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod cue;
pub mod events;
pub mod particles;
pub mod physics;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod terrain;
pub mod tick;

#[cfg(test)]
mod proptests;

pub use events::{DeathCause, GameEvent};
pub use snapshot::Snapshot;
pub use state::{
    GamePhase, GameState, Marker, Obstacle, ObstacleKind, Orb, Particle, Player, PowerUp,
    PowerUpKind, SimulationState, Thought, Viewport,
};
pub use terrain::{Terrain, TerrainPoint};
pub use tick::{TickInput, tick};
