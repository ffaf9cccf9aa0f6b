//! Outward notifications raised during a tick
//!
//! The simulation never calls back into the host. Events queue up on the
//! state and the host drains them after `tick` returns (audio cues, HUD
//! updates, leaderboards).

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Hit a solid obstacle without a shield
    Obstacle,
    /// Dropped past the bottom of the viewport; shields don't help
    FellOffWorld,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score went up
    ScoreChanged { score: u64 },
    /// Raised exactly once per run
    GameOver { final_score: u64, cause: DeathCause },
    OrbCollected { symbol: String, bonus: u64 },
    PowerUpCollected { kind: PowerUpKind },
    /// Invincibility ran out
    ShieldExpired,
    /// A progress marker was placed ahead of the camera
    MarkerReached { ordinal: u32 },
    ThoughtShown { text: String },
}
