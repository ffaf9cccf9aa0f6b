//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]. Entity collections are
//! kept in ascending world-X order because entities are only ever appended at
//! the generation frontier and only ever retired from the back of the camera.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{DeathCause, GameEvent};
use super::particles;
use super::terrain::Terrain;
use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; only `start` leaves this phase
    Ended,
}

/// Visible area in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// The sled. The world scrolls under a fixed camera-relative anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Camera-relative X, never changes during a run
    pub world_x: f32,
    /// Screen Y of the sled origin (down is positive)
    pub y: f32,
    pub vertical_velocity: f32,
    /// Radians
    pub rotation: f32,
    pub grounded: bool,
}

impl Player {
    pub fn new(world_x: f32) -> Self {
        Self {
            world_x,
            y: 0.0,
            vertical_velocity: 0.0,
            rotation: 0.0,
            grounded: false,
        }
    }

    /// Position in screen space
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.world_x, self.y)
    }
}

/// Obstacle variants. Only solid ones end the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Rock
    Solid,
    /// Tree, scenery only
    Decorative,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn blocks(&self) -> bool {
        self.kind == ObstacleKind::Solid
    }
}

/// Score pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub x: f32,
    pub y: f32,
    pub symbol: String,
    pub collected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One-shot speed boost
    Speed,
    /// Timed invincibility
    Shield,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
    pub collected: bool,
}

/// Progress marker dropped every `marker_interval` of distance. Never collides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: f32,
    /// 1 for the first marker of a run
    pub ordinal: u32,
}

/// A particle for visual effects (screen space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    /// RGBA
    pub color: u32,
}

/// Caption shown above the player for a while
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    pub text: String,
    pub display_ticks_remaining: u32,
}

/// Per-run counters owned by the clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub score: u64,
    pub speed: f32,
    /// Total horizontal travel; also the camera position
    pub distance: f32,
    pub phase: GamePhase,
    pub elapsed_ticks: u64,
    pub invincible: bool,
    pub invincibility_ticks_remaining: u32,
    /// Score earned from pickups on top of distance score
    pub bonus_score: u64,
}

impl SimulationState {
    fn new(phase: GamePhase, speed: f32) -> Self {
        Self {
            score: 0,
            speed,
            distance: 0.0,
            phase,
            elapsed_ticks: 0,
            invincible: false,
            invincibility_ticks_remaining: 0,
            bonus_score: 0,
        }
    }
}

/// Complete simulation state, owned by the host and advanced by [`super::tick`]
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current RNG stream
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub sim: SimulationState,
    pub player: Player,
    pub terrain: Terrain,
    pub obstacles: Vec<Obstacle>,
    pub orbs: Vec<Orb>,
    pub powerups: Vec<PowerUp>,
    pub markers: Vec<Marker>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub thought: Option<Thought>,
    /// Tick of the most recent power-up spawn
    pub(crate) last_powerup_tick: u64,
    /// Number of markers placed this run
    pub(crate) markers_placed: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an idle game. Terrain is generated so the idle screen has a slope to show.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            sim: SimulationState::new(GamePhase::Idle, tuning.initial_speed),
            player: Player::new(tuning.player_anchor_x),
            terrain: Terrain::new(tuning.segment_width, DEFAULT_VIEWPORT_HEIGHT / 2.0),
            tuning,
            viewport: Viewport::default(),
            obstacles: Vec::new(),
            orbs: Vec::new(),
            powerups: Vec::new(),
            markers: Vec::new(),
            particles: Vec::new(),
            thought: None,
            last_powerup_tick: 0,
            markers_placed: 0,
            events: Vec::new(),
        };
        state.reset_world();
        state
    }

    /// Clear per-run state and regenerate the starting terrain, keeping the phase
    pub(crate) fn reset_world(&mut self) {
        let phase = self.sim.phase;
        self.sim = SimulationState::new(phase, self.tuning.initial_speed);
        self.player = Player::new(self.tuning.player_anchor_x);
        self.obstacles.clear();
        self.orbs.clear();
        self.powerups.clear();
        self.markers.clear();
        self.particles.clear();
        self.thought = None;
        self.last_powerup_tick = 0;
        self.markers_placed = 0;

        self.terrain = Terrain::new(self.tuning.segment_width, self.viewport.height / 2.0);
        self.terrain
            .generate_initial(&mut self.rng, &self.tuning, self.viewport);
        self.player.y = self.terrain.height_at(self.camera_x() + self.player.world_x)
            - self.tuning.sled_height;
    }

    pub fn phase(&self) -> GamePhase {
        self.sim.phase
    }

    pub fn score(&self) -> u64 {
        self.sim.score
    }

    /// World X of the left screen edge
    pub fn camera_x(&self) -> f32 {
        self.sim.distance
    }

    /// World X under the player
    pub fn player_world_x(&self) -> f32 {
        self.sim.distance + self.player.world_x
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        log::trace!("event: {:?}", event);
        self.events.push(event);
    }

    /// Take all events raised since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recompute score from distance and bonuses, announcing increases
    pub(crate) fn refresh_score(&mut self) {
        let distance_score = (self.sim.distance / self.tuning.distance_per_point).floor() as u64;
        let score = distance_score + self.sim.bonus_score;
        if score > self.sim.score {
            self.sim.score = score;
            self.push_event(GameEvent::ScoreChanged { score });
        }
    }

    /// Spawn `count` particles at a screen position
    pub fn emit_particles(&mut self, pos: Vec2, count: usize, color: u32) {
        particles::emit(
            &mut self.particles,
            &mut self.rng,
            &self.tuning,
            pos,
            count,
            color,
        );
    }

    /// End the run. Only the first call per run has any effect.
    pub(crate) fn game_over(&mut self, cause: DeathCause) {
        if self.sim.phase != GamePhase::Playing {
            return;
        }
        self.sim.phase = GamePhase::Ended;
        log::info!(
            "Run over ({:?}) score={} distance={:.0}",
            cause,
            self.sim.score,
            self.sim.distance
        );
        self.push_event(GameEvent::GameOver {
            final_score: self.sim.score,
            cause,
        });
    }
}
