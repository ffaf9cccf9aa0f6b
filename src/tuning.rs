//! Game balance values
//!
//! Every constant the simulation uses lives here so hosts can ship a JSON
//! override. Defaults assume [`crate::consts::TICK_RATE`] ticks per second
//! and screen coordinates with Y pointing down.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::secs_to_ticks;

/// Data-driven balance for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity applied by a jump (negative is up)
    pub jump_impulse: f32,
    pub initial_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Speed change per unit of ground slope while grounded
    pub slope_influence: f32,
    /// Radians per tick of tumble while airborne
    pub air_spin: f32,
    /// Fixed camera-relative X of the player
    pub player_anchor_x: f32,
    /// Distance from the sled origin down to the runners
    pub sled_height: f32,
    /// Snap-to-ground tolerance above the surface
    pub ground_margin: f32,
    /// Falling within this many pixels of the viewport bottom ends the run
    pub floor_margin: f32,
    /// Distance units per score point
    pub distance_per_point: f32,

    // === Terrain ===
    pub segment_width: f32,
    pub initial_height_frac: f32,
    pub min_height_frac: f32,
    pub max_height_frac: f32,
    /// Full width of the random walk for the starting stretch
    pub initial_height_step: f32,
    /// Full width of the random walk for points appended during play
    pub height_step: f32,
    /// Pre-generated terrain beyond the right edge at start
    pub initial_lookahead: f32,
    /// Terrain kept generated beyond the right edge during play
    pub lookahead: f32,
    /// Screen X below which terrain and entities are retired
    pub eviction_x: f32,

    // === Spawning ===
    pub obstacle_chance: f32,
    pub obstacle_unlock_distance: f32,
    pub min_obstacle_spacing: f32,
    pub powerup_chance: f32,
    pub powerup_unlock_distance: f32,
    pub powerup_cooldown_ticks: u32,
    /// Probability a spawned power-up is the speed kind
    pub speed_powerup_weight: f32,
    /// Height of power-ups above the terrain
    pub powerup_lift: f32,
    pub orb_chance: f32,
    pub orb_unlock_distance: f32,
    /// Orbs float between `orb_min_lift` and `orb_min_lift + orb_lift_band` above the terrain
    pub orb_min_lift: f32,
    pub orb_lift_band: f32,
    pub marker_interval: f32,

    // === Collisions and effects ===
    pub obstacle_half_width: f32,
    pub obstacle_half_height: f32,
    /// Obstacle collision centre sits this far above the terrain at its X
    pub obstacle_top_offset: f32,
    pub pickup_radius: f32,
    pub orb_bonus: u64,
    pub speed_boost: f32,
    pub shield_ticks: u32,

    // === Cosmetics ===
    pub particle_spread: f32,
    pub particle_decay: f32,
    pub max_particles: usize,
    /// Snow trail appears above this speed while grounded
    pub trail_speed: f32,
    pub thought_interval_ticks: u32,
    pub thought_display_ticks: u32,
    /// Day/night cycle angular rate per tick
    pub day_night_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_impulse: -12.5,
            initial_speed: 5.0,
            min_speed: 4.0,
            max_speed: 12.0,
            slope_influence: 0.15,
            air_spin: 0.02,
            player_anchor_x: 200.0,
            sled_height: 15.0,
            ground_margin: 5.0,
            floor_margin: 50.0,
            distance_per_point: 10.0,

            segment_width: 60.0,
            initial_height_frac: 0.75,
            min_height_frac: 0.5,
            max_height_frac: 0.9,
            initial_height_step: 60.0,
            height_step: 90.0,
            initial_lookahead: 1200.0,
            lookahead: 400.0,
            eviction_x: -100.0,

            obstacle_chance: 0.15,
            obstacle_unlock_distance: 300.0,
            min_obstacle_spacing: 400.0,
            powerup_chance: 0.025,
            powerup_unlock_distance: 800.0,
            powerup_cooldown_ticks: secs_to_ticks(5),
            speed_powerup_weight: 2.0 / 3.0,
            powerup_lift: 100.0,
            orb_chance: 0.08,
            orb_unlock_distance: 500.0,
            orb_min_lift: 80.0,
            orb_lift_band: 100.0,
            marker_interval: 2500.0,

            obstacle_half_width: 30.0,
            obstacle_half_height: 30.0,
            obstacle_top_offset: 10.0,
            pickup_radius: 40.0,
            orb_bonus: 50,
            speed_boost: 3.5,
            shield_ticks: secs_to_ticks(5),

            particle_spread: 5.0,
            particle_decay: 0.02,
            max_particles: 512,
            trail_speed: 8.0,
            thought_interval_ticks: secs_to_ticks(10),
            thought_display_ticks: secs_to_ticks(4),
            day_night_rate: 0.001,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning = serde_json::from_str(json)?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Lowest terrain height (screen Y) allowed for a viewport height
    pub fn min_height(&self, viewport_height: f32) -> f32 {
        self.min_height_frac * viewport_height
    }

    /// Highest terrain height (screen Y) allowed for a viewport height
    pub fn max_height(&self, viewport_height: f32) -> f32 {
        self.max_height_frac * viewport_height
    }

    /// Level terrain and no random spawns, for exact placement in tests
    #[cfg(test)]
    pub(crate) fn flat_world() -> Self {
        Self {
            initial_height_step: 0.0,
            height_step: 0.0,
            obstacle_chance: 0.0,
            powerup_chance: 0.0,
            orb_chance: 0.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1.5, "orb_bonus": 75 }"#).unwrap();
        assert_eq!(tuning.gravity, 1.5);
        assert_eq!(tuning.orb_bonus, 75);
        assert_eq!(tuning.segment_width, Tuning::default().segment_width);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ gravity: ").is_err());
        assert!(Tuning::from_json(r#"{ "gravity": "heavy" }"#).is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let tuning = Tuning::load(Some(Path::new("/nonexistent/holly-tuning.json")));
        assert_eq!(tuning, Tuning::default());
        assert_eq!(Tuning::load(None), Tuning::default());
    }

    #[test]
    fn test_height_bounds() {
        let tuning = Tuning::default();
        assert_eq!(tuning.min_height(600.0), 300.0);
        assert_eq!(tuning.max_height(600.0), 540.0);
    }

    #[test]
    fn test_default_timers_use_tick_rate() {
        let tuning = Tuning::default();
        assert_eq!(tuning.powerup_cooldown_ticks, 300);
        assert_eq!(tuning.shield_ticks, 300);
        assert_eq!(tuning.thought_display_ticks, 240);
    }
}
