//! Holly Knight - a sled endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! Drawing, audio and the frame loop live in the host. The host calls
//! [`sim::tick`] once per frame and reads [`sim::Snapshot`] afterwards.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (all tick-denominated tuning assumes this rate)
    pub const TICK_RATE: u32 = 60;

    /// Default viewport used before the host reports a real size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
}

/// Convert a duration in seconds to whole ticks
#[inline]
pub const fn secs_to_ticks(secs: u32) -> u32 {
    secs * consts::TICK_RATE
}

/// Camera-relative X of something placed at `absolute_x`
#[inline]
pub fn screen_x(absolute_x: f32, distance: f32) -> f32 {
    absolute_x - distance
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
