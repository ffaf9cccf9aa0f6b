//! Cosmetic particles
//!
//! Particles live in screen space and never feed back into gameplay.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::tuning::Tuning;

/// RGBA colors used by the built-in effects
pub mod colors {
    pub const SNOW: u32 = 0xffff_ffff;
    pub const TRAIL: u32 = 0xffff_ff80;
    pub const ORB: u32 = 0x00ff_00ff;
    pub const SPEED: u32 = 0xfbbf_24ff;
    pub const SHIELD: u32 = 0x3b82_f6ff;
}

/// Spawn up to `count` particles at `pos` with small random velocities.
/// Stops early once `tuning.max_particles` are alive.
pub fn emit<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    tuning: &Tuning,
    pos: Vec2,
    count: usize,
    color: u32,
) {
    let room = tuning.max_particles.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
        let vel = jitter * tuning.particle_spread;
        particles.push(Particle {
            pos,
            vel,
            life: 1.0,
            color,
        });
    }
}

/// Move and fade every particle, dropping dead ones
pub fn advance(particles: &mut Vec<Particle>, decay: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= decay;
    }
    particles.retain(|p| p.life > 0.0);
}
