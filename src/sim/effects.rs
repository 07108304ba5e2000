//! Particles and pop-up comic words
//!
//! Purely cosmetic, but spawned from the round RNG so replays match.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Tint;

/// Comic words shown on a smash
pub const SMASH_WORDS: [&str; 6] = ["BONK!", "POW!", "SMASH!", "WHACK!", "BAM!", "ZAP!"];

/// Particle outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleShape {
    Circle,
    Square,
    Triangle,
    Star,
}

impl ParticleShape {
    pub const ALL: [ParticleShape; 4] = [
        ParticleShape::Circle,
        ParticleShape::Square,
        ParticleShape::Triangle,
        ParticleShape::Star,
    ];
}

/// A confetti particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at birth, culled at 0
    pub life: f32,
    pub tint: Tint,
    pub size: f32,
    pub shape: ParticleShape,
    pub rotation: f32,
    pub rot_speed: f32,
}

impl Particle {
    /// Spawn one particle flying away from `pos` in a random direction
    pub fn spawn(rng: &mut impl Rng, pos: Vec2, base: Tint) -> Self {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = rng.random::<f32>() * 6.0 + 2.0;
        let size = rng.random::<f32>() * 10.0 + 4.0;
        let rotation = rng.random::<f32>() * std::f32::consts::TAU;
        let rot_speed = (rng.random::<f32>() - 0.5) * 0.4;

        // Sprinkle white and gold into every burst
        let roll = rng.random::<f32>();
        let tint = if roll < 0.15 {
            Tint::White
        } else if roll < 0.3 {
            Tint::Gold
        } else {
            base
        };
        let shape = ParticleShape::ALL[rng.random_range(0..ParticleShape::ALL.len())];

        Self {
            pos,
            vel: crate::direction(angle) * speed,
            life: 1.0,
            tint,
            size,
            shape,
            rotation,
            rot_speed,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += 0.1;
        self.rotation += self.rot_speed;
        self.life -= 0.025;
    }
}

/// Push `count` particles bursting from `pos`
pub fn burst(particles: &mut Vec<Particle>, rng: &mut impl Rng, pos: Vec2, base: Tint, count: usize) {
    particles.reserve(count);
    for _ in 0..count {
        particles.push(Particle::spawn(rng, pos, base));
    }
}

/// Floating comic text ("BONK!", "MISSION COMPLETE!")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopText {
    pub pos: Vec2,
    pub vy: f32,
    pub text: String,
    pub tint: Tint,
    /// Font size in pixels
    pub size: f32,
    pub life: f32,
}

impl PopText {
    pub fn new(pos: Vec2, text: impl Into<String>, tint: Tint, size: f32) -> Self {
        Self {
            pos,
            vy: -3.0,
            text: text.into(),
            tint,
            size,
            life: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.vy;
        self.vy *= 0.95;
        self.life -= 0.02;
    }

    /// Text grows as it fades
    pub fn scale(&self) -> f32 {
        1.0 + (1.0 - self.life) * 0.5
    }
}

/// Age particles and texts, dropping the dead ones
pub fn update_effects(particles: &mut Vec<Particle>, pop_texts: &mut Vec<PopText>) {
    for particle in particles.iter_mut() {
        particle.update();
    }
    particles.retain(|p| p.life > 0.0);

    for text in pop_texts.iter_mut() {
        text.update();
    }
    pop_texts.retain(|t| t.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_expires_after_forty_ticks() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        let mut texts = Vec::new();
        burst(&mut particles, &mut rng, Vec2::new(100.0, 100.0), Tint::Sky, 15);
        assert_eq!(particles.len(), 15);

        for _ in 0..39 {
            update_effects(&mut particles, &mut texts);
        }
        assert_eq!(particles.len(), 15);
        for _ in 0..2 {
            update_effects(&mut particles, &mut texts);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_particle_speed_range() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, Vec2::ZERO, Tint::Ember);
            let speed = p.vel.length();
            assert!((2.0 - 1e-3..=8.0 + 1e-3).contains(&speed));
            assert!((4.0..=14.0).contains(&p.size));
        }
    }

    #[test]
    fn test_pop_text_rises_and_fades() {
        let mut text = PopText::new(Vec2::new(50.0, 200.0), "POW!", Tint::Gold, 50.0);
        text.update();
        assert!(text.pos.y < 200.0);
        assert!(text.scale() > 1.0);

        let mut texts = vec![text];
        let mut particles = Vec::new();
        for _ in 0..60 {
            update_effects(&mut particles, &mut texts);
        }
        assert!(texts.is_empty());
    }
}
