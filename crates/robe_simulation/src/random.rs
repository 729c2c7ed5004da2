//! Random helpers поверх seeded RNG контроллера
//!
//! `Span` - диапазон float (длительность, distance band).
//! Sampling всегда через переданный rng, без thread_rng (детерминизм).

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Замкнутый диапазон [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Вырожденный диапазон (фиксированная длительность)
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Uniform sample, обе границы включены
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    /// min <= value <= max
    pub fn contains(&self, value: f32) -> bool {
        self.min <= value && value <= self.max
    }

    /// min < value < max
    pub fn contains_exclusive(&self, value: f32) -> bool {
        self.min < value && value < self.max
    }
}

/// Равномерная точка внутри единичного шара (rejection sampling)
pub fn random_in_ball<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}

/// Равномерная точка на единичной сфере
pub fn random_on_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = random_in_ball(rng);
        let length = candidate.length();
        if length > 1e-3 {
            return candidate / length;
        }
    }
}
