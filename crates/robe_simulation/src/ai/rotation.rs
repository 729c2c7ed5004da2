//! YawSpring - critically damped spring для поворота Robe вокруг Y
//!
//! Velocity spring'а переживает transitions (никогда не сбрасывается).

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

/// Угол в (-π, π]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Yaw, при котором forward (+Z) смотрит вдоль direction (XZ проекция)
///
/// None если direction вырожден в плоскости XZ.
pub fn yaw_from_direction(direction: Vec3) -> Option<f32> {
    let flat = Vec2::new(direction.x, direction.z);
    if flat.length_squared() < 1e-6 {
        return None;
    }
    Some(direction.x.atan2(direction.z))
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YawSpring {
    pub yaw: f32,
    pub velocity: f32,
    pub target: f32,
}

impl YawSpring {
    pub fn new(yaw: f32) -> Self {
        Self {
            yaw,
            velocity: 0.0,
            target: yaw,
        }
    }

    /// Повернуть цель так, чтобы Robe смотрел вдоль direction
    pub fn face_direction(&mut self, direction: Vec3) {
        if let Some(yaw) = yaw_from_direction(direction) {
            self.target = yaw;
        }
    }

    /// Один шаг (closed form, стабилен при любом dt)
    pub fn step(&mut self, frequency: f32, dt: f32) -> Quat {
        let offset = wrap_angle(self.yaw - self.target);
        let decay = (-frequency * dt).exp();
        let temp = (self.velocity + frequency * offset) * dt;

        let new_offset = (offset + temp) * decay;
        self.velocity = (self.velocity - frequency * temp) * decay;
        self.yaw = wrap_angle(self.target + new_offset);

        self.rotation()
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}
