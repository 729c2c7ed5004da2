//! Movement компоненты: navigation agent, speed override, walkable bounds

use bevy::prelude::*;

/// Navigation agent актора (headless аналог host NavMeshAgent)
///
/// Архитектура:
/// - Robe контроллер пишет destination / speed override через Navigation capability
/// - `steer_nav_agents` (или host navigation) двигает Transform и обновляет velocity
#[derive(Component, Debug, Clone, PartialEq)]
pub struct NavAgent {
    /// Текущая цель пути (None = пути нет)
    pub destination: Option<Vec3>,
    /// Фактическая скорость за последний шаг
    pub velocity: Vec3,
    /// Базовая скорость (m/s) без override
    pub base_speed: f32,
    /// Базовое ускорение (m/s²)
    pub base_acceleration: f32,
    /// Дистанция "дошли"
    pub arrive_distance: f32,
    pub speed_override: Option<SpeedOverride>,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            velocity: Vec3::ZERO,
            base_speed: 2.0,
            base_acceleration: 8.0,
            arrive_distance: 0.2,
            speed_override: None,
        }
    }
}

impl NavAgent {
    pub fn has_path(&self) -> bool {
        self.destination.is_some()
    }

    /// (speed, acceleration) с учётом активного override
    pub fn effective_speed(&self) -> (f32, f32) {
        match self.speed_override {
            Some(over) if over.remaining > 0.0 => (over.speed, over.acceleration),
            _ => (self.base_speed, self.base_acceleration),
        }
    }
}

/// Временный override скорости
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedOverride {
    pub speed: f32,
    pub acceleration: f32,
    /// Сколько секунд ещё действует
    pub remaining: f32,
}

/// Walkable область (AABB) для headless навигации
///
/// Нет resource → вся плоскость проходима.
#[derive(Resource, Debug, Clone, Copy)]
pub struct NavBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl NavBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Ближайшая walkable точка (по XZ)
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y,
            point.z.clamp(self.min.z, self.max.z),
        )
    }
}
