//! Host capabilities - узкие интерфейсы к внешним подсистемам
//!
//! Контроллер Robe не знает про движок: pathfinding, физика, анимация, звук и
//! сеть доступны только через эти trait'ы. Адаптеры резолвятся один раз (ECS
//! system / ScriptedHost) и передаются в `RobeController::tick` через `RobeHost`.
//!
//! Реализации:
//! - `crate::ai::systems` - Bevy ECS адаптеры (Transform, NavAgent, events)
//! - `scripted::ScriptedHost` - in-memory хост для тестов и headless харнессов

use bevy::prelude::*;

use crate::components::{HeldObject, NetId};

pub mod cues;
pub mod scripted;

pub use cues::{AnimationCue, AnimationFlag, CameraShake, Cue, CueRecorder, LoopCue, ShakeKind, SoundCue};

/// Тело Robe: позиция, stun, поворот, hurt volume
pub trait Body {
    fn position(&self) -> Vec3;
    /// Внешнее прерывание (stun) - AI пропускает тик целиком
    fn is_stunned(&self) -> bool;
    fn set_rotation(&mut self, rotation: Quat);
    fn set_hurt_enabled(&mut self, enabled: bool);
    fn set_hurt_damage(&mut self, damage: u32);
}

/// Pathfinding / movement capability
pub trait Navigation {
    /// Ищет навигируемую точку не дальше `search_radius` от `point` и ставит её целью.
    /// `false` = недостижимо (soft failure, контроллер повторит на следующем тике).
    fn request_path(&mut self, point: Vec3, search_radius: f32) -> bool;
    fn velocity(&self) -> Vec3;
    fn has_path(&self) -> bool;
    fn reset_path(&mut self);
    fn override_speed(&mut self, speed: f32, acceleration: f32, duration: f32);
}

/// Анимация, звук, camera shake - fire-and-forget
pub trait Presentation {
    fn trigger_animation(&mut self, cue: AnimationCue);
    fn set_animation_flag(&mut self, flag: AnimationFlag, value: bool);
    fn play_sound(&mut self, cue: SoundCue, position: Vec3);
    fn set_sound_loop(&mut self, cue: LoopCue, playing: bool);
    fn camera_shake(&mut self, origin: Vec3, shake: CameraShake);
}

/// Игрок глазами AI (snapshot на момент запроса)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub id: NetId,
    pub position: Vec3,
    pub crawling: bool,
    pub held: Option<HeldObject>,
}

impl PlayerView {
    pub fn new(id: NetId, position: Vec3) -> Self {
        Self {
            id,
            position,
            crawling: false,
            held: None,
        }
    }

    /// NetId ценности в руках игрока (если держит ценность)
    pub fn held_valuable(&self) -> Option<NetId> {
        self.held.and_then(|held| held.valuable)
    }
}

/// Ценность глазами AI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuableView {
    pub id: NetId,
    pub position: Vec3,
    pub mass: f32,
}

/// Запросы к миру + подписки на break events
pub trait WorldQuery {
    /// None = despawned / неизвестен (нормальный исход, не ошибка)
    fn player(&self, id: NetId) -> Option<PlayerView>;
    fn valuable(&self, id: NetId) -> Option<ValuableView>;
    fn valuables(&self) -> Vec<ValuableView>;
    /// Позиция extraction point в состоянии warning (если есть)
    fn extraction_warning(&self) -> Option<Vec3>;
    fn lift_valuable(&mut self, id: NetId, force: Vec3);
    fn subscribe_break(&mut self, id: NetId);
    fn unsubscribe_break(&mut self, id: NetId);
}

/// Сетевой транспорт (fire-and-forget broadcast всем остальным участникам)
pub trait NetTransport {
    /// false = single-player, сеть инертна
    fn is_multiplayer(&self) -> bool;
    fn broadcast(&mut self, payload: Vec<u8>);
}

/// Набор capability на один тик
pub struct RobeHost<'a> {
    pub body: &'a mut dyn Body,
    pub nav: &'a mut dyn Navigation,
    pub presentation: &'a mut dyn Presentation,
    pub world: &'a mut dyn WorldQuery,
    pub net: &'a mut dyn NetTransport,
}
