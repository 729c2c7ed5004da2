//! ECS адаптеры host capabilities
//!
//! Живут ровно один тик одного Robe: borrow компонентов + snapshot мира.
//! Мир (игроки, ценности) снимается один раз на тик до цикла по Robe.

use bevy::prelude::*;

use crate::ai::break_listeners::BreakListeners;
use crate::components::{HurtVolume, NavAgent, NavBounds, NetId, SpeedOverride};
use crate::host::{Body, NetTransport, Navigation, PlayerView, ValuableView, WorldQuery};

pub struct EcsBody<'a> {
    pub transform: &'a mut Transform,
    pub hurt: &'a mut HurtVolume,
    pub stunned: bool,
}

impl Body for EcsBody<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn is_stunned(&self) -> bool {
        self.stunned
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn set_hurt_enabled(&mut self, enabled: bool) {
        self.hurt.enabled = enabled;
    }

    fn set_hurt_damage(&mut self, damage: u32) {
        self.hurt.player_damage = damage;
    }
}

/// NavAgent + опциональные walkable bounds
pub struct EcsNavigation<'a> {
    pub agent: &'a mut NavAgent,
    pub bounds: Option<NavBounds>,
}

impl Navigation for EcsNavigation<'_> {
    /// Ближайшая walkable точка; дальше `search_radius` от запрошенной → недостижимо
    fn request_path(&mut self, point: Vec3, search_radius: f32) -> bool {
        let navigable = match self.bounds {
            Some(bounds) => bounds.clamp(point),
            None => point,
        };
        if navigable.distance(point) > search_radius {
            return false;
        }
        self.agent.destination = Some(navigable);
        true
    }

    fn velocity(&self) -> Vec3 {
        self.agent.velocity
    }

    fn has_path(&self) -> bool {
        self.agent.has_path()
    }

    fn reset_path(&mut self) {
        self.agent.destination = None;
    }

    fn override_speed(&mut self, speed: f32, acceleration: f32, duration: f32) {
        self.agent.speed_override = Some(SpeedOverride {
            speed,
            acceleration,
            remaining: duration,
        });
    }
}

/// Snapshot мира глазами одного Robe
pub struct EcsWorld<'a> {
    pub robe: Entity,
    pub players: &'a [PlayerView],
    pub valuables: &'a [ValuableView],
    pub extraction_warning: Option<Vec3>,
    pub listeners: &'a mut BreakListeners,
    /// Lift силы копятся и применяются к Valuable после цикла по Robe
    pub lifts: &'a mut Vec<(NetId, Vec3)>,
}

impl WorldQuery for EcsWorld<'_> {
    fn player(&self, id: NetId) -> Option<PlayerView> {
        self.players.iter().find(|p| p.id == id).copied()
    }

    fn valuable(&self, id: NetId) -> Option<ValuableView> {
        self.valuables.iter().find(|v| v.id == id).copied()
    }

    fn valuables(&self) -> Vec<ValuableView> {
        self.valuables.to_vec()
    }

    fn extraction_warning(&self) -> Option<Vec3> {
        self.extraction_warning
    }

    fn lift_valuable(&mut self, id: NetId, force: Vec3) {
        self.lifts.push((id, force));
    }

    fn subscribe_break(&mut self, id: NetId) {
        self.listeners.subscribe(id, self.robe);
    }

    fn unsubscribe_break(&mut self, id: NetId) {
        self.listeners.unsubscribe(id, self.robe);
    }
}

/// Буфер исходящих payload'ов (становятся OutboundSync events)
#[derive(Debug, Default)]
pub struct EcsNet {
    pub multiplayer: bool,
    pub outbox: Vec<Vec<u8>>,
}

impl NetTransport for EcsNet {
    fn is_multiplayer(&self) -> bool {
        self.multiplayer
    }

    fn broadcast(&mut self, payload: Vec<u8>) {
        self.outbox.push(payload);
    }
}
