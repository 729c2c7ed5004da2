//! ScriptedHost - in-memory реализация всех capability
//!
//! Ничего не симулирует сам: тест (или харнесс) двигает игроков, ставит stun,
//! решает достижимость точек. Хост только записывает, что у него попросили.

use std::collections::HashMap;

use bevy::prelude::*;

use super::{Body, CueRecorder, NetTransport, Navigation, PlayerView, RobeHost, ValuableView, WorldQuery};
use crate::components::NetId;

#[derive(Debug, Clone)]
pub struct ScriptedBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub stunned: bool,
    pub hurt_enabled: bool,
    pub hurt_damage: u32,
}

impl Body for ScriptedBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn is_stunned(&self) -> bool {
        self.stunned
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn set_hurt_enabled(&mut self, enabled: bool) {
        self.hurt_enabled = enabled;
    }

    fn set_hurt_damage(&mut self, damage: u32) {
        self.hurt_damage = damage;
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedNav {
    /// false → любой request_path проваливается
    pub reachable: bool,
    pub destination: Option<Vec3>,
    pub velocity: Vec3,
    pub path_requests: u32,
    pub resets: u32,
    /// (speed, acceleration, duration)
    pub overrides: Vec<(f32, f32, f32)>,
}

impl Default for ScriptedNav {
    fn default() -> Self {
        Self {
            reachable: true,
            destination: None,
            velocity: Vec3::ZERO,
            path_requests: 0,
            resets: 0,
            overrides: Vec::new(),
        }
    }
}

impl Navigation for ScriptedNav {
    fn request_path(&mut self, point: Vec3, _search_radius: f32) -> bool {
        self.path_requests += 1;
        if !self.reachable {
            return false;
        }
        self.destination = Some(point);
        true
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn has_path(&self) -> bool {
        self.destination.is_some()
    }

    fn reset_path(&mut self) {
        self.resets += 1;
        self.destination = None;
    }

    fn override_speed(&mut self, speed: f32, acceleration: f32, duration: f32) {
        self.overrides.push((speed, acceleration, duration));
    }
}

/// Счётчики подписки на break events одной ценности
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionLog {
    /// Активные подписки сейчас (корректно: 0 или 1)
    pub active: i32,
    pub subscribes: u32,
    pub unsubscribes: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedWorld {
    pub players: Vec<PlayerView>,
    pub valuables: Vec<ValuableView>,
    pub extraction_warning: Option<Vec3>,
    pub lifts: Vec<(NetId, Vec3)>,
    pub subscriptions: HashMap<NetId, SubscriptionLog>,
}

impl ScriptedWorld {
    pub fn player_mut(&mut self, id: NetId) -> Option<&mut PlayerView> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn valuable_mut(&mut self, id: NetId) -> Option<&mut ValuableView> {
        self.valuables.iter_mut().find(|v| v.id == id)
    }

    pub fn despawn_player(&mut self, id: NetId) {
        self.players.retain(|p| p.id != id);
    }

    pub fn despawn_valuable(&mut self, id: NetId) {
        self.valuables.retain(|v| v.id != id);
    }

    pub fn subscription(&self, id: NetId) -> SubscriptionLog {
        self.subscriptions.get(&id).copied().unwrap_or_default()
    }
}

impl WorldQuery for ScriptedWorld {
    fn player(&self, id: NetId) -> Option<PlayerView> {
        self.players.iter().find(|p| p.id == id).copied()
    }

    fn valuable(&self, id: NetId) -> Option<ValuableView> {
        self.valuables.iter().find(|v| v.id == id).copied()
    }

    fn valuables(&self) -> Vec<ValuableView> {
        self.valuables.clone()
    }

    fn extraction_warning(&self) -> Option<Vec3> {
        self.extraction_warning
    }

    fn lift_valuable(&mut self, id: NetId, force: Vec3) {
        self.lifts.push((id, force));
    }

    fn subscribe_break(&mut self, id: NetId) {
        let log = self.subscriptions.entry(id).or_default();
        log.active += 1;
        log.subscribes += 1;
    }

    fn unsubscribe_break(&mut self, id: NetId) {
        let log = self.subscriptions.entry(id).or_default();
        log.active -= 1;
        log.unsubscribes += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedNet {
    pub multiplayer: bool,
    pub outbox: Vec<Vec<u8>>,
}

impl NetTransport for ScriptedNet {
    fn is_multiplayer(&self) -> bool {
        self.multiplayer
    }

    fn broadcast(&mut self, payload: Vec<u8>) {
        self.outbox.push(payload);
    }
}

/// Все capability в одном месте
#[derive(Debug, Clone)]
pub struct ScriptedHost {
    pub body: ScriptedBody,
    pub nav: ScriptedNav,
    pub cues: CueRecorder,
    pub world: ScriptedWorld,
    pub net: ScriptedNet,
}

impl ScriptedHost {
    pub fn new(position: Vec3) -> Self {
        Self {
            body: ScriptedBody {
                position,
                rotation: Quat::IDENTITY,
                stunned: false,
                hurt_enabled: true,
                hurt_damage: 0,
            },
            nav: ScriptedNav::default(),
            cues: CueRecorder::default(),
            world: ScriptedWorld::default(),
            net: ScriptedNet::default(),
        }
    }

    pub fn multiplayer(mut self) -> Self {
        self.net.multiplayer = true;
        self
    }

    pub fn with_player(mut self, player: PlayerView) -> Self {
        self.world.players.push(player);
        self
    }

    pub fn with_valuable(mut self, valuable: ValuableView) -> Self {
        self.world.valuables.push(valuable);
        self
    }

    /// Borrow всех capability на один тик
    pub fn host(&mut self) -> RobeHost<'_> {
        RobeHost {
            body: &mut self.body,
            nav: &mut self.nav,
            presentation: &mut self.cues,
            world: &mut self.world,
            net: &mut self.net,
        }
    }

    /// Забирает всё, что контроллер отправил в сеть
    pub fn take_outbox(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.net.outbox)
    }
}
