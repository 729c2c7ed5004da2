//! Robe AI Events - граница между хостом и ECS симуляцией
//!
//! Хост (движок, тест, харнесс) → ECS:
//! - RobePerceptionEvent: vision trigger / физический контакт
//! - ValuableBroken: ценность сломалась (доставляется подписанным Robe)
//! - InboundSync: payload от authority другого участника
//!
//! ECS → хост:
//! - OutboundSync: payload для broadcast остальным участникам
//! - RobeCue: анимация / звук / camera shake

use bevy::prelude::*;

use crate::ai::perception::ContactKind;
use crate::components::NetId;
use crate::host::Cue;

/// Что именно Robe почувствовал
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stimulus {
    /// Игрок попал в vision trigger
    Vision { player: NetId },
    /// Игрок коснулся Robe
    Contact { player: NetId, kind: ContactKind },
}

/// Сенсорика Robe от хоста
#[derive(Event, Debug, Clone)]
pub struct RobePerceptionEvent {
    /// Entity Robe (чей это sensor)
    pub observer: Entity,
    pub stimulus: Stimulus,
}

/// Ценность сломалась (impact detector хоста)
#[derive(Event, Debug, Clone, Copy)]
pub struct ValuableBroken {
    pub valuable: NetId,
}

/// Входящий sync payload (адресат - `SyncEnvelope::sender` внутри)
#[derive(Event, Debug, Clone)]
pub struct InboundSync {
    pub payload: Vec<u8>,
}

/// Исходящий sync payload (хост рассылает всем остальным участникам)
#[derive(Event, Debug, Clone)]
pub struct OutboundSync {
    pub sender: NetId,
    pub payload: Vec<u8>,
}

/// Presentation cue для хоста
#[derive(Event, Debug, Clone, Copy)]
pub struct RobeCue {
    pub entity: Entity,
    pub cue: Cue,
}
