//! Routing систем: events хоста → callbacks конкретного RobeController
//!
//! Всё здесь только записывает impulses / буферизует sync. Решения принимаются
//! позже в том же FixedUpdate (`tick_robe_controllers`).

use bevy::prelude::*;

use crate::ai::break_listeners::BreakListeners;
use crate::ai::controller::RobeController;
use crate::ai::events::{InboundSync, RobePerceptionEvent, Stimulus, ValuableBroken};
use crate::replication::SyncEnvelope;

/// Система: InboundSync → inbox реплики (адресат по `SyncEnvelope::sender`)
///
/// Битые / чужие / не той версии payload'ы логируются и отбрасываются.
pub fn deliver_inbound_sync(mut inbound: EventReader<InboundSync>, mut robes: Query<&mut RobeController>) {
    for event in inbound.read() {
        let envelope = match SyncEnvelope::decode(&event.payload) {
            Ok(envelope) => envelope,
            Err(err) => {
                crate::log_warning(&format!("⚠️ InboundSync dropped: {}", err));
                continue;
            }
        };

        let Some(mut robe) = robes.iter_mut().find(|robe| robe.net_id() == envelope.sender) else {
            crate::log_warning(&format!("⚠️ InboundSync for unknown robe {:?}", envelope.sender));
            continue;
        };

        if let Err(err) = robe.receive_envelope(envelope) {
            crate::log_warning(&format!("⚠️ InboundSync rejected: {}", err));
        }
    }
}

/// Система: vision / contact → impulses Robe
pub fn route_perception_events(mut events: EventReader<RobePerceptionEvent>, mut robes: Query<&mut RobeController>) {
    for event in events.read() {
        let Ok(mut robe) = robes.get_mut(event.observer) else {
            continue;
        };

        match event.stimulus {
            Stimulus::Vision { player } => robe.on_vision(player),
            Stimulus::Contact { player, kind } => {
                crate::log(&format!("🤚 Robe {:?} touched by {:?} ({:?})", robe.net_id(), player, kind));
                robe.on_contact(player, kind);
            }
        }
    }
}

/// Система: ValuableBroken → подписанные Robe
pub fn route_valuable_breaks(
    mut breaks: EventReader<ValuableBroken>,
    listeners: Res<BreakListeners>,
    mut robes: Query<&mut RobeController>,
) {
    for event in breaks.read() {
        for robe_entity in listeners.listeners(event.valuable) {
            if let Ok(mut robe) = robes.get_mut(robe_entity) {
                crate::log(&format!("💥 Robe {:?}: valuable {:?} broke nearby", robe.net_id(), event.valuable));
                robe.on_object_broken(event.valuable);
            }
        }
    }
}

/// Система: despawned Robe больше не слушает break events
pub fn forget_despawned_robes(mut removed: RemovedComponents<RobeController>, mut listeners: ResMut<BreakListeners>) {
    for entity in removed.read() {
        listeners.forget_robe(entity);
    }
}
