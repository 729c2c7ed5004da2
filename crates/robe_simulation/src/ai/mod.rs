//! Robe AI - behaviour controller одного сетевого существа
//!
//! Архитектура:
//! - `controller::RobeController` - FSM, один `tick(dt, host)` на fixed step
//! - `perception` / `impulses` - одно-тиковые сенсорные edges
//! - `aggression` - чистая policy "прерывать ли поведение ради погони"
//! - `valuables` - distance-gated подписка на break events
//! - `systems` - Bevy обвязка (events → callbacks → tick → steering)

use bevy::prelude::*;

pub mod aggression;
pub mod break_listeners;
pub mod controller;
pub mod events;
pub mod impulses;
pub mod movement_override;
pub mod perception;
pub mod rotation;
pub mod state;
pub mod systems;
pub mod valuables;

// Re-export основных типов
pub use break_listeners::BreakListeners;
pub use controller::RobeController;
pub use events::{InboundSync, OutboundSync, RobeCue, RobePerceptionEvent, Stimulus, ValuableBroken};
pub use perception::ContactKind;
pub use state::RobeState;
pub use systems::spawn_robe;

use crate::replication::NetSession;

/// Robe AI Plugin
///
/// Регистрирует Robe системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. deliver_inbound_sync - payload'ы authority → inbox реплик
/// 2. route_perception_events - vision / contact → impulses
/// 3. route_valuable_breaks - break events → подписанные Robe
/// 4. tick_robe_controllers - FSM тик каждого Robe
/// 5. steer_nav_agents - headless движение к destination
/// 6. forget_despawned_robes - чистка break подписок
pub struct RobeAIPlugin;

impl Plugin for RobeAIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RobePerceptionEvent>()
            .add_event::<ValuableBroken>()
            .add_event::<InboundSync>()
            .add_event::<OutboundSync>()
            .add_event::<RobeCue>()
            .init_resource::<BreakListeners>()
            .init_resource::<NetSession>()
            .add_systems(
                FixedUpdate,
                (
                    systems::deliver_inbound_sync,
                    systems::route_perception_events,
                    systems::route_valuable_breaks,
                    systems::tick_robe_controllers,
                    systems::steer_nav_agents,
                    systems::forget_despawned_robes,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}
