//! Robe AI systems (ECS обвязка вокруг RobeController)

pub mod adapters;
pub mod movement;
pub mod routing;
pub mod tick;

// Re-export all systems
pub use movement::*;
pub use routing::*;
pub use tick::*;

use bevy::prelude::*;
use rand::Rng;

use crate::ai::controller::RobeController;
use crate::components::NetId;
use crate::config::RobeConfig;
use crate::replication::Authority;
use crate::DeterministicRng;

/// Spawn Robe entity (seed контроллера берётся из DeterministicRng)
///
/// Transform / NavAgent / HurtVolume добавляются через `#[require]`.
pub fn spawn_robe(
    commands: &mut Commands,
    rng: &mut DeterministicRng,
    net_id: NetId,
    authority: Authority,
    config: RobeConfig,
    position: Vec3,
) -> Entity {
    let seed: u64 = rng.rng.gen();
    crate::log(&format!(
        "🧥 Spawn Robe {:?} ({:?}) at {:?}, seed {}",
        net_id, authority, position, seed
    ));

    commands
        .spawn((
            RobeController::new(net_id, authority, config, seed),
            net_id,
            Transform::from_translation(position),
        ))
        .id()
}
