//! Robe Simulation Core
//!
//! Behaviour controller сетевого существа "Robe" на Bevy 0.16 ECS.
//!
//! Слои:
//! - `ai::controller::RobeController` - host-agnostic FSM (`tick(dt, &mut RobeHost)`)
//! - `host` - порты в хост (body / navigation / presentation / world / net)
//! - `replication` - authority → replica протокол (SetState / SyncFields)
//! - `ai::systems` - Bevy обвязка: events → callbacks → tick → steering

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod components;
pub mod config;
pub mod error;
pub mod host;
pub mod logger;
pub mod random;
pub mod replication;

// Re-export базовых типов для удобства
pub use ai::{
    spawn_robe, BreakListeners, ContactKind, InboundSync, OutboundSync, RobeAIPlugin, RobeController, RobeCue,
    RobePerceptionEvent, RobeState, Stimulus, ValuableBroken,
};
pub use components::*;
pub use config::RobeConfig;
pub use error::{ConfigError, SyncError};
pub use logger::{
    init_logger, log, log_error, log_info, log_level, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use replication::{Authority, NetSession, SyncEnvelope, SyncMessage};

/// Главный plugin симуляции
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // create_headless_app мог уже положить RNG со своим seed
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins(RobeAIPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Из него берутся seed'ы контроллеров при spawn, дальше каждый Robe живёт на своём ChaCha8.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot компонента по всем entity (для сравнения детерминизма двух прогонов)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
