//! Headless симуляция Robe
//!
//! Один Robe, один игрок, пара ценностей. Игрок стоит в поле зрения,
//! потом толкает Robe. Печатает смену состояний.
//!
//! Usage: `robe_simulation [config.json]` (JSON override для RobeConfig)

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use robe_simulation::{
    create_headless_app, spawn_robe, Authority, ContactKind, DeterministicRng, NetId, PlayerStatus, RobeConfig,
    RobeController, RobePerceptionEvent, RobeState, SimulationPlugin, Stimulus, Valuable,
};

const PLAYER: NetId = NetId(1);
const ROBE: NetId = NetId(100);
const PUSH_AT_TICK: u32 = 600;

/// RobeConfig для демо (берётся из App, чтобы setup оставался обычной системой)
#[derive(Resource)]
struct DemoConfig(RobeConfig);

fn load_config() -> Result<RobeConfig, String> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(RobeConfig::default());
    };

    let source = std::fs::read_to_string(&path).map_err(|err| format!("{}: {}", path, err))?;
    RobeConfig::from_json(&source).map_err(|err| format!("{}: {}", path, err))
}

fn setup(mut commands: Commands, mut rng: ResMut<DeterministicRng>, config: Res<DemoConfig>) {
    commands.spawn((PLAYER, PlayerStatus::default(), Transform::from_xyz(4.0, 0.0, 0.0)));
    commands.spawn((NetId(10), Valuable::new(2.0), Transform::from_xyz(1.0, 0.0, 1.0)));
    commands.spawn((NetId(11), Valuable::new(8.0), Transform::from_xyz(-2.0, 0.0, 3.0)));

    spawn_robe(
        &mut commands,
        &mut rng,
        ROBE,
        Authority::Authoritative,
        config.0.clone(),
        Vec3::ZERO,
    );
}

fn main() {
    let seed = 42;
    println!("Starting Robe headless simulation (seed: {})", seed);

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid robe config: {}", err);
            std::process::exit(1);
        }
    };

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(DemoConfig(config))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .add_systems(Startup, setup);

    // Startup
    app.update();

    let Some(robe) = app
        .world_mut()
        .query_filtered::<Entity, With<RobeController>>()
        .iter(app.world())
        .next()
    else {
        eprintln!("Robe was not spawned");
        return;
    };

    let mut last_state = RobeState::default();

    for tick in 0..1800u32 {
        let stimulus = if tick == PUSH_AT_TICK {
            Stimulus::Contact {
                player: PLAYER,
                kind: ContactKind::TouchedBody,
            }
        } else {
            Stimulus::Vision { player: PLAYER }
        };
        app.world_mut().send_event(RobePerceptionEvent {
            observer: robe,
            stimulus,
        });

        app.update();

        let Some(controller) = app.world().get::<RobeController>(robe) else {
            break;
        };
        if controller.state() != last_state {
            println!(
                "Tick {}: {:?} → {:?} (timer {:.2}, focus {:?})",
                tick,
                last_state,
                controller.state(),
                controller.state_timer(),
                controller.focus()
            );
            last_state = controller.state();
        }
    }

    println!("Simulation complete!");
}
