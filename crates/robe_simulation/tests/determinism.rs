//! Тесты детерминизма
//!
//! Одинаковый seed + одинаковые входы → байт-в-байт одинаковые RobeController и Transform

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use robe_simulation::*;

const ROBE_COUNT: u32 = 4;
const TICK_COUNT: usize = 900;
const PLAYER: NetId = NetId(1);

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let snapshot1 = run_simulation(SEED);
    let snapshot2 = run_simulation(SEED);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    // Запускаем 3 раза - все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_different_seeds_diverge() {
    assert_ne!(run_simulation(1), run_simulation(2));
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64) -> (Vec<u8>, Vec<u8>) {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    app.world_mut()
        .spawn((PLAYER, PlayerStatus::default(), Transform::from_xyz(6.0, 0.0, 0.0)));
    for i in 0..3 {
        app.world_mut().spawn((
            NetId(50 + i),
            Valuable::new(1.0 + i as f32),
            Transform::from_xyz(i as f32, 0.0, 1.0),
        ));
    }

    let robes: Vec<Entity> = app.world_mut().resource_scope(|world, mut rng: Mut<DeterministicRng>| {
        let mut commands = world.commands();
        (0..ROBE_COUNT)
            .map(|i| {
                spawn_robe(
                    &mut commands,
                    &mut rng,
                    NetId(100 + i),
                    Authority::Authoritative,
                    RobeConfig::default(),
                    Vec3::new(-(i as f32) * 2.0, 0.0, 0.0),
                )
            })
            .collect()
    });
    app.world_mut().flush();

    for tick in 0..TICK_COUNT {
        // Игрок виден всем Robe, иногда толкает первого
        for robe in &robes {
            app.world_mut().send_event(RobePerceptionEvent {
                observer: *robe,
                stimulus: Stimulus::Vision { player: PLAYER },
            });
        }
        if tick % 300 == 150 {
            app.world_mut().send_event(RobePerceptionEvent {
                observer: robes[0],
                stimulus: Stimulus::Contact {
                    player: PLAYER,
                    kind: ContactKind::TouchedBody,
                },
            });
        }

        app.update();
    }

    (
        world_snapshot::<RobeController>(app.world_mut()),
        world_snapshot::<Transform>(app.world_mut()),
    )
}
