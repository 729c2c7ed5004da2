//! Robe integration test
//!
//! Полный Bevy App (SimulationPlugin + RobeAIPlugin), headless, manual time.
//!
//! Проверяем:
//! - perception events → FSM → presentation cues
//! - authority App → OutboundSync → InboundSync → replica App
//! - distance-gated break подписки и их доставка
//! - lift силы HelpPlayer попадают в Valuable
//! - despawn чистит подписки

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use robe_simulation::host::{AnimationCue, Cue, LoopCue};
use robe_simulation::*;

const ROBE: NetId = NetId(100);
const PLAYER: NetId = NetId(1);
const NEAR_VALUABLE: NetId = NetId(50);
const FAR_VALUABLE: NetId = NetId(51);

/// Все RobeCue, которые видел App (events живут только два update)
#[derive(Resource, Default)]
struct CueLog(Vec<RobeCue>);

fn collect_cues(mut cues: EventReader<RobeCue>, mut log: ResMut<CueLog>) {
    log.0.extend(cues.read().copied());
}

/// Helper: headless App с Robe AI и ручным временем (1 update ≈ 1 fixed step)
fn create_robe_app(seed: u64, multiplayer: bool) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(NetSession { multiplayer })
        .init_resource::<CueLog>()
        .add_systems(Update, collect_cues);
    app
}

/// Helper: spawn Robe (seed из DeterministicRng App'а)
fn spawn_robe_in(app: &mut App, authority: Authority, position: Vec3) -> Entity {
    let entity = app.world_mut().resource_scope(|world, mut rng: Mut<DeterministicRng>| {
        spawn_robe(
            &mut world.commands(),
            &mut rng,
            ROBE,
            authority,
            RobeConfig::default(),
            position,
        )
    });
    app.world_mut().flush();
    entity
}

fn spawn_player_in(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((PLAYER, PlayerStatus::default(), Transform::from_translation(position)))
        .id()
}

fn see(app: &mut App, robe: Entity) {
    app.world_mut().send_event(RobePerceptionEvent {
        observer: robe,
        stimulus: Stimulus::Vision { player: PLAYER },
    });
}

fn touch(app: &mut App, robe: Entity) {
    app.world_mut().send_event(RobePerceptionEvent {
        observer: robe,
        stimulus: Stimulus::Contact {
            player: PLAYER,
            kind: ContactKind::TouchedBody,
        },
    });
}

/// Погоня в любой фазе (wind-up, chase, атаки)
fn is_hunting(state: RobeState) -> bool {
    matches!(
        state,
        RobeState::ChaseBegin
            | RobeState::Chase
            | RobeState::Attack
            | RobeState::AttackUnderBegin
            | RobeState::AttackUnder
    )
}

fn controller(app: &App, robe: Entity) -> &RobeController {
    app.world().get::<RobeController>(robe).expect("robe controller")
}

/// Всё, что authority разослал, доставляется реплике
fn forward(from: &mut App, to: &mut App) -> usize {
    let payloads: Vec<Vec<u8>> = from
        .world_mut()
        .resource_mut::<Events<OutboundSync>>()
        .drain()
        .map(|event| event.payload)
        .collect();

    let count = payloads.len();
    for payload in payloads {
        to.world_mut().send_event(InboundSync { payload });
    }
    count
}

#[test]
fn test_spawned_robe_has_required_components() {
    let mut app = create_robe_app(42, false);
    let robe = spawn_robe_in(&mut app, Authority::Authoritative, Vec3::new(1.0, 0.0, 2.0));

    let world = app.world();
    assert!(world.get::<NavAgent>(robe).is_some());
    assert!(world.get::<HurtVolume>(robe).is_some());
    assert_eq!(world.get::<NetId>(robe), Some(&ROBE));
    assert_eq!(
        world.get::<Transform>(robe).map(|t| t.translation),
        Some(Vec3::new(1.0, 0.0, 2.0))
    );
    assert_eq!(controller(&app, robe).state(), RobeState::Idle);
}

#[test]
fn test_touch_starts_chase_with_attack_cues() {
    let mut app = create_robe_app(42, false);
    let robe = spawn_robe_in(&mut app, Authority::Authoritative, Vec3::ZERO);
    spawn_player_in(&mut app, Vec3::new(1.0, 0.0, 0.0));

    for _ in 0..5 {
        app.update();
    }

    touch(&mut app, robe);
    for _ in 0..3 {
        app.update();
    }

    let robe_state = controller(&app, robe);
    assert!(is_hunting(robe_state.state()), "touch → погоня, got {:?}", robe_state.state());
    assert_eq!(robe_state.focus(), Some(PLAYER));

    let cues = &app.world().resource::<CueLog>().0;
    assert!(cues
        .iter()
        .any(|c| c.entity == robe && c.cue == Cue::Animation(AnimationCue::Attack)));

    // Single-player: в сеть ничего не уходит
    assert!(app.world().resource::<Events<OutboundSync>>().is_empty());
}

#[test]
fn test_replica_app_follows_authority_app() {
    let mut authority_app = create_robe_app(1, true);
    let mut replica_app = create_robe_app(2, true);

    let authority_robe = spawn_robe_in(&mut authority_app, Authority::Authoritative, Vec3::ZERO);
    let replica_robe = spawn_robe_in(&mut replica_app, Authority::Replica, Vec3::ZERO);
    spawn_player_in(&mut authority_app, Vec3::new(1.0, 0.0, 0.0));
    spawn_player_in(&mut replica_app, Vec3::new(1.0, 0.0, 0.0));

    let mut forwarded = 0;
    let mut replica_hunted = false;
    for tick in 0..240 {
        if tick == 30 {
            touch(&mut authority_app, authority_robe);
            // Реплика тоже "чувствует" касание, но решать ей нельзя
            touch(&mut replica_app, replica_robe);
        }
        authority_app.update();
        forwarded += forward(&mut authority_app, &mut replica_app);
        replica_app.update();
        replica_hunted |= is_hunting(controller(&replica_app, replica_robe).state());
    }

    // Догоняем последние сообщения
    for _ in 0..3 {
        replica_app.update();
    }

    assert!(forwarded > 0, "authority должен рассылать SetState/SyncFields");
    assert!(replica_hunted, "реплика проигрывает погоню authority");

    let authority = controller(&authority_app, authority_robe);
    let replica = controller(&replica_app, replica_robe);
    assert_eq!(replica.state(), authority.state());
    assert_eq!(replica.focus(), authority.focus());

    // Реплика сама ничего не рассылает
    assert_eq!(forward(&mut replica_app, &mut authority_app), 0);
}

#[test]
fn test_garbage_inbound_sync_is_dropped() {
    let mut app = create_robe_app(42, true);
    let robe = spawn_robe_in(&mut app, Authority::Replica, Vec3::ZERO);

    app.world_mut().send_event(InboundSync {
        payload: vec![0xde, 0xad],
    });
    for _ in 0..3 {
        app.update();
    }

    assert_eq!(controller(&app, robe).state(), RobeState::Idle);
    assert!(!controller(&app, robe).has_pending_state());
}

#[test]
fn test_break_subscriptions_are_distance_gated() {
    let mut app = create_robe_app(42, false);
    let robe = spawn_robe_in(&mut app, Authority::Authoritative, Vec3::ZERO);
    app.world_mut()
        .spawn((NEAR_VALUABLE, Valuable::new(2.0), Transform::from_xyz(0.5, 0.0, 0.5)));
    app.world_mut()
        .spawn((FAR_VALUABLE, Valuable::new(2.0), Transform::from_xyz(20.0, 0.0, 0.0)));

    for _ in 0..5 {
        app.update();
    }

    let listeners = app.world().resource::<BreakListeners>();
    assert!(listeners.is_listening(NEAR_VALUABLE, robe));
    assert!(!listeners.is_listening(FAR_VALUABLE, robe));
    assert!(controller(&app, robe).is_tracking_valuable(NEAR_VALUABLE));

    // Despawn → подписки забыты
    app.world_mut().despawn(robe);
    app.update();
    let listeners = app.world().resource::<BreakListeners>();
    assert!(listeners.listeners(NEAR_VALUABLE).is_empty());
}

#[test]
fn test_despawned_valuable_drops_break_listener() {
    let mut app = create_robe_app(42, false);
    let robe = spawn_robe_in(&mut app, Authority::Authoritative, Vec3::ZERO);
    let valuable = app
        .world_mut()
        .spawn((NEAR_VALUABLE, Valuable::new(2.0), Transform::from_xyz(1.0, 0.0, 0.0)))
        .id();

    for _ in 0..5 {
        app.update();
    }
    assert!(app.world().resource::<BreakListeners>().is_listening(NEAR_VALUABLE, robe));

    app.world_mut().despawn(valuable);
    // Следующий refresh (раз в секунду) замечает пропажу
    for _ in 0..180 {
        app.update();
    }

    assert!(!controller(&app, robe).is_tracking_valuable(NEAR_VALUABLE));
    let listeners = app.world().resource::<BreakListeners>();
    assert!(!listeners.is_listening(NEAR_VALUABLE, robe));
    assert!(listeners.listeners(NEAR_VALUABLE).is_empty());
}

#[test]
fn test_nearby_break_provokes_chase_on_focus() {
    let mut app = create_robe_app(42, false);
    let robe = spawn_robe_in(&mut app, Authority::Authoritative, Vec3::ZERO);
    spawn_player_in(&mut app, Vec3::new(4.0, 0.0, 0.0));
    app.world_mut()
        .spawn((NEAR_VALUABLE, Valuable::new(2.0), Transform::from_xyz(0.5, 0.0, 0.5)));

    for _ in 0..30 {
        see(&mut app, robe);
        app.update();
    }

    assert_eq!(controller(&app, robe).focus(), Some(PLAYER));
    assert!(!is_hunting(controller(&app, robe).state()));

    app.world_mut().send_event(ValuableBroken {
        valuable: NEAR_VALUABLE,
    });
    for _ in 0..2 {
        see(&mut app, robe);
        app.update();
    }

    assert!(is_hunting(controller(&app, robe).state()));
}

#[test]
fn test_help_player_lifts_held_valuable() {
    let mut app = create_robe_app(42, false);
    let robe = spawn_robe_in(&mut app, Authority::Authoritative, Vec3::ZERO);
    app.world_mut()
        .spawn((NEAR_VALUABLE, Valuable::new(2.0), Transform::from_xyz(2.0, 0.0, 0.0)));
    app.world_mut().spawn((
        PLAYER,
        PlayerStatus {
            crawling: false,
            held: Some(HeldObject {
                valuable: Some(NEAR_VALUABLE),
                item: None,
            }),
        },
        Transform::from_xyz(3.0, 0.0, 0.0),
    ));

    let mut helped = false;
    for _ in 0..240 {
        see(&mut app, robe);
        app.update();
        if controller(&app, robe).state() == RobeState::HelpPlayer {
            helped = true;
            break;
        }
    }
    assert!(helped, "Robe должен помочь игроку с ценностью");
    assert_eq!(controller(&app, robe).target_valuable(), Some(NEAR_VALUABLE));

    for _ in 0..5 {
        see(&mut app, robe);
        app.update();
    }

    let mut valuables = app.world_mut().query::<(&NetId, &Valuable)>();
    let (_, valuable) = valuables
        .iter(app.world())
        .find(|(id, _)| **id == NEAR_VALUABLE)
        .expect("valuable");
    assert!(valuable.pending_force.y > 0.0);

    let cues = &app.world().resource::<CueLog>().0;
    assert!(cues.iter().any(|c| c.cue == Cue::Loop(LoopCue::HandIdle, true)));
}

#[test]
fn test_stunned_robe_stays_frozen() {
    let mut app = create_robe_app(42, false);
    let robe = spawn_robe_in(&mut app, Authority::Authoritative, Vec3::ZERO);
    spawn_player_in(&mut app, Vec3::new(1.0, 0.0, 0.0));
    app.world_mut().entity_mut(robe).insert(Stunned);

    touch(&mut app, robe);
    for _ in 0..30 {
        app.update();
    }

    assert_eq!(controller(&app, robe).state(), RobeState::Idle);
    assert_eq!(
        app.world().get::<Transform>(robe).map(|t| t.translation),
        Some(Vec3::ZERO)
    );
}
