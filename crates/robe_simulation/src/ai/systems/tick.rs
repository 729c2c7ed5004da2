//! tick_robe_controllers - один `RobeController::tick` на Robe за fixed step

use bevy::prelude::*;

use super::adapters::{EcsBody, EcsNavigation, EcsNet, EcsWorld};
use crate::ai::break_listeners::BreakListeners;
use crate::ai::controller::RobeController;
use crate::ai::events::{OutboundSync, RobeCue};
use crate::components::{ExtractionPoint, HurtVolume, NavAgent, NavBounds, NetId, PlayerStatus, Stunned, Valuable};
use crate::host::{CueRecorder, PlayerView, RobeHost, ValuableView};
use crate::replication::NetSession;

/// Система: тик всех Robe
///
/// Порядок:
/// 1. Snapshot игроков / ценностей / extraction warning (Robe их не двигает)
/// 2. Tick каждого Robe через ECS адаптеры
/// 3. Cues → RobeCue, sync payloads → OutboundSync
/// 4. Накопленные lift силы → Valuable::pending_force
#[allow(clippy::too_many_arguments)]
pub fn tick_robe_controllers(
    mut robes: Query<(
        Entity,
        &mut RobeController,
        &mut Transform,
        &mut NavAgent,
        &mut HurtVolume,
        Has<Stunned>,
    )>,
    players: Query<(&NetId, &Transform, &PlayerStatus), Without<RobeController>>,
    mut valuables: Query<(&NetId, &Transform, &mut Valuable), Without<RobeController>>,
    extraction_points: Query<(&Transform, &ExtractionPoint), Without<RobeController>>,
    mut listeners: ResMut<BreakListeners>,
    session: Res<NetSession>,
    nav_bounds: Option<Res<NavBounds>>,
    mut cues: EventWriter<RobeCue>,
    mut outbound: EventWriter<OutboundSync>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    let player_views: Vec<PlayerView> = players
        .iter()
        .map(|(id, transform, status)| PlayerView {
            id: *id,
            position: transform.translation,
            crawling: status.crawling,
            held: status.held,
        })
        .collect();

    let valuable_views: Vec<ValuableView> = valuables
        .iter()
        .map(|(id, transform, valuable)| ValuableView {
            id: *id,
            position: transform.translation,
            mass: valuable.mass,
        })
        .collect();

    let extraction_warning = extraction_points
        .iter()
        .find(|(_, point)| point.warning)
        .map(|(transform, _)| transform.translation);

    let bounds = nav_bounds.map(|bounds| *bounds);
    let mut lifts: Vec<(NetId, Vec3)> = Vec::new();

    for (entity, mut robe, mut transform, mut agent, mut hurt, stunned) in robes.iter_mut() {
        let mut body = EcsBody {
            transform: &mut transform,
            hurt: &mut hurt,
            stunned,
        };
        let mut nav = EcsNavigation {
            agent: &mut agent,
            bounds,
        };
        let mut presentation = CueRecorder::default();
        let mut world = EcsWorld {
            robe: entity,
            players: &player_views,
            valuables: &valuable_views,
            extraction_warning,
            listeners: &mut listeners,
            lifts: &mut lifts,
        };
        let mut net = EcsNet {
            multiplayer: session.multiplayer,
            outbox: Vec::new(),
        };

        robe.tick(
            delta,
            &mut RobeHost {
                body: &mut body,
                nav: &mut nav,
                presentation: &mut presentation,
                world: &mut world,
                net: &mut net,
            },
        );

        for cue in presentation.drain() {
            cues.write(RobeCue { entity, cue });
        }

        let sender = robe.net_id();
        for payload in net.outbox {
            outbound.write(OutboundSync { sender, payload });
        }
    }

    for (target, force) in lifts {
        if let Some((_, _, mut valuable)) = valuables.iter_mut().find(|(id, _, _)| **id == target) {
            valuable.pending_force += force;
        }
    }
}
