//! RobeController - per-tick FSM одного Robe
//!
//! Один тип для обоих ролей (Authority flag), один entry point - `tick`.
//!
//! Порядок тика:
//! 1. stunned → return (ничего не тикает, pending state остаётся pending)
//! 2. таймеры; pending replicated state → state_ended (exit logic старого состояния)
//! 3. (authority) stale references, interest/ignoring hysteresis
//! 4. (authority) valuable tracking, aggressive items; затем behaviour текущего состояния
//! 5. rotation spring
//! 6. event impulses + perception сбрасываются
//! 7. отложенные SyncFields / SetState применяются (last-write-wins)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::aggression::{self, AggroInput, AggroTriggers};
use crate::ai::impulses::ImpulseSet;
use crate::ai::movement_override::MovementOverride;
use crate::ai::perception::{ContactKind, Perception};
use crate::ai::rotation::YawSpring;
use crate::ai::state::RobeState;
use crate::ai::valuables::ValuableTracker;
use crate::components::{HurtVolume, NavAgent, NetId};
use crate::config::RobeConfig;
use crate::error::SyncError;
use crate::host::{PlayerView, RobeHost, ValuableView, WorldQuery};
use crate::replication::{Authority, ReplicaInbox, SyncEnvelope, SyncMessage};

mod behaviours;


/// Behaviour controller Robe (ECS component + standalone через ScriptedHost)
#[derive(Component, Debug, Clone)]
#[require(Transform, NavAgent, HurtVolume)]
pub struct RobeController {
    net_id: NetId,
    authority: Authority,
    config: RobeConfig,
    rng: ChaCha8Rng,

    state: RobeState,
    /// Бюджет жизни текущего состояния
    state_timer: f32,
    /// Pacing внутри состояния (repath cadence)
    internal_timer: f32,
    interest_timer: f32,
    /// Сколько секунд focus не попадался на глаза
    last_focus_vision: f32,
    ignoring_players: bool,

    focus: Option<NetId>,
    target_valuable: Option<NetId>,

    impulses: ImpulseSet,
    perception: Perception,
    tracker: ValuableTracker,
    movement: MovementOverride,
    spring: YawSpring,
    inbox: ReplicaInbox,
}

impl RobeController {
    pub fn new(net_id: NetId, authority: Authority, config: RobeConfig, seed: u64) -> Self {
        Self {
            net_id,
            authority,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: RobeState::Idle,
            state_timer: 0.0,
            internal_timer: 0.0,
            interest_timer: f32::INFINITY,
            last_focus_vision: f32::INFINITY,
            ignoring_players: false,
            focus: None,
            target_valuable: None,
            impulses: ImpulseSet::armed(),
            perception: Perception::default(),
            tracker: ValuableTracker::default(),
            movement: MovementOverride::default(),
            spring: YawSpring::default(),
            inbox: ReplicaInbox::default(),
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn net_id(&self) -> NetId {
        self.net_id
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn is_authoritative(&self) -> bool {
        self.authority.is_authoritative()
    }

    pub fn config(&self) -> &RobeConfig {
        &self.config
    }

    pub fn state(&self) -> RobeState {
        self.state
    }

    pub fn state_timer(&self) -> f32 {
        self.state_timer
    }

    pub fn focus(&self) -> Option<NetId> {
        self.focus
    }

    pub fn target_valuable(&self) -> Option<NetId> {
        self.target_valuable
    }

    pub fn is_ignoring_players(&self) -> bool {
        self.ignoring_players
    }

    pub fn impulses(&self) -> &ImpulseSet {
        &self.impulses
    }

    /// Replica: SetState получен, но ещё не применён
    pub fn has_pending_state(&self) -> bool {
        self.inbox.pending_state().is_some()
    }

    pub fn is_tracking_valuable(&self, valuable: NetId) -> bool {
        self.tracker.is_tracking(valuable)
    }

    pub fn yaw(&self) -> f32 {
        self.spring.yaw
    }

    // ============================================================================
    // Sensory callbacks (только authority их записывает)
    // ============================================================================

    pub fn on_vision(&mut self, player: NetId) {
        if !self.is_authoritative() {
            return;
        }
        self.impulses.vision = true;
        self.perception.record_vision(player);
    }

    pub fn on_contact(&mut self, player: NetId, kind: ContactKind) {
        if !self.is_authoritative() {
            return;
        }
        self.impulses.touched = true;
        self.perception.record_contact(player, kind);
    }

    /// Break event отслеживаемой ценности
    pub fn on_object_broken(&mut self, valuable: NetId) {
        if !self.is_authoritative() || !self.tracker.is_tracking(valuable) {
            return;
        }
        self.impulses.object_broken = true;
    }

    // ============================================================================
    // Network inbound
    // ============================================================================

    /// Принять payload от authority (буферизуется до конца следующего тика)
    pub fn receive(&mut self, payload: &[u8]) -> Result<(), SyncError> {
        let envelope = SyncEnvelope::decode(payload)?;
        self.receive_envelope(envelope)
    }

    pub fn receive_envelope(&mut self, envelope: SyncEnvelope) -> Result<(), SyncError> {
        if self.is_authoritative() {
            return Err(SyncError::NotReplica(self.net_id));
        }
        if envelope.sender != self.net_id {
            return Err(SyncError::WrongEntity {
                expected: self.net_id,
                found: envelope.sender,
            });
        }
        self.inbox.push(envelope.message);
        Ok(())
    }

    // ============================================================================
    // Tick
    // ============================================================================

    pub fn tick(&mut self, dt: f32, host: &mut RobeHost<'_>) {
        if host.body.is_stunned() {
            return;
        }

        self.state_timer -= dt;
        self.internal_timer -= dt;
        self.interest_timer -= dt;
        self.last_focus_vision += dt;

        if self.has_pending_state() {
            self.impulses.state_ended = true;
        }

        if self.is_authoritative() {
            self.drop_stale_references(host);
            self.update_interest();

            let position = host.body.position();
            self.tracker.update(
                dt,
                position,
                self.config.valuable_tracking_radius,
                self.config.valuable_refresh_interval,
                &mut *host.world,
            );

            if self.impulses.vision && self.perception.detect_aggressive_items(&*host.world) {
                self.impulses.player_aggressive = true;
            }
        }

        match self.state {
            RobeState::Idle => self.idle(host),
            RobeState::Shifty => self.shifty(host),
            RobeState::Roam => self.roam(host),
            RobeState::FollowPlayer => self.follow_player(host),
            RobeState::HelpPlayer => self.help_player(host),
            RobeState::ChaseBegin => self.chase_begin(host),
            RobeState::Chase => self.chase(host),
            RobeState::Attack => self.attack(host),
            RobeState::AttackUnderBegin => self.attack_under_begin(host),
            RobeState::AttackUnder => self.attack_under(host),
            RobeState::GiveSpace => self.give_space(host),
        }

        let rotation = self.spring.step(self.config.rotation_frequency, dt);
        host.body.set_rotation(rotation);

        self.perception.clear();
        self.impulses.end_tick();

        self.apply_inbox();
    }

    /// Authority: despawned focus / target превращаются в None (и рассылаются)
    fn drop_stale_references(&mut self, host: &mut RobeHost<'_>) {
        let stale_focus = self.focus.is_some_and(|id| host.world.player(id).is_none());
        let stale_target = self
            .target_valuable
            .is_some_and(|id| host.world.valuable(id).is_none());

        if !stale_focus && !stale_target {
            return;
        }

        if stale_focus {
            crate::log(&format!("👻 Robe {:?}: focus {:?} despawned", self.net_id, self.focus));
            self.focus = None;
        }
        if stale_target {
            self.target_valuable = None;
        }
        self.sync_fields(host);
    }

    /// Interest / ignoring hysteresis
    fn update_interest(&mut self) {
        if let Some(focus) = self.focus {
            let seen = self.impulses.vision && !self.ignoring_players && self.perception.saw(focus);
            let touched = self.impulses.touched && self.perception.touched_player() == Some(focus);
            if seen || touched {
                self.last_focus_vision = 0.0;
                self.interest_timer = self.config.interest_duration.sample(&mut self.rng);
            }
        }

        if self.interest_timer <= 0.0 {
            self.interest_timer = if self.ignoring_players {
                f32::INFINITY
            } else {
                self.config.ignore_duration.sample(&mut self.rng)
            };
            self.ignoring_players = !self.ignoring_players;
            crate::log(&format!(
                "🙈 Robe {:?}: ignoring players = {}",
                self.net_id, self.ignoring_players
            ));
        }
    }

    /// Step 7: отложенные сообщения от authority
    fn apply_inbox(&mut self) {
        if let Some(fields) = self.inbox.take_fields() {
            self.focus = fields.focus;
            self.target_valuable = fields.target_valuable;
        }

        if let Some((state, timer)) = self.inbox.take_state() {
            crate::log(&format!(
                "📥 Robe {:?} (replica): {:?} → {:?} (timer {:.2})",
                self.net_id, self.state, state, timer
            ));
            self.state = state;
            self.state_timer = timer;
            self.impulses.arm_state_started();
        }
    }

    // ============================================================================
    // Transitions & broadcast (authority only)
    // ============================================================================

    fn set_state(&mut self, host: &mut RobeHost<'_>, state: RobeState, timer: f32) {
        if !self.is_authoritative() || state == self.state {
            return;
        }

        crate::log(&format!(
            "🎭 Robe {:?}: {:?} → {:?} (timer {:.2})",
            self.net_id, self.state, state, timer
        ));

        self.state = state;
        self.state_timer = timer;
        self.impulses.arm_state_started();
        self.impulses.state_ended = true;

        self.broadcast(host, SyncMessage::SetState { state, timer });
    }

    fn sync_fields(&mut self, host: &mut RobeHost<'_>) {
        self.broadcast(
            host,
            SyncMessage::SyncFields {
                focus: self.focus,
                target_valuable: self.target_valuable,
            },
        );
    }

    fn broadcast(&self, host: &mut RobeHost<'_>, message: SyncMessage) {
        if !self.is_authoritative() || !host.net.is_multiplayer() {
            return;
        }

        match SyncEnvelope::new(self.net_id, message).encode() {
            Ok(payload) => host.net.broadcast(payload),
            Err(err) => crate::log_error(&format!("Robe {:?}: {}", self.net_id, err)),
        }
    }

    // ============================================================================
    // Shared behaviour helpers
    // ============================================================================

    /// Focus, резолвленный через мир (None = нет focus или despawned)
    fn focus_view(&self, world: &dyn WorldQuery) -> Option<PlayerView> {
        self.focus.and_then(|id| world.player(id))
    }

    fn target_view(&self, world: &dyn WorldQuery) -> Option<ValuableView> {
        self.target_valuable.and_then(|id| world.valuable(id))
    }

    fn look_at(&mut self, position: Vec3, point: Vec3) {
        self.spring.face_direction(point - position);
    }

    /// Смотреть по направлению движения
    fn face_velocity(&mut self, host: &RobeHost<'_>) {
        let velocity = host.nav.velocity();
        if velocity.length() > 0.01 {
            self.spring.face_direction(velocity);
        }
    }

    /// Потеря focus после `lose_focus_after` секунд без визуального контакта
    fn lose_focus(&mut self, host: &mut RobeHost<'_>) -> bool {
        if self.focus.is_none() || self.last_focus_vision <= self.config.lose_focus_after {
            return false;
        }

        crate::log(&format!("❓ Robe {:?}: lost focus {:?}", self.net_id, self.focus));
        self.focus = None;
        self.sync_fields(host);
        true
    }

    /// Aggro check; при срабатывании → ChaseBegin
    fn aggro(&mut self, host: &mut RobeHost<'_>, triggers: AggroTriggers) -> bool {
        let input = AggroInput {
            position: host.body.position(),
            touched_by: self
                .impulses
                .touched
                .then(|| self.perception.touched_player())
                .flatten(),
            aggressive_player: self
                .impulses
                .player_aggressive
                .then(|| self.perception.aggressive_player())
                .flatten(),
            object_broken: self.impulses.object_broken,
            extraction_warning: host.world.extraction_warning(),
            focus: self.focus,
            triggers,
        };

        let Some(decision) = aggression::evaluate(&input, &self.config) else {
            return false;
        };

        crate::log(&format!(
            "😡 Robe {:?}: aggro on {:?} ({:?})",
            self.net_id, decision.focus, decision.reason
        ));

        self.focus = Some(decision.focus);
        let windup = self.config.aggro_windup.sample(&mut self.rng);
        self.set_state(host, RobeState::ChaseBegin, windup);
        self.sync_fields(host);
        self.last_focus_vision = 0.0;
        true
    }
}
