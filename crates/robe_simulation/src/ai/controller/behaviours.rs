//! Per-state behaviour Robe
//!
//! Шаблон каждого состояния:
//! - entry (consume state_started) - на всех участниках
//! - presentation (поворот, hurt damage) - на всех участниках
//! - decisions - ТОЛЬКО authority
//! - exit (state_ended) - на всех участниках, после decisions

use bevy::prelude::*;
use rand::Rng;

use super::RobeController;
use crate::ai::aggression::AggroTriggers;
use crate::ai::state::RobeState;
use crate::host::{AnimationCue, AnimationFlag, CameraShake, LoopCue, RobeHost, SoundCue};
use crate::random::{random_in_ball, random_on_sphere, Span};

/// Короткая пауза перед переоценкой (потеря focus, follow → chase)
const BRIEF_PAUSE: Span = Span::new(0.25, 0.5);
/// Пауза после Roam
const ROAM_PAUSE: Span = Span::new(1.0, 2.0);
/// Idle после Shifty / HelpPlayer
const SETTLE_PAUSE: f32 = 1.0;
/// Idle после GiveSpace
const RECOVER_PAUSE: f32 = 2.0;

impl RobeController {
    fn roll(&mut self, span: Span) -> f32 {
        span.sample(&mut self.rng)
    }

    /// Path request; недостижимая точка → entry logic повторится на следующем тике
    fn request_path_or_retry(&mut self, host: &mut RobeHost<'_>, point: Vec3, search_radius: f32) -> bool {
        if host.nav.request_path(point, search_radius) {
            return true;
        }
        crate::log(&format!(
            "🚧 Robe {:?} ({:?}): destination {:?} unreachable, retrying",
            self.net_id, self.state, point
        ));
        self.impulses.arm_state_started();
        false
    }

    fn face_focus(&mut self, host: &RobeHost<'_>) {
        if let Some(player) = self.focus_view(&*host.world) {
            self.look_at(host.body.position(), player.position);
        }
    }

    fn attack_sounds(&self, host: &mut RobeHost<'_>) {
        let position = host.body.position();
        host.presentation.camera_shake(position, CameraShake::ATTACK_SHAKE);
        host.presentation.camera_shake(position, CameraShake::ATTACK_IMPACT);
        host.presentation.play_sound(SoundCue::Attack, position);
        host.presentation.play_sound(SoundCue::AttackGlobal, position);
    }

    fn attack_animation(&self, host: &mut RobeHost<'_>) {
        self.attack_sounds(host);
        host.presentation.trigger_animation(AnimationCue::Attack);
    }

    // ============================================================================
    // States
    // ============================================================================

    pub(super) fn idle(&mut self, host: &mut RobeHost<'_>) {
        if self.impulses.consume_state_started() {
            host.nav.reset_path();
        }

        self.face_focus(host);

        if !self.is_authoritative() {
            return;
        }

        self.lose_focus(host);

        if self.aggro(host, AggroTriggers::ALL) || self.state_timer > 0.0 {
            return;
        }

        let position = host.body.position();
        match self.focus_view(&*host.world) {
            Some(player) => {
                if let Some(valuable) = player.held_valuable() {
                    self.target_valuable = Some(valuable);
                    self.set_state(host, RobeState::HelpPlayer, self.config.help_duration);
                    self.sync_fields(host);
                } else if self.config.idle_comfort_band.contains(position.distance(player.position)) {
                    self.set_state(host, RobeState::Shifty, self.config.shifty_duration);
                } else {
                    let duration = self.roll(self.config.idle_follow_duration);
                    self.set_state(host, RobeState::FollowPlayer, duration);
                }
            }
            None => {
                let duration = self.roll(self.config.idle_roam_duration);
                self.set_state(host, RobeState::Roam, duration);
            }
        }
    }

    pub(super) fn shifty(&mut self, host: &mut RobeHost<'_>) {
        let position = host.body.position();

        if self.impulses.consume_state_started() {
            let target = position + random_in_ball(&mut self.rng) * self.config.shifty_wander_radius;
            self.request_path_or_retry(host, target, self.config.shifty_search_radius);
            self.movement.begin(
                &mut *host.nav,
                self.config.shifty_speed,
                self.config.shifty_acceleration,
                self.state_timer,
            );
        }

        self.face_velocity(host);

        if self.is_authoritative() {
            let distance = self
                .focus_view(&*host.world)
                .map(|player| position.distance(player.position));

            if self.lose_focus(host) {
                let pause = self.roll(BRIEF_PAUSE);
                self.set_state(host, RobeState::Idle, pause);
            } else if self.aggro(host, AggroTriggers::ALL) {
            } else if distance.map_or(true, |d| !self.config.shifty_band.contains(d)) || self.state_timer <= 0.0 {
                self.set_state(host, RobeState::Idle, SETTLE_PAUSE);
            }
        }

        if self.impulses.state_ended {
            self.movement.end(&mut *host.nav);
        }
    }

    pub(super) fn roam(&mut self, host: &mut RobeHost<'_>) {
        if self.impulses.consume_state_started() {
            let target = host.body.position() + random_in_ball(&mut self.rng) * self.config.roam_wander_radius;
            self.request_path_or_retry(host, target, self.config.nav_search_radius);
        }

        self.face_velocity(host);

        if !self.is_authoritative() {
            return;
        }

        let noticed = self.impulses.vision && !self.ignoring_players && !self.perception.vision_players().is_empty();

        if self.aggro(host, AggroTriggers::ALL) {
        } else if noticed {
            let players = self.perception.vision_players();
            let index = self.rng.gen_range(0..players.len());
            self.focus = Some(players[index]);
            self.last_focus_vision = 0.0;
            self.set_state(host, RobeState::FollowPlayer, self.config.roam_follow_duration);
            self.sync_fields(host);
        } else if !host.nav.has_path() || self.state_timer <= 0.0 {
            let pause = self.roll(ROAM_PAUSE);
            self.set_state(host, RobeState::Idle, pause);
        }
    }

    pub(super) fn follow_player(&mut self, host: &mut RobeHost<'_>) {
        let position = host.body.position();
        let focus = self.focus_view(&*host.world);

        if self.impulses.consume_state_started() {
            match focus {
                Some(player) => {
                    let away = (position - player.position).normalize_or_zero();
                    let jitter = random_in_ball(&mut self.rng) * self.config.follow_jitter;
                    let target = player.position + away * self.config.follow_offset + jitter;
                    self.request_path_or_retry(host, target, self.config.nav_search_radius);
                }
                None => self.impulses.arm_state_started(),
            }
        }

        if let Some(player) = focus {
            self.look_at(position, player.position);
        }

        if !self.is_authoritative() {
            return;
        }

        let distance = focus.map(|player| position.distance(player.position));

        if self.aggro(host, AggroTriggers::ALL) {
        } else if self.lose_focus(host) {
            let pause = self.roll(BRIEF_PAUSE);
            self.set_state(host, RobeState::Idle, pause);
        } else if let Some(distance) = distance {
            if distance > self.config.follow_chase_distance {
                let windup = self.roll(BRIEF_PAUSE);
                self.set_state(host, RobeState::ChaseBegin, windup);
            } else if self.config.follow_orbit_band.contains_exclusive(distance)
                || !host.nav.has_path()
                || self.state_timer <= 0.0
            {
                self.set_state(host, RobeState::Idle, 0.0);
            }
        } else {
            self.set_state(host, RobeState::Idle, 0.0);
        }
    }

    pub(super) fn help_player(&mut self, host: &mut RobeHost<'_>) {
        let position = host.body.position();

        if self.impulses.consume_state_started() {
            host.presentation.set_sound_loop(LoopCue::HandIdle, true);
            self.movement.begin(
                &mut *host.nav,
                self.config.help_speed,
                self.config.help_acceleration,
                self.state_timer,
            );
            host.nav.reset_path();
            self.internal_timer = 0.0;
        }

        if let Some(valuable) = self.target_view(&*host.world) {
            self.look_at(position, valuable.position);
            let distance = valuable.position.distance(position);

            if self.is_authoritative() && distance < self.config.help_lift_radius {
                let lift = valuable.mass.min(self.config.help_max_lift);
                host.world.lift_valuable(valuable.id, Vec3::Y * lift);
            }

            if !self.config.help_standoff_band.contains(distance) && self.internal_timer <= 0.0 {
                self.internal_timer = self.config.help_repath_interval;
                let away = (position - valuable.position).normalize_or_zero();
                host.nav.request_path(
                    valuable.position + away * self.config.help_offset,
                    self.config.help_search_radius,
                );
            }
        }

        if self.is_authoritative() {
            let holding = self
                .focus_view(&*host.world)
                .is_some_and(|player| player.held.is_some());

            if self.aggro(host, AggroTriggers::ALL) {
            } else if self.state_timer <= 0.0 || !holding {
                self.set_state(host, RobeState::Idle, SETTLE_PAUSE);
            }
        }

        if self.impulses.state_ended {
            host.presentation.set_sound_loop(LoopCue::HandIdle, false);
            self.movement.end(&mut *host.nav);
        }
    }

    pub(super) fn chase_begin(&mut self, host: &mut RobeHost<'_>) {
        if self.impulses.consume_state_started() {
            host.body.set_hurt_enabled(false);
            host.nav.reset_path();
            self.attack_animation(host);
        }

        self.face_focus(host);

        if self.is_authoritative() && self.state_timer <= 0.0 {
            let duration = self.roll(self.config.chase_duration);
            self.set_state(host, RobeState::Chase, duration);
        }

        if self.impulses.state_ended {
            host.body.set_hurt_enabled(true);
        }
    }

    pub(super) fn chase(&mut self, host: &mut RobeHost<'_>) {
        if self.impulses.consume_state_started() {
            host.presentation.set_sound_loop(LoopCue::TargetPlayer, true);
            self.movement.begin(
                &mut *host.nav,
                self.config.chase_speed,
                self.config.chase_acceleration,
                self.state_timer,
            );
            self.internal_timer = 0.0;
        }

        self.face_velocity(host);

        let position = host.body.position();
        let focus = self.focus_view(&*host.world);

        if self.internal_timer <= 0.0 {
            self.internal_timer = self.config.chase_repath_interval;
            if let Some(player) = focus {
                host.nav.request_path(player.position, self.config.nav_search_radius);
            }
        }

        if self.is_authoritative() {
            match focus {
                Some(player) if self.last_focus_vision <= self.config.chase_disengage_after => {
                    let distance = position.distance(player.position);
                    if distance < self.config.attack_distance && !player.crawling {
                        self.set_state(host, RobeState::Attack, self.config.attack_duration);
                    } else if distance < self.config.attack_under_distance && player.crawling {
                        self.set_state(host, RobeState::AttackUnderBegin, self.config.attack_under_windup);
                    } else if self.state_timer <= 0.0 {
                        self.set_state(host, RobeState::GiveSpace, self.config.give_space_duration);
                    }
                }
                _ => {
                    crate::log(&format!("🌫️ Robe {:?}: chase target gone, giving space", self.net_id));
                    let had_focus = self.focus.take().is_some();
                    self.set_state(host, RobeState::GiveSpace, self.config.give_space_duration);
                    if had_focus {
                        self.sync_fields(host);
                    }
                }
            }
        }

        if self.impulses.state_ended {
            self.movement.end(&mut *host.nav);
            host.presentation.set_sound_loop(LoopCue::TargetPlayer, false);
        }
    }

    pub(super) fn attack(&mut self, host: &mut RobeHost<'_>) {
        if self.impulses.consume_state_started() {
            self.attack_animation(host);
            host.nav.reset_path();
        }

        host.body.set_hurt_damage(self.config.attack_damage);
        self.face_focus(host);

        if self.is_authoritative() && self.state_timer <= 0.0 {
            self.set_state(host, RobeState::GiveSpace, self.config.give_space_duration);
        }
    }

    pub(super) fn attack_under_begin(&mut self, host: &mut RobeHost<'_>) {
        if self.impulses.consume_state_started() {
            host.nav.reset_path();
            host.presentation.trigger_animation(AnimationCue::LookUnder);
            host.presentation.set_animation_flag(AnimationFlag::LookingUnder, true);
        }

        self.face_focus(host);

        if self.is_authoritative() && self.state_timer <= 0.0 {
            self.set_state(host, RobeState::AttackUnder, self.config.attack_under_duration);
        }
    }

    pub(super) fn attack_under(&mut self, host: &mut RobeHost<'_>) {
        if self.impulses.consume_state_started() {
            self.attack_sounds(host);
            host.presentation.trigger_animation(AnimationCue::LookUnderAttack);
        }

        host.body.set_hurt_damage(self.config.attack_under_damage);
        self.face_focus(host);

        if self.is_authoritative() && self.state_timer <= 0.0 {
            self.set_state(host, RobeState::GiveSpace, self.config.give_space_duration);
        }

        if self.impulses.state_ended {
            host.presentation.set_animation_flag(AnimationFlag::LookingUnder, false);
        }
    }

    pub(super) fn give_space(&mut self, host: &mut RobeHost<'_>) {
        if self.impulses.consume_state_started() {
            host.presentation.set_sound_loop(LoopCue::TargetPlayer, true);
            let target = host.body.position() + random_on_sphere(&mut self.rng) * self.config.give_space_radius;
            self.request_path_or_retry(host, target, self.config.nav_search_radius);
        }

        self.face_velocity(host);

        if self.is_authoritative() {
            if self.aggro(host, AggroTriggers::NO_TOUCH) {
            } else if self.state_timer <= 0.0 {
                self.set_state(host, RobeState::Idle, RECOVER_PAUSE);
            }
        }

        if self.impulses.state_ended {
            host.presentation.set_sound_loop(LoopCue::TargetPlayer, false);
        }
    }
}
