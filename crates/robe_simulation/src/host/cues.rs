//! Presentation cues - что Robe просит показать/проиграть

use bevy::prelude::*;

use super::Presentation;

/// One-shot animation triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    Attack,
    LookUnder,
    LookUnderAttack,
}

/// Bool параметры animator'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationFlag {
    LookingUnder,
}

/// One-shot звуки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Attack,
    /// Слышен на всём уровне
    AttackGlobal,
}

/// Зацикленные звуки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopCue {
    HandIdle,
    TargetPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShakeKind {
    Shake,
    Impact,
}

/// Локальный camera shake (затухает с дистанцией)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraShake {
    pub kind: ShakeKind,
    pub strength: f32,
    pub near: f32,
    pub far: f32,
    pub duration: f32,
}

impl CameraShake {
    pub const ATTACK_SHAKE: CameraShake = CameraShake {
        kind: ShakeKind::Shake,
        strength: 5.0,
        near: 3.0,
        far: 8.0,
        duration: 0.5,
    };

    pub const ATTACK_IMPACT: CameraShake = CameraShake {
        kind: ShakeKind::Impact,
        strength: 5.0,
        near: 3.0,
        far: 8.0,
        duration: 0.1,
    };
}

/// Один presentation вызов (для event-based хостов и тестов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    Animation(AnimationCue),
    AnimationFlag(AnimationFlag, bool),
    Sound(SoundCue, Vec3),
    Loop(LoopCue, bool),
    Shake(Vec3, CameraShake),
}

/// Presentation, который просто копит cues (ECS адаптер пишет их в events)
#[derive(Debug, Clone, Default)]
pub struct CueRecorder {
    pub cues: Vec<Cue>,
}

impl CueRecorder {
    pub fn drain(&mut self) -> std::vec::Drain<'_, Cue> {
        self.cues.drain(..)
    }

    pub fn contains(&self, cue: &Cue) -> bool {
        self.cues.contains(cue)
    }

    pub fn count(&self, cue: &Cue) -> usize {
        self.cues.iter().filter(|c| *c == cue).count()
    }
}

impl Presentation for CueRecorder {
    fn trigger_animation(&mut self, cue: AnimationCue) {
        self.cues.push(Cue::Animation(cue));
    }

    fn set_animation_flag(&mut self, flag: AnimationFlag, value: bool) {
        self.cues.push(Cue::AnimationFlag(flag, value));
    }

    fn play_sound(&mut self, cue: SoundCue, position: Vec3) {
        self.cues.push(Cue::Sound(cue, position));
    }

    fn set_sound_loop(&mut self, cue: LoopCue, playing: bool) {
        self.cues.push(Cue::Loop(cue, playing));
    }

    fn camera_shake(&mut self, origin: Vec3, shake: CameraShake) {
        self.cues.push(Cue::Shake(origin, shake));
    }
}
