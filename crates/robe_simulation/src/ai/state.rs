//! RobeState - поведенческие состояния Robe

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояние FSM (реплицируется как есть через SetState)
///
/// "Нет pending state" выражается через `Option<RobeState>`, отдельного
/// sentinel варианта нет.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
pub enum RobeState {
    /// Стоит, смотрит на focus, решает что делать дальше
    #[default]
    Idle,
    /// Нервно переминается рядом с focus
    Shifty,
    /// Бродит без цели
    Roam,
    /// Держится на орбите вокруг focus
    FollowPlayer,
    /// Помогает нести ценность, которую держит focus
    HelpPlayer,
    /// Wind-up перед погоней (hurt volume выключен)
    ChaseBegin,
    Chase,
    Attack,
    /// Заглядывает под ползущего игрока
    AttackUnderBegin,
    AttackUnder,
    /// Отходит после атаки / потери цели
    GiveSpace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        assert_eq!(RobeState::default(), RobeState::Idle);
    }
}
