//! AggressionPolicy - прерывать ли текущее поведение ради погони
//!
//! Чистая функция: никакого state, никаких side effects. Контроллер сам делает
//! transition в ChaseBegin, если policy вернула решение.
//!
//! Приоритет (первое совпадение побеждает):
//! 1. touch - коснувшийся игрок
//! 2. aggressive item - видимый игрок с оружием
//! 3. (без focus дальше нечего проверять)
//! 4. object broken - сломалась ценность рядом → focus
//! 5. extraction warning ближе радиуса → focus

use bevy::prelude::*;

use crate::components::NetId;
use crate::config::RobeConfig;

/// Какие триггеры разрешены в текущем состоянии
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggroTriggers {
    pub touch: bool,
    pub aggressive_item: bool,
    pub object_break: bool,
}

impl AggroTriggers {
    pub const ALL: AggroTriggers = AggroTriggers {
        touch: true,
        aggressive_item: true,
        object_break: true,
    };

    /// GiveSpace: толчки игнорируются (Robe сам только что атаковал)
    pub const NO_TOUCH: AggroTriggers = AggroTriggers {
        touch: false,
        ..Self::ALL
    };
}

/// Вход policy (snapshot одного тика)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggroInput {
    pub position: Vec3,
    pub touched_by: Option<NetId>,
    pub aggressive_player: Option<NetId>,
    pub object_broken: bool,
    /// Позиция extraction point в warning
    pub extraction_warning: Option<Vec3>,
    pub focus: Option<NetId>,
    pub triggers: AggroTriggers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggroReason {
    Touched,
    AggressiveItem,
    ObjectBroken,
    ExtractionWarning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggroDecision {
    /// Новый focus (на кого охотимся)
    pub focus: NetId,
    pub reason: AggroReason,
}

pub fn evaluate(input: &AggroInput, config: &RobeConfig) -> Option<AggroDecision> {
    if input.triggers.touch {
        if let Some(player) = input.touched_by {
            return Some(AggroDecision {
                focus: player,
                reason: AggroReason::Touched,
            });
        }
    }

    if input.triggers.aggressive_item {
        if let Some(player) = input.aggressive_player {
            return Some(AggroDecision {
                focus: player,
                reason: AggroReason::AggressiveItem,
            });
        }
    }

    let focus = input.focus?;

    if input.triggers.object_break && input.object_broken {
        return Some(AggroDecision {
            focus,
            reason: AggroReason::ObjectBroken,
        });
    }

    let warning_nearby = input
        .extraction_warning
        .is_some_and(|point| point.distance(input.position) < config.extraction_warning_radius);
    if warning_nearby {
        return Some(AggroDecision {
            focus,
            reason: AggroReason::ExtractionWarning,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_input() -> AggroInput {
        AggroInput {
            position: Vec3::ZERO,
            touched_by: None,
            aggressive_player: None,
            object_broken: false,
            extraction_warning: None,
            focus: None,
            triggers: AggroTriggers::ALL,
        }
    }

    #[test]
    fn test_touch_outranks_aggressive_item() {
        let input = AggroInput {
            touched_by: Some(NetId(1)),
            aggressive_player: Some(NetId(2)),
            ..quiet_input()
        };

        let decision = evaluate(&input, &RobeConfig::default()).expect("aggro");
        assert_eq!(decision.focus, NetId(1));
        assert_eq!(decision.reason, AggroReason::Touched);
    }

    #[test]
    fn test_disabled_touch_falls_through_to_item() {
        let input = AggroInput {
            touched_by: Some(NetId(1)),
            aggressive_player: Some(NetId(2)),
            triggers: AggroTriggers::NO_TOUCH,
            ..quiet_input()
        };

        let decision = evaluate(&input, &RobeConfig::default()).expect("aggro");
        assert_eq!(decision.focus, NetId(2));
        assert_eq!(decision.reason, AggroReason::AggressiveItem);
    }

    #[test]
    fn test_object_break_requires_focus() {
        let mut input = AggroInput {
            object_broken: true,
            ..quiet_input()
        };
        assert_eq!(evaluate(&input, &RobeConfig::default()), None);

        input.focus = Some(NetId(4));
        let decision = evaluate(&input, &RobeConfig::default()).expect("aggro");
        assert_eq!(decision.reason, AggroReason::ObjectBroken);
        assert_eq!(decision.focus, NetId(4));
    }

    #[test]
    fn test_extraction_warning_radius() {
        let config = RobeConfig::default();
        let mut input = AggroInput {
            focus: Some(NetId(3)),
            extraction_warning: Some(Vec3::new(4.9, 0.0, 0.0)),
            ..quiet_input()
        };
        assert_eq!(
            evaluate(&input, &config).map(|d| d.reason),
            Some(AggroReason::ExtractionWarning)
        );

        input.extraction_warning = Some(Vec3::new(5.5, 0.0, 0.0));
        assert_eq!(evaluate(&input, &config), None);
    }

    #[test]
    fn test_nothing_happened() {
        let input = AggroInput {
            focus: Some(NetId(1)),
            ..quiet_input()
        };
        assert_eq!(evaluate(&input, &RobeConfig::default()), None);
    }
}
