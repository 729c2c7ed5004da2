//! Combat компоненты

use bevy::prelude::*;

/// Hurt volume Robe (урон игрокам при контакте)
///
/// Выключается на wind-up (ChaseBegin), `player_damage` выставляется атакующими состояниями.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HurtVolume {
    pub enabled: bool,
    pub player_damage: u32,
}

impl Default for HurtVolume {
    fn default() -> Self {
        Self {
            enabled: true,
            player_damage: 0,
        }
    }
}

/// Stunned marker - внешнее прерывание (владеет хост), AI пропускает тик целиком
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Stunned;
