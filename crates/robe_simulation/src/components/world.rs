//! World компоненты: сетевые id, игроки, ценности, extraction point

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Network-wide идентификатор объекта (одинаковый у всех участников сессии)
///
/// Weak reference: контроллер хранит только NetId и резолвит его через WorldQuery
/// на каждом использовании. Объект может исчезнуть в любой момент (despawn).
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect,
)]
#[reflect(Component)]
pub struct NetId(pub u32);

/// Категория предмета в руках игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum ItemCategory {
    Grenade,
    Melee,
    Gun,
    Mine,
    Drone,
    Tool,
    Cart,
    Consumable,
}

impl ItemCategory {
    /// Weapon-class предметы провоцируют Robe
    pub fn is_aggressive(&self) -> bool {
        matches!(
            self,
            ItemCategory::Grenade | ItemCategory::Melee | ItemCategory::Gun | ItemCategory::Mine
        )
    }
}

/// То, что игрок держит в руках (physgrab)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct HeldObject {
    /// Если это ценность - её NetId
    pub valuable: Option<NetId>,
    /// Если это item - его категория
    pub item: Option<ItemCategory>,
}

/// Состояние игрока, видимое AI
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct PlayerStatus {
    /// Игрок ползёт (Robe атакует "из-под")
    pub crawling: bool,
    /// Что игрок сейчас держит (None = руки пустые)
    pub held: Option<HeldObject>,
}

/// Ценность (valuable object) на уровне
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Valuable {
    pub mass: f32,
    /// Сила, накопленная за тик (HelpPlayer lift). Хост-физика забирает и обнуляет.
    pub pending_force: Vec3,
}

impl Default for Valuable {
    fn default() -> Self {
        Self {
            mass: 1.0,
            pending_force: Vec3::ZERO,
        }
    }
}

impl Valuable {
    pub fn new(mass: f32) -> Self {
        Self {
            mass,
            ..default()
        }
    }
}

/// Extraction point; `warning` = идёт обратный отсчёт (шумно, Robe нервничает)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct ExtractionPoint {
    pub warning: bool,
}
