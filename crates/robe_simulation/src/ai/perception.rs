//! Perception - snapshot сенсорики за один тик
//!
//! Vision / contact callbacks приходят между тиками (от хоста), aggressive-item
//! detection считается контроллером в начале decision pass'а.

use crate::components::{ItemCategory, NetId};
use crate::host::WorldQuery;

/// Как именно игрок коснулся Robe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    /// Схватил physgrab'ом
    Grabbed,
    /// Толкнул телом
    TouchedBody,
    /// Толкнул предметом в руках
    TouchedHeldObject,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Perception {
    /// Игроки, попавшие в vision trigger (порядок прихода, без дублей)
    vision: Vec<NetId>,
    /// Последний коснувшийся игрок
    pub touched_by: Option<(NetId, ContactKind)>,
    /// Последний видимый игрок с оружием в руках
    pub aggressive: Option<(NetId, ItemCategory)>,
}

impl Perception {
    pub fn record_vision(&mut self, player: NetId) {
        if !self.vision.contains(&player) {
            self.vision.push(player);
        }
    }

    pub fn record_contact(&mut self, player: NetId, kind: ContactKind) {
        self.touched_by = Some((player, kind));
    }

    pub fn vision_players(&self) -> &[NetId] {
        &self.vision
    }

    pub fn saw(&self, player: NetId) -> bool {
        self.vision.contains(&player)
    }

    pub fn touched_player(&self) -> Option<NetId> {
        self.touched_by.map(|(player, _)| player)
    }

    /// Ищет оружие в руках у vision игроков (последний найденный побеждает)
    ///
    /// Возвращает true если нашёлся хотя бы один вооружённый игрок.
    pub fn detect_aggressive_items(&mut self, world: &dyn WorldQuery) -> bool {
        for &player in &self.vision {
            let Some(view) = world.player(player) else {
                continue;
            };
            let Some(item) = view.held.and_then(|held| held.item) else {
                continue;
            };
            if item.is_aggressive() {
                self.aggressive = Some((player, item));
            }
        }
        self.aggressive.is_some()
    }

    pub fn aggressive_player(&self) -> Option<NetId> {
        self.aggressive.map(|(player, _)| player)
    }

    pub fn clear(&mut self) {
        self.vision.clear();
        self.touched_by = None;
        self.aggressive = None;
    }
}
