//! ValuableTracker - distance-gated подписка на break events ценностей
//!
//! Инвариант: ценность подписана ⇔ distance <= radius на момент последнего refresh.
//! Refresh раз в `valuable_refresh_interval` (не каждый тик).
//! Каждая ценность подписывается не более одного раза (subscribe/unsubscribe строго парные).

use std::collections::BTreeSet;

use bevy::prelude::*;

use crate::components::NetId;
use crate::host::WorldQuery;

#[derive(Debug, Clone, Default)]
pub struct ValuableTracker {
    /// BTreeSet: порядок обхода (и Debug snapshot) детерминирован
    tracked: BTreeSet<NetId>,
    refresh_timer: f32,
}

impl ValuableTracker {
    pub fn is_tracking(&self, valuable: NetId) -> bool {
        self.tracked.contains(&valuable)
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Накопить dt; при срабатывании cadence пересчитать подписки
    ///
    /// Возвращает true если был refresh.
    pub fn update(&mut self, dt: f32, origin: Vec3, radius: f32, interval: f32, world: &mut dyn WorldQuery) -> bool {
        self.refresh_timer -= dt;
        if self.refresh_timer > 0.0 {
            return false;
        }
        self.refresh_timer = interval;
        self.refresh(origin, radius, world);
        true
    }

    /// Немедленный пересчёт подписок
    pub fn refresh(&mut self, origin: Vec3, radius: f32, world: &mut dyn WorldQuery) {
        let valuables = world.valuables();

        // Despawned ценности: подписка снимается, иначе listener переживёт объект
        let despawned: Vec<NetId> = self
            .tracked
            .iter()
            .copied()
            .filter(|id| !valuables.iter().any(|v| v.id == *id))
            .collect();
        if !despawned.is_empty() {
            crate::log(&format!(
                "🧹 ValuableTracker: forgot {} despawned valuables",
                despawned.len()
            ));
        }
        for id in despawned {
            world.unsubscribe_break(id);
            self.tracked.remove(&id);
        }

        for valuable in valuables {
            let in_range = valuable.position.distance(origin) <= radius;
            let tracked = self.tracked.contains(&valuable.id);

            if in_range && !tracked {
                world.subscribe_break(valuable.id);
                self.tracked.insert(valuable.id);
            } else if !in_range && tracked {
                world.unsubscribe_break(valuable.id);
                self.tracked.remove(&valuable.id);
            }
        }
    }

}
