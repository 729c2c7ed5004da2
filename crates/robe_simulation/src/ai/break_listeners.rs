//! BreakListeners - какие Robe подписаны на break events какой ценности

use std::collections::{BTreeSet, HashMap};

use bevy::prelude::*;

use crate::components::NetId;

#[derive(Resource, Debug, Default)]
pub struct BreakListeners {
    // BTreeSet: порядок доставки не зависит от hash seed
    by_valuable: HashMap<NetId, BTreeSet<Entity>>,
}

impl BreakListeners {
    pub fn subscribe(&mut self, valuable: NetId, robe: Entity) {
        self.by_valuable.entry(valuable).or_default().insert(robe);
    }

    pub fn unsubscribe(&mut self, valuable: NetId, robe: Entity) {
        if let Some(robes) = self.by_valuable.get_mut(&valuable) {
            robes.remove(&robe);
            if robes.is_empty() {
                self.by_valuable.remove(&valuable);
            }
        }
    }

    pub fn listeners(&self, valuable: NetId) -> Vec<Entity> {
        self.by_valuable
            .get(&valuable)
            .map(|robes| robes.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_listening(&self, valuable: NetId, robe: Entity) -> bool {
        self.by_valuable
            .get(&valuable)
            .is_some_and(|robes| robes.contains(&robe))
    }

    /// Robe despawned - убрать его отовсюду
    pub fn forget_robe(&mut self, robe: Entity) {
        self.by_valuable.retain(|_, robes| {
            robes.remove(&robe);
            !robes.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_unsubscribe() {
        let mut listeners = BreakListeners::default();
        let robe = Entity::from_raw(3);

        listeners.subscribe(NetId(1), robe);
        listeners.subscribe(NetId(1), robe);
        assert_eq!(listeners.listeners(NetId(1)), vec![robe]);

        listeners.unsubscribe(NetId(1), robe);
        assert!(listeners.listeners(NetId(1)).is_empty());
        assert!(!listeners.is_listening(NetId(1), robe));
    }

    #[test]
    fn test_forget_robe() {
        let mut listeners = BreakListeners::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        listeners.subscribe(NetId(1), a);
        listeners.subscribe(NetId(1), b);
        listeners.subscribe(NetId(2), a);

        listeners.forget_robe(a);

        assert_eq!(listeners.listeners(NetId(1)), vec![b]);
        assert!(listeners.listeners(NetId(2)).is_empty());
    }
}
