//! ReplicaInbox - буфер входящих sync сообщений до границы тика
//!
//! Message handler НИКОГДА не трогает state контроллера напрямую: только кладёт сюда.
//! Повторное сообщение того же вида перезаписывает предыдущее (last-write-wins).

use crate::ai::RobeState;
use crate::components::NetId;

use super::SyncMessage;

/// Отложенный SyncFields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSync {
    pub focus: Option<NetId>,
    pub target_valuable: Option<NetId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplicaInbox {
    state: Option<(RobeState, f32)>,
    fields: Option<FieldSync>,
}

impl ReplicaInbox {
    pub fn push(&mut self, message: SyncMessage) {
        match message {
            SyncMessage::SetState { state, timer } => {
                self.state = Some((state, timer));
            }
            SyncMessage::SyncFields { focus, target_valuable } => {
                self.fields = Some(FieldSync { focus, target_valuable });
            }
        }
    }

    /// Есть ли отложенный state (это и есть "FutureState")
    pub fn pending_state(&self) -> Option<RobeState> {
        self.state.map(|(state, _)| state)
    }

    pub fn take_state(&mut self) -> Option<(RobeState, f32)> {
        self.state.take()
    }

    pub fn take_fields(&mut self) -> Option<FieldSync> {
        self.fields.take()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.fields.is_none()
    }
}
