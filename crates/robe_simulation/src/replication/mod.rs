//! Replication - leader/follower синхронизация Robe между участниками сессии
//!
//! Архитектура:
//! - Ровно один участник на entity - Authority (обычно хост сессии), он принимает решения
//! - Остальные - Replica: получают SetState/SyncFields и применяют их ТОЛЬКО на границе тика
//! - Wire: `SyncEnvelope` (version + sender NetId + message), bincode
//! - Порядок доставки не гарантирован: last-write-wins при deferred apply
//! - Single-player: authority всегда true, транспорт инертен

pub mod inbox;
pub mod protocol;

pub use inbox::{FieldSync, ReplicaInbox};
pub use protocol::{SyncEnvelope, SyncMessage, PROTOCOL_VERSION};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Роль участника для конкретного entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    /// Принимает решения и рассылает их
    Authoritative,
    /// Только playback (presentation), решения подавлены
    Replica,
}

impl Authority {
    pub fn is_authoritative(&self) -> bool {
        matches!(self, Authority::Authoritative)
    }
}

/// Сессия участника (ECS resource)
///
/// `multiplayer = false` → OutboundSync никогда не пишется.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetSession {
    pub multiplayer: bool,
}

impl NetSession {
    pub fn single_player() -> Self {
        Self { multiplayer: false }
    }

    pub fn multiplayer() -> Self {
        Self { multiplayer: true }
    }
}
