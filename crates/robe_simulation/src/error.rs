//! Типизированные ошибки simulation слоя
//!
//! Ничего из этого не фатально: контроллер логирует и продолжает тик.

use crate::components::NetId;

/// Ошибки репликации (wire encode/decode, адресация, роль участника)
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// bincode не смог сериализовать сообщение
    #[error("failed to encode sync message: {0}")]
    Encode(String),

    /// Payload повреждён или обрезан
    #[error("failed to decode sync message: {0}")]
    Decode(String),

    /// Пир говорит на другой версии протокола
    #[error("unsupported sync protocol version {found} (expected {expected})")]
    UnsupportedVersion {
        found: u16,
        expected: u16,
    },

    /// Envelope адресован другому entity
    #[error("sync message for entity {found:?} delivered to entity {expected:?}")]
    WrongEntity {
        expected: NetId,
        found: NetId,
    },

    /// Authority сам принимает решения - входящие state сообщения ему не нужны
    #[error("entity {0:?} is authoritative and does not accept replicated state")]
    NotReplica(NetId),
}

/// Ошибки загрузки/валидации RobeConfig
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse robe config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config range `{name}` is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("config value `{name}` must be positive, got {value}")]
    NonPositive {
        name: &'static str,
        value: f32,
    },
}
