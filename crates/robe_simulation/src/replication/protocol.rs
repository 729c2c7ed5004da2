//! Sync protocol: сообщения authority → replica
//!
//! Формат (bincode, fixint, little-endian):
//! - u16 version (читается отдельно ДО полного decode - новая версия не должна ломать парсинг)
//! - NetId sender (entity, чьё это состояние)
//! - SyncMessage

use serde::{Deserialize, Serialize};

use crate::ai::RobeState;
use crate::components::NetId;
use crate::error::SyncError;

pub const PROTOCOL_VERSION: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SyncMessage {
    /// Transition на authority (state + новый StateTimer)
    SetState { state: RobeState, timer: f32 },
    /// Focus / target valuable (None = "нет ссылки")
    SyncFields {
        focus: Option<NetId>,
        target_valuable: Option<NetId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncEnvelope {
    pub version: u16,
    pub sender: NetId,
    pub message: SyncMessage,
}

impl SyncEnvelope {
    pub fn new(sender: NetId, message: SyncMessage) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            sender,
            message,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, SyncError> {
        bincode::serialize(self).map_err(|e| SyncError::Encode(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SyncError> {
        // Сначала только версия (trailing bytes допустимы)
        let version: u16 = bincode::deserialize(bytes).map_err(|e| SyncError::Decode(e.to_string()))?;
        if version != PROTOCOL_VERSION {
            return Err(SyncError::UnsupportedVersion {
                found: version,
                expected: PROTOCOL_VERSION,
            });
        }

        bincode::deserialize(bytes).map_err(|e| SyncError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_wire_roundtrip() {
        let envelope = SyncEnvelope::new(
            NetId(42),
            SyncMessage::SyncFields {
                focus: Some(NetId(7)),
                target_valuable: None,
            },
        );

        let bytes = envelope.encode().expect("encode");
        let decoded = SyncEnvelope::decode(&bytes).expect("decode");
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_future_version_rejected() {
        let mut envelope = SyncEnvelope::new(
            NetId(1),
            SyncMessage::SetState {
                state: RobeState::Chase,
                timer: 12.0,
            },
        );
        envelope.version = PROTOCOL_VERSION + 1;

        let bytes = envelope.encode().expect("encode");
        let result = SyncEnvelope::decode(&bytes);
        assert!(matches!(
            result,
            Err(SyncError::UnsupportedVersion { found, expected }) if found == PROTOCOL_VERSION + 1 && expected == PROTOCOL_VERSION
        ));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let bytes = SyncEnvelope::new(
            NetId(1),
            SyncMessage::SetState {
                state: RobeState::GiveSpace,
                timer: 2.0,
            },
        )
        .encode()
        .expect("encode");

        assert!(matches!(SyncEnvelope::decode(&bytes[..bytes.len() - 3]), Err(SyncError::Decode(_))));
        assert!(matches!(SyncEnvelope::decode(&[]), Err(SyncError::Decode(_))));
    }
}
