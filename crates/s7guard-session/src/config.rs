use std::time::Duration;

use s7guard_frame::DEFAULT_AUDIT_CAPACITY;
use serde::{Deserialize, Serialize};

/// PDU size assumed until the handshake reports the negotiated value.
pub const DEFAULT_MAX_PDU_SIZE: usize = 240;

/// Default read and write timeout applied to an attached stream.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Session guard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Negotiated maximum PDU size in bytes.
    pub max_pdu_size: usize,
    /// Capture exchanged frames in the audit trail.
    pub audit_enabled: bool,
    /// Maximum number of frames the audit trail retains.
    pub audit_capacity: usize,
    /// Read timeout mirrored onto the attached stream.
    pub read_timeout: Option<Duration>,
    /// Write timeout mirrored onto the attached stream.
    pub write_timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_pdu_size: DEFAULT_MAX_PDU_SIZE,
            audit_enabled: true,
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
            read_timeout: Some(DEFAULT_TIMEOUT),
            write_timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.max_pdu_size, 240);
        assert!(config.audit_enabled);
        assert_eq!(config.audit_capacity, 1000);
        assert_eq!(config.read_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.write_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn deserializes_from_json() {
        let config: SessionConfig = serde_json::from_str(
            r#"{
                "max_pdu_size": 960,
                "audit_enabled": false,
                "audit_capacity": 64,
                "read_timeout": { "secs": 2, "nanos": 0 },
                "write_timeout": null
            }"#,
        )
        .unwrap();

        assert_eq!(config.max_pdu_size, 960);
        assert!(!config.audit_enabled);
        assert_eq!(config.audit_capacity, 64);
        assert_eq!(config.read_timeout, Some(Duration::from_secs(2)));
        assert_eq!(config.write_timeout, None);
    }
}
