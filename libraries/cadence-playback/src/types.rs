//! Configuration for the playback controller

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Upper bound on a radio continuation lookup (default: 5000)
    pub radio_lookup_timeout_ms: u64,

    /// Buffered events per subscriber before lagging ones drop (default: 64)
    pub event_capacity: usize,
}

impl PlaybackConfig {
    /// Check every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.radio_lookup_timeout_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "radio_lookup_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(PlaybackError::InvalidConfig(
                "event_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn radio_lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.radio_lookup_timeout_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            radio_lookup_timeout_ms: 5000,
            event_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.radio_lookup_timeout(), Duration::from_secs(5));
        assert_eq!(config.event_capacity, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_values_rejected() {
        let config = PlaybackConfig {
            radio_lookup_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlaybackError::InvalidConfig(msg)) if msg.contains("radio_lookup_timeout_ms")
        ));

        let config = PlaybackConfig {
            event_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: PlaybackConfig =
            serde_json::from_str(r#"{"radio_lookup_timeout_ms": 250}"#).unwrap();
        assert_eq!(config.radio_lookup_timeout_ms, 250);
        assert_eq!(config.event_capacity, 64);
    }
}
