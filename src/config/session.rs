//! Session timing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Heartbeat, bet and handshake timings, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_ms: u64,

    /// How long a dispatched leg may stay pending
    #[serde(default = "default_bet_timeout")]
    pub bet_timeout_ms: u64,

    /// Delay between settlement and removal of the bet record
    #[serde(default = "default_bet_cleanup_grace")]
    pub bet_cleanup_grace_ms: u64,

    /// Deadline for the first frame on a new socket
    #[serde(default = "default_handshake_timeout")]
    pub handshake_timeout_ms: u64,
}

impl SessionConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    pub fn bet_timeout(&self) -> Duration {
        Duration::from_millis(self.bet_timeout_ms)
    }

    pub fn bet_cleanup_grace(&self) -> Duration {
        Duration::from_millis(self.bet_cleanup_grace_ms)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("heartbeat_interval_ms", self.heartbeat_interval_ms),
            ("bet_timeout_ms", self.bet_timeout_ms),
            ("bet_cleanup_grace_ms", self.bet_cleanup_grace_ms),
            ("handshake_timeout_ms", self.handshake_timeout_ms),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(ValidationError::ZeroDuration(name));
            }
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_ms: default_heartbeat_interval(),
            bet_timeout_ms: default_bet_timeout(),
            bet_cleanup_grace_ms: default_bet_cleanup_grace(),
            handshake_timeout_ms: default_handshake_timeout(),
        }
    }
}

fn default_heartbeat_interval() -> u64 {
    10_000
}

fn default_bet_timeout() -> u64 {
    10_000
}

fn default_bet_cleanup_grace() -> u64 {
    2_000
}

fn default_handshake_timeout() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(10));
        assert_eq!(config.bet_timeout(), Duration::from_secs(10));
        assert_eq!(config.bet_cleanup_grace(), Duration::from_secs(2));
        assert_eq!(config.handshake_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let config = SessionConfig {
            bet_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::ZeroDuration("bet_timeout_ms"))
        );
    }
}
