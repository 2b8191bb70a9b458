//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Default challenge validity period (seconds).
pub const DEFAULT_VALIDATION_WINDOW_SECS: u64 = 300;

/// Default trailing component of a challenge message.
pub const DEFAULT_CHALLENGE_SUFFIX: &str = "starRegistry";

/// Configuration for the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// How long a challenge stays valid. A submission with
    /// `now - issued_at >= validation_window_secs` is rejected.
    pub validation_window_secs: u64,
    /// Suffix of challenge messages: `<address>:<issued_at>:<suffix>`.
    pub challenge_suffix: String,
}

impl RegistryConfig {
    /// Set the challenge validity period.
    pub fn with_validation_window(mut self, secs: u64) -> Self {
        self.validation_window_secs = secs;
        self
    }

    /// Set the challenge suffix.
    pub fn with_challenge_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.challenge_suffix = suffix.into();
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            validation_window_secs: DEFAULT_VALIDATION_WINDOW_SECS,
            challenge_suffix: DEFAULT_CHALLENGE_SUFFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.validation_window_secs, 300);
        assert_eq!(config.challenge_suffix, "starRegistry");
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"validation_window_secs": 60}"#).unwrap();
        assert_eq!(config.validation_window_secs, 60);
        assert_eq!(config.challenge_suffix, DEFAULT_CHALLENGE_SUFFIX);
    }

    #[test]
    fn test_builders() {
        let config = RegistryConfig::default()
            .with_validation_window(10)
            .with_challenge_suffix("testRegistry");
        assert_eq!(config.validation_window_secs, 10);
        assert_eq!(config.challenge_suffix, "testRegistry");
    }
}
