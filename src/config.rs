use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tuning knobs for one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrackConfig {
    /// How long a worker runs before it reports progress and pauses.
    pub pause_interval_ms: u64,
    /// How long a worker sleeps after each progress report.
    pub pause_duration_ms: u64,
    /// Stop once the shared counter reaches this many attempts.
    pub max_attempts: Option<u64>,
    /// Reject a length that differs from the target's character count.
    pub strict_length: bool,
    /// Delay between announcing a target and starting to search (CLI only).
    pub timer_sleep_ms: u64,
}

impl Default for CrackConfig {
    fn default() -> Self {
        CrackConfig {
            pause_interval_ms: 10_000,
            pause_duration_ms: 3_000,
            max_attempts: None,
            strict_length: true,
            timer_sleep_ms: 5_000,
        }
    }
}

impl CrackConfig {
    pub fn pause_interval(&self) -> Duration {
        Duration::from_millis(self.pause_interval_ms)
    }

    pub fn pause_duration(&self) -> Duration {
        Duration::from_millis(self.pause_duration_ms)
    }

    pub fn timer_sleep(&self) -> Duration {
        Duration::from_millis(self.timer_sleep_ms)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        crate::io_utils::load_from_file(path)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        crate::io_utils::save_to_file(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrackConfig::default();
        assert_eq!(config.pause_interval(), Duration::from_secs(10));
        assert_eq!(config.pause_duration(), Duration::from_secs(3));
        assert_eq!(config.timer_sleep(), Duration::from_secs(5));
        assert_eq!(config.max_attempts, None);
        assert!(config.strict_length);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CrackConfig = serde_json::from_str(r#"{ "max_attempts": 100000000 }"#).unwrap();
        assert_eq!(config.max_attempts, Some(100_000_000));
        assert_eq!(config.pause_interval_ms, 10_000);
        assert!(config.strict_length);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crack_config.json");

        let config = CrackConfig {
            pause_interval_ms: 500,
            pause_duration_ms: 0,
            max_attempts: Some(1_000),
            strict_length: false,
            timer_sleep_ms: 0,
        };
        config.save_to_file(&path).unwrap();

        assert_eq!(CrackConfig::load_from_file(&path).unwrap(), config);
    }
}
