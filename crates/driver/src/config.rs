//! Host configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_TICK_MS`: gravity interval in milliseconds (default: 800)
//! - `BLOCKFALL_SEED`: RNG seed for a reproducible game (default: clock-derived)
//! - `BLOCKFALL_FRAME_MS`: render/input poll interval (default: 16)
//! - `BLOCKFALL_LOG_PATH`: write logs to this file instead of stderr
//!
//! Missing or unparsable values fall back to the defaults.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use blockfall_types::{GameConfig, FRAME_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub game: GameConfig,
    pub seed: Option<u32>,
    pub frame_interval: Duration,
    pub log_path: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: None,
            frame_interval: Duration::from_millis(FRAME_MS as u64),
            log_path: None,
        }
    }
}

impl DriverConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let game = match parse_positive(lookup("BLOCKFALL_TICK_MS")) {
            Some(ms) => defaults.game.with_tick_interval_ms(ms),
            None => defaults.game,
        };

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let frame_interval = parse_positive(lookup("BLOCKFALL_FRAME_MS"))
            .map(|ms| Duration::from_millis(ms as u64))
            .unwrap_or(defaults.frame_interval);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            game,
            seed,
            frame_interval,
            log_path,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.game.tick_interval_ms as u64)
    }

    /// The configured seed, or one derived from the wall clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u32)
                .unwrap_or(1)
        })
    }
}

fn parse_positive(value: Option<String>) -> Option<u32> {
    value
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&v| v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = DriverConfig::from_lookup(|_| None);
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(800));
        assert_eq!(config.frame_interval, Duration::from_millis(16));
    }

    #[test]
    fn test_reads_overrides() {
        let config = DriverConfig::from_lookup(lookup_from(&[
            ("BLOCKFALL_TICK_MS", "250"),
            ("BLOCKFALL_SEED", " 42 "),
            ("BLOCKFALL_FRAME_MS", "33"),
            ("BLOCKFALL_LOG_PATH", "/tmp/blockfall.log"),
        ]));

        assert_eq!(config.game.tick_interval_ms, 250);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.resolve_seed(), 42);
        assert_eq!(config.frame_interval, Duration::from_millis(33));
        assert_eq!(config.log_path.as_deref(), Some("/tmp/blockfall.log"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = DriverConfig::from_lookup(lookup_from(&[
            ("BLOCKFALL_TICK_MS", "0"),
            ("BLOCKFALL_SEED", "soon"),
            ("BLOCKFALL_FRAME_MS", "-5"),
            ("BLOCKFALL_LOG_PATH", "   "),
        ]));

        assert_eq!(config, DriverConfig::default());
    }
}
