//! Runtime configuration.
//!
//! # Responsibility
//! - Hold the named constants that drive seed history generation.
//! - Read process configuration (log level, log directory, seed) from the
//!   environment with build-mode defaults.
//!
//! # Invariants
//! - Probabilities are within `0.0..=1.0`.
//! - A configured log directory is absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Number of days before today covered by generated history.
pub const HISTORY_DAYS: u32 = 30;
/// Chance that a past day gets a log at all. Today is always logged.
pub const DAY_INCLUSION_PROBABILITY: f64 = 0.75;
/// Chance that each catalog stone is completed on a generated day.
pub const STONE_COMPLETION_PROBABILITY: f64 = 0.6;
/// Days whose offset from today is a multiple of this carry a note.
pub const NOTE_EVERY_NTH_DAY: u32 = 5;
/// Note text attached to generated days.
pub const SEED_NOTE_TEXT: &str = "Felt great today, making progress on handstands";

pub const ENV_LOG_LEVEL: &str = "STONETRACK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "STONETRACK_LOG_DIR";
pub const ENV_SEED: &str = "STONETRACK_SEED";

/// Parameters of the generated training history.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedConfig {
    pub history_days: u32,
    pub day_inclusion_probability: f64,
    pub stone_completion_probability: f64,
    /// `0` disables generated notes.
    pub note_every_nth_day: u32,
    pub note_text: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            history_days: HISTORY_DAYS,
            day_inclusion_probability: DAY_INCLUSION_PROBABILITY,
            stone_completion_probability: STONE_COMPLETION_PROBABILITY,
            note_every_nth_day: NOTE_EVERY_NTH_DAY,
            note_text: SEED_NOTE_TEXT.to_string(),
        }
    }
}

impl SeedConfig {
    /// Returns probabilities clamped into `0.0..=1.0`.
    ///
    /// `rand::Rng::gen_bool` panics outside that range, so generation always
    /// goes through this.
    pub(crate) fn clamped(&self) -> (f64, f64) {
        (
            clamp_probability(self.day_inclusion_probability),
            clamp_probability(self.stone_completion_probability),
        )
    }
}

fn clamp_probability(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Configuration errors surfaced at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidSeed(String),
    InvalidLogLevel(String),
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSeed(value) => {
                write!(f, "{ENV_SEED} must be an unsigned integer, got `{value}`")
            }
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG_LEVEL}: {message}"),
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Process-level settings for binaries embedding the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: &'static str,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// `None` seeds the history generator from entropy.
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(value) => normalize_level(&value).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = match read(ENV_LOG_DIR) {
            Some(value) if Path::new(&value).is_absolute() => Some(PathBuf::from(value)),
            Some(value) => return Err(ConfigError::RelativeLogDir(value)),
            None => None,
        };

        let seed = read(ENV_SEED)
            .map(|value| value.parse::<u64>().map_err(|_| ConfigError::InvalidSeed(value)))
            .transpose()?;

        Ok(Self {
            log_level,
            log_dir,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, SeedConfig, ENV_LOG_DIR, ENV_LOG_LEVEL, ENV_SEED};
    use crate::logging::default_log_level;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn values_are_trimmed_and_normalized() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_LOG_LEVEL, " WARNING "),
            (ENV_SEED, " 42 "),
            (ENV_LOG_DIR, "   "),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_SEED, "abc")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidSeed("abc".to_string()));

        let err = AppConfig::from_lookup(lookup_from(&[(ENV_LOG_DIR, "logs")])).unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir("logs".to_string()));

        let err = AppConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }

    #[test]
    fn seed_probabilities_are_clamped() {
        let config = SeedConfig {
            day_inclusion_probability: 1.7,
            stone_completion_probability: f64::NAN,
            ..SeedConfig::default()
        };
        assert_eq!(config.clamped(), (1.0, 0.0));
    }
}
