//! Process configuration for core components.
//!
//! # Responsibility
//! - Hold the knobs adapters use to assemble the registry and its gate.
//! - Reject settings that would produce a gate or logger that cannot work.

use crate::logging::{default_log_level, normalize_level};
use crate::repo::task_repo::InMemoryTaskRepository;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroInterval,
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "create interval must be greater than zero"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one registry instance and its process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// Minimum spacing between accepted creates; `None` disables the gate.
    pub create_interval: Option<Duration>,
    /// Start with the fixture records instead of an empty registry.
    pub seed_fixtures: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            create_interval: None,
            seed_fixtures: true,
        }
    }
}

impl CoreConfig {
    /// Checks the configuration without side effects.
    ///
    /// # Errors
    /// - `ZeroInterval` when `create_interval` is `Some(0)`.
    /// - `InvalidLogLevel` when `log_level` is not a supported level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.create_interval == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroInterval);
        }
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }

    /// Builds the repository this configuration describes.
    pub fn repository(&self) -> InMemoryTaskRepository {
        if self.seed_fixtures {
            InMemoryTaskRepository::seeded()
        } else {
            InMemoryTaskRepository::new()
        }
    }
}
