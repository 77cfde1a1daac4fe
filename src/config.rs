//! Simulator configuration.
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! min_processes = 1
//! max_processes = 10
//! step_mode = "event-driven"   # or "tick"
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scheduler::StepMode;

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Smallest accepted batch size.
    pub min_processes: usize,
    /// Largest accepted batch size.
    pub max_processes: usize,
    /// How the scheduler advances its clock.
    pub step_mode: StepMode,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            min_processes: 1,
            max_processes: 10,
            step_mode: StepMode::default(),
        }
    }
}

impl SimulatorConfig {
    /// Parses and checks a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded configuration from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    /// Accepted batch sizes.
    pub fn process_range(&self) -> RangeInclusive<usize> {
        self.min_processes..=self.max_processes
    }

    fn check(&self) -> Result<()> {
        if self.min_processes == 0 {
            return Err(Error::Config("min_processes must be at least 1".into()));
        }
        if self.min_processes > self.max_processes {
            return Err(Error::Config(format!(
                "min_processes ({}) exceeds max_processes ({})",
                self.min_processes, self.max_processes
            )));
        }
        Ok(())
    }
}
