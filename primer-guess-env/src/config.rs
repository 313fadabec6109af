//! Configuration of [`GuessNumberEnv`](crate::GuessNumberEnv).
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`GuessNumberEnv`](crate::GuessNumberEnv).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GuessNumberEnvConfig {
    /// Lower bound of the guessing range (inclusive).
    pub low: i64,

    /// Upper bound of the guessing range (inclusive).
    pub high: i64,

    /// Truncates episodes after this many steps. `None` never truncates.
    #[serde(default)]
    pub max_episode_steps: Option<usize>,
}

impl Default for GuessNumberEnvConfig {
    fn default() -> Self {
        Self {
            low: 0,
            high: 100,
            max_episode_steps: None,
        }
    }
}

impl GuessNumberEnvConfig {
    /// Sets the lower bound of the guessing range.
    pub fn low(mut self, v: i64) -> Self {
        self.low = v;
        self
    }

    /// Sets the upper bound of the guessing range.
    pub fn high(mut self, v: i64) -> Self {
        self.high = v;
        self
    }

    /// Sets the step count after which episodes are truncated.
    pub fn max_episode_steps(mut self, v: Option<usize>) -> Self {
        self.max_episode_steps = v;
        self
    }

    /// The number of valid guesses, `high - low + 1`.
    pub fn n_actions(&self) -> usize {
        (self.high - self.low + 1) as usize
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        info!(
            "Load config of guessing environment from {}",
            path.as_ref().display()
        );
        Ok(config)
    }

    /// Saves the configuration as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path.as_ref())?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!(
            "Save config of guessing environment into {}",
            path.as_ref().display()
        );
        Ok(())
    }
}
