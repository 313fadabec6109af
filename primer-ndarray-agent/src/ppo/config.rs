//! Configuration of the objective.
use crate::PgError;
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`clipped_surrogate_loss`](super::clipped_surrogate_loss).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PpoLossConfig {
    /// Half-width of the clip range for the probability ratio.
    /// Must lie in `(0, 1)`.
    pub clip_epsilon: f64,
    /// Upper bound on the per-timestep squared value error.
    pub value_clip: f64,
    /// Weight of the value loss term.
    pub value_loss_coef: f64,
    /// Weight of the entropy bonus.
    pub entropy_coef: f64,
    /// Weight of the KL penalty. Zero disables the penalty.
    pub kl_coef: f64,
    /// Whether the value loss term participates at all.
    pub use_value_loss: bool,
}

impl Default for PpoLossConfig {
    fn default() -> Self {
        Self {
            clip_epsilon: 0.2,
            value_clip: 10.0,
            value_loss_coef: 1.0,
            entropy_coef: 0.0,
            kl_coef: 0.0,
            use_value_loss: true,
        }
    }
}

impl PpoLossConfig {
    /// Sets the clip range.
    pub fn clip_epsilon(mut self, v: f64) -> Self {
        self.clip_epsilon = v;
        self
    }

    /// Sets the value error bound.
    pub fn value_clip(mut self, v: f64) -> Self {
        self.value_clip = v;
        self
    }

    /// Sets the weight of the value loss term.
    pub fn value_loss_coef(mut self, v: f64) -> Self {
        self.value_loss_coef = v;
        self
    }

    /// Sets the weight of the entropy bonus.
    pub fn entropy_coef(mut self, v: f64) -> Self {
        self.entropy_coef = v;
        self
    }

    /// Sets the weight of the KL penalty.
    pub fn kl_coef(mut self, v: f64) -> Self {
        self.kl_coef = v;
        self
    }

    /// Enables or disables the value loss term.
    pub fn use_value_loss(mut self, v: bool) -> Self {
        self.use_value_loss = v;
        self
    }

    /// Checks that every field lies in its domain.
    pub fn validate(&self) -> Result<(), PgError> {
        if !(self.clip_epsilon > 0.0 && self.clip_epsilon < 1.0) {
            return Err(PgError::InvalidClipEpsilon(self.clip_epsilon));
        }
        for (name, value) in [
            ("value_clip", self.value_clip),
            ("value_loss_coef", self.value_loss_coef),
            ("entropy_coef", self.entropy_coef),
            ("kl_coef", self.kl_coef),
        ] {
            if !(value >= 0.0) {
                return Err(PgError::InvalidCoefficient { name, value });
            }
        }
        Ok(())
    }

    /// Constructs the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(&path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Saved the loss configuration to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_validate() {
        assert!(PpoLossConfig::default().validate().is_ok());
        assert_eq!(
            PpoLossConfig::default().clip_epsilon(0.0).validate(),
            Err(PgError::InvalidClipEpsilon(0.0))
        );
        assert_eq!(
            PpoLossConfig::default().clip_epsilon(1.0).validate(),
            Err(PgError::InvalidClipEpsilon(1.0))
        );
        assert_eq!(
            PpoLossConfig::default().entropy_coef(-0.5).validate(),
            Err(PgError::InvalidCoefficient {
                name: "entropy_coef",
                value: -0.5,
            })
        );
    }

    #[test]
    fn test_yaml_roundtrip() -> Result<()> {
        let dir = TempDir::new("ppo_loss_config")?;
        let path = dir.path().join("loss.yaml");
        let config = PpoLossConfig::default()
            .clip_epsilon(0.3)
            .entropy_coef(0.01)
            .use_value_loss(false);
        config.save(&path)?;
        assert_eq!(PpoLossConfig::load(&path)?, config);
        Ok(())
    }
}
