//! Stochastic policy driven by a policy model.
use crate::{
    dist::Categorical,
    policy::{PgModel, PolicyModel, PolicyModelConfig},
};
use anyhow::Result;
use log::info;
use ndarray::Array1;
use primer_core::{Configurable, Env, Policy};
use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    marker::PhantomData,
    path::Path,
};

/// Configuration of [`StochasticPolicy`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct StochasticPolicyConfig {
    /// The model driving action selection.
    pub model: PolicyModelConfig,
    /// Samples actions when `true`, otherwise picks the most probable one.
    pub train: bool,
    /// Seed of the sampling rng.
    pub seed: u64,
}

impl StochasticPolicyConfig {
    /// Creates a training-mode configuration for the given model.
    pub fn new(model: PolicyModelConfig) -> Self {
        Self {
            model,
            train: true,
            seed: 42,
        }
    }

    /// Sets the action selection mode.
    pub fn train(mut self, train: bool) -> Self {
        self.train = train;
        self
    }

    /// Sets the seed of the sampling rng.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
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
        info!("Saved the policy configuration to {}", path.as_ref().display());
        Ok(())
    }
}

/// A policy that draws actions from the distribution of a [`PgModel`].
///
/// In training mode actions are sampled from the logits of
/// [`forward_exploration`](PolicyModel::forward_exploration). In evaluation
/// mode the most probable action of
/// [`forward_inference`](PolicyModel::forward_inference) is taken.
///
/// The selected event index is handed to `E::Act: From<i64>` as is, so the
/// environment's action values must be the indices `0..n_actions`.
pub struct StochasticPolicy<E> {
    model: PgModel,
    train: bool,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E> StochasticPolicy<E> {
    /// The policy model.
    pub fn model(&self) -> &PgModel {
        &self.model
    }

    /// Mutable access to the policy model for external parameter updates.
    pub fn model_mut(&mut self) -> &mut PgModel {
        &mut self.model
    }

    /// Switches to sampled action selection.
    pub fn train(&mut self) {
        self.train = true;
    }

    /// Switches to greedy action selection.
    pub fn eval(&mut self) {
        self.train = false;
    }
}

impl<E> Policy<E> for StochasticPolicy<E>
where
    E: Env,
    E::Obs: Into<Array1<f32>>,
    E::Act: From<i64>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let features: Array1<f32> = obs.clone().into();
        let len = features.len();
        let features = features.into_shape((1, len)).unwrap();
        let act = if self.train {
            let logits = self.model.forward_exploration(&features).unwrap();
            Categorical::from_logits(logits).sample(&mut self.rng)[0]
        } else {
            let logits = self.model.forward_inference(&features).unwrap();
            Categorical::from_logits(logits).best()[0]
        };
        act.into()
    }
}

impl<E> Configurable<E> for StochasticPolicy<E>
where
    E: Env,
{
    type Config = StochasticPolicyConfig;

    fn build(config: Self::Config) -> Self {
        Self {
            model: config.model.build(),
            train: config.train,
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        }
    }
}
