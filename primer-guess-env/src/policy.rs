//! Uniform-random baseline policy.
use crate::{GuessAct, GuessNumberEnv, GuessNumberEnvConfig, GuessObs};
use primer_core::Policy;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// A policy guessing uniformly at random over the configured range.
///
/// The baseline every learned policy should beat.
pub struct RandomGuessPolicy {
    low: i64,
    high: i64,
    rng: SmallRng,
}

impl RandomGuessPolicy {
    /// Constructs the policy over the range of `config`.
    pub fn from_config(config: &GuessNumberEnvConfig, seed: u64) -> Self {
        Self {
            low: config.low,
            high: config.high,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Policy<GuessNumberEnv> for RandomGuessPolicy {
    fn sample(&mut self, _obs: &GuessObs) -> GuessAct {
        GuessAct::new(self.rng.gen_range(self.low..=self.high))
    }
}
