//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{record::Record, Env, Policy};
use anyhow::Result;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Runs a fixed number of episodes and reports the mean episode return.
///
/// Episode `ix` starts from [`Env::reset_with_index`] with `ix`, so repeated
/// evaluations see the same sequence of initial states. Within an episode the
/// entities interact as below until the step reports done:
///
/// ```mermaid
/// graph LR
///     Env --> Obs
///     Obs --> Policy
///     Policy --> Act
///     Act --> Env
/// ```
///
/// The mean return is reported under the key `"Episode return"`.
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run for each evaluation.
    n_episodes: usize,

    /// The environment used for evaluation.
    env: E,
}

impl<E, P> Evaluator<E, P> for DefaultEvaluator<E>
where
    E: Env,
    P: Policy<E>,
{
    fn evaluate(&mut self, policy: &mut P) -> Result<Record> {
        let mut r_total = 0f32;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act)?;
                r_total += step.reward[0];
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }
        }

        Ok(Record::from_scalar(
            "Episode return",
            r_total / self.n_episodes as f32,
        ))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs an evaluator with its own environment instance.
    ///
    /// `seed` is passed to [`Env::build`]; `n_episodes` is the number of
    /// episodes run by [`Evaluator::evaluate`].
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }
}
