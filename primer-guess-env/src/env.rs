//! The number guessing environment.
use crate::{GuessAct, GuessNumberEnvConfig, GuessNumberError, GuessObs, Hint};
use anyhow::Result;
use log::info;
use primer_core::{record::Record, Env, Info, Step};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Empty struct.
#[derive(Debug)]
pub struct GuessInfo;

impl Info for GuessInfo {}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// An episodic environment hiding an integer target.
///
/// At every reset a target is drawn uniformly from the inclusive range
/// `[low, high]`. Each step compares the guess to the target:
///
/// ```mermaid
/// graph LR
///     S[Start] -- "guess < target" --> L[TooLow]
///     S -- "guess > target" --> H[TooHigh]
///     S -- "guess == target" --> C[Correct]
///     L --> C
///     H --> C
/// ```
///
/// Non-terminal steps earn reward `-1.0`; the terminating correct guess earns
/// `0.0`. Episodes are never truncated unless
/// [`GuessNumberEnvConfig::max_episode_steps`] is set. A guess outside the
/// range is an error and leaves the episode state untouched.
#[derive(Debug)]
pub struct GuessNumberEnv {
    low: i64,
    high: i64,
    max_episode_steps: Option<usize>,

    // Episode state.
    target: i64,
    hint: Hint,
    last_guess: i64,
    n_steps: usize,

    rng: SmallRng,
}

impl GuessNumberEnv {
    /// Lower bound of the guessing range (inclusive).
    pub fn low(&self) -> i64 {
        self.low
    }

    /// Upper bound of the guessing range (inclusive).
    pub fn high(&self) -> i64 {
        self.high
    }

    /// The hidden target of the current episode.
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Overrides the hidden target, for reproducible demonstrations.
    pub fn set_target(&mut self, target: i64) -> Result<()> {
        self.check_guess(target)?;
        self.target = target;
        Ok(())
    }

    fn check_guess(&self, guess: i64) -> Result<(), GuessNumberError> {
        if guess < self.low || guess > self.high {
            return Err(GuessNumberError::ActionOutOfRange {
                guess,
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    fn obs(&self) -> GuessObs {
        GuessObs::new(self.hint, self.last_guess)
    }

    fn reset_episode(&mut self) {
        self.target = self.rng.gen_range(self.low..=self.high);
        self.hint = Hint::Start;
        self.last_guess = 0;
        self.n_steps = 0;
    }
}

impl Env for GuessNumberEnv {
    type Config = GuessNumberEnvConfig;
    type Obs = GuessObs;
    type Act = GuessAct;
    type Info = GuessInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized,
    {
        if config.low > config.high {
            return Err(GuessNumberError::InvalidRange {
                low: config.low,
                high: config.high,
            }
            .into());
        }

        let mut env = Self {
            low: config.low,
            high: config.high,
            max_episode_steps: config.max_episode_steps,
            target: config.low,
            hint: Hint::Start,
            last_guess: 0,
            n_steps: 0,
            rng: SmallRng::seed_from_u64(seed as u64),
        };
        env.reset_episode();
        info!(
            "Built guessing environment over [{}, {}] with seed {}",
            env.low, env.high, seed
        );

        Ok(env)
    }

    fn reset(&mut self, is_done: Option<&Vec<i8>>) -> Result<Self::Obs> {
        match is_done {
            None => self.reset_episode(),
            Some(v) if v[0] == 1 => self.reset_episode(),
            _ => {}
        }
        Ok(self.obs())
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.rng = SmallRng::seed_from_u64(ix as u64);
        self.reset_episode();
        Ok(self.obs())
    }

    fn step(&mut self, act: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        // Validate before any state change.
        self.check_guess(act.guess)?;

        self.n_steps += 1;
        let hint = if act.guess < self.target {
            Hint::TooLow
        } else if act.guess > self.target {
            Hint::TooHigh
        } else {
            Hint::Correct
        };
        let terminated = hint == Hint::Correct;
        // Termination takes precedence over the step cap.
        let truncated =
            !terminated && self.max_episode_steps.map_or(false, |m| self.n_steps >= m);
        let reward = if terminated { 0.0 } else { -1.0 };

        self.hint = hint;
        self.last_guess = act.guess;

        let step = Step::new(
            self.obs(),
            act.clone(),
            vec![reward],
            vec![terminated as i8],
            vec![truncated as i8],
            GuessInfo,
            None,
        );

        Ok((step, Record::empty()))
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        let (mut step, record) = self.step(a)?;
        if step.is_done() {
            step.init_obs = Some(self.reset(None)?);
        }
        Ok((step, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primer_core::Obs;

    fn env_with_target(target: i64) -> GuessNumberEnv {
        let config = GuessNumberEnvConfig::default();
        let mut env = GuessNumberEnv::build(&config, 42).unwrap();
        env.set_target(target).unwrap();
        env
    }

    #[test]
    fn test_empty_range_rejected() {
        let config = GuessNumberEnvConfig::default().low(10).high(9);
        let err = GuessNumberEnv::build(&config, 0).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GuessNumberError>(),
            Some(&GuessNumberError::InvalidRange { low: 10, high: 9 })
        );
    }

    #[test]
    fn test_boundary_guesses_are_valid() {
        let mut env = env_with_target(50);
        assert!(env.step(&GuessAct::new(0)).is_ok());
        assert!(env.step(&GuessAct::new(100)).is_ok());
    }

    #[test]
    fn test_invalid_guess_leaves_state_untouched() {
        let mut env = env_with_target(50);
        let obs_before = env.obs();
        let target_before = env.target();

        let err = env.step(&GuessAct::new(101)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GuessNumberError>(),
            Some(&GuessNumberError::ActionOutOfRange {
                guess: 101,
                low: 0,
                high: 100
            })
        );
        assert_eq!(env.obs(), obs_before);
        assert_eq!(env.target(), target_before);
        assert_eq!(env.n_steps, 0);
    }

    #[test]
    fn test_reset_observation() {
        let mut env = env_with_target(50);
        env.step(&GuessAct::new(10)).unwrap();

        let obs = env.reset(None).unwrap();
        assert_eq!(obs, GuessObs::dummy(1));
    }
}
