//! A number guessing environment for `primer`.
//!
//! The environment hides an integer target drawn uniformly from an inclusive
//! range and answers every guess with a [`Hint`]: too low, too high, or
//! correct. A correct guess terminates the episode with reward `0.0`; every
//! other step costs `-1.0`. Guesses outside the configured range are rejected
//! before any episode state changes.
//!
//! Here is an episode played by the uniform-random baseline policy:
//!
//! ```rust
//! use anyhow::Result;
//! use primer_core::{Env as _, Policy as _};
//! use primer_guess_env::{GuessNumberEnv, GuessNumberEnvConfig, RandomGuessPolicy};
//!
//! fn main() -> Result<()> {
//!     let config = GuessNumberEnvConfig::default();
//!     let mut env = GuessNumberEnv::build(&config, 42)?;
//!     let mut policy = RandomGuessPolicy::from_config(&config, 42);
//!
//!     let mut obs = env.reset(None)?;
//!     loop {
//!         let act = policy.sample(&obs);
//!         let (step, _) = env.step(&act)?;
//!         if step.is_done() {
//!             break;
//!         }
//!         obs = step.obs;
//!     }
//!     Ok(())
//! }
//! ```
mod act;
mod config;
mod env;
mod error;
mod obs;
mod policy;

pub use act::GuessAct;
pub use config::GuessNumberEnvConfig;
pub use env::{GuessInfo, GuessNumberEnv};
pub use error::GuessNumberError;
pub use obs::{GuessObs, Hint};
pub use policy::RandomGuessPolicy;
