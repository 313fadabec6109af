//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// Every stepping method is fallible: environments validate actions against
/// their action range before touching any episode state, and an invalid
/// action is reported to the caller instead of being applied.
pub trait Env {
    /// Configuration of the environment.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Performs an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Resets the environment if `is_done[0] == 1` or `is_done.is_none()`.
    ///
    /// Old versions of the library supported vectorized environments and
    /// `is_done` was used to reset a part of them. Currently, vectorized
    /// environments are not supported and `is_done.len()` is expected to be 1.
    fn reset(&mut self, is_done: Option<&Vec<i8>>) -> Result<Self::Obs>;

    /// Performs an environment step and resets the environment if an episode ends.
    ///
    /// The observation of the reset episode is placed in [`Step::init_obs`].
    fn step_with_reset(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Resets the environment with a given index.
    ///
    /// The index is used in an arbitrary way. For example, it can be used as
    /// a random seed, which is useful for reproducible evaluation runs.
    /// [`DefaultEvaluator`](crate::DefaultEvaluator) calls this method with
    /// the episode index.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs>;
}
