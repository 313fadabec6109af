//! Evaluate [`Policy`].
use crate::{record::Record, Env, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate [`Policy`].
pub trait Evaluator<E: Env, P: Policy<E>> {
    /// Runs evaluation episodes and reports the result as a [`Record`].
    ///
    /// The caller of this method needs to handle the internal state of
    /// `policy`, like train/eval mode, before calling.
    fn evaluate(&mut self, policy: &mut P) -> Result<Record>;
}
