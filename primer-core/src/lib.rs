#![warn(missing_docs)]
//! Core abstractions for episodic reinforcement learning.
//!
//! This crate defines the interfaces shared by the other `primer` crates:
//! environments ([`Env`]), observations ([`Obs`]), actions ([`Act`]),
//! policies ([`Policy`]) and the transition object emitted at every
//! interaction step ([`Step`]). Diagnostics produced along the way are
//! carried in [`record::Record`] objects and consumed through the
//! [`record::Recorder`] trait.
//!
//! No trainer, replay buffer or optimizer lives here. Policies are sampled,
//! not optimized; the [`Evaluator`] runs episodes and reports returns.
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Configurable, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
