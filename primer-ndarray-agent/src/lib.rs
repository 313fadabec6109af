//! Policy-gradient components backed by [ndarray](https://crates.io/crates/ndarray).
//!
//! This crate provides the pieces needed to evaluate a clipped
//! policy-gradient objective on batches of experience collected from a
//! [`primer_core::Env`]:
//!
//! * [`RolloutBatch`], an immutable batch of transitions,
//! * [`dist::Categorical`], a distribution over discrete actions,
//! * [`ppo::clipped_surrogate_loss`], the objective itself,
//! * [`policy::StochasticPolicy`], a policy driven by a [`policy::PgModel`].
//!
//! Parameter updates are out of scope. The loss function is pure: it reads
//! its inputs, produces a scalar and a [`primer_core::record::Record`] of
//! diagnostics, and mutates nothing.
pub mod dist;
pub mod policy;
pub mod ppo;
pub mod util;
mod batch;
mod error;
pub use batch::RolloutBatch;
pub use error::PgError;
