//! Policies backed by a policy model.
mod base;
mod model;
pub use base::{StochasticPolicy, StochasticPolicyConfig};
pub use model::{PgModel, PolicyModel, PolicyModelConfig, TabularPolicyModel, UniformPolicyModel};
