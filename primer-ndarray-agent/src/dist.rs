//! Distributions over discrete actions.
mod categorical;
pub use categorical::Categorical;
