//! Clipped policy-gradient objective.
mod config;
mod loss;
pub use config::PpoLossConfig;
pub use loss::clipped_surrogate_loss;
