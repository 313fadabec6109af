//! Errors of this crate.
use thiserror::Error;

/// Errors raised while building batches or evaluating the objective.
#[derive(Debug, Error, PartialEq)]
pub enum PgError {
    /// Two inputs that must share a length do not.
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Name of the offending input.
        what: &'static str,
        /// Length implied by the rest of the batch.
        expected: usize,
        /// Length actually given.
        actual: usize,
    },

    /// An event index does not address a category of the distribution.
    #[error("event index {index} is out of range for {n_events} events")]
    EventIndexOutOfRange {
        /// The offending index.
        index: i64,
        /// Number of categories per row.
        n_events: usize,
    },

    /// An observation addresses a row outside the lookup tables.
    #[error("state index {index} is out of range for {n_states} table rows")]
    StateIndexOutOfRange {
        /// The offending index.
        index: i64,
        /// Number of rows in the tables.
        n_states: usize,
    },

    /// Every timestep is masked out, so the masked mean is undefined.
    #[error("all timesteps are masked out, the masked mean is undefined")]
    EmptyLossMask,

    /// The clip range must be a proper fraction.
    #[error("clip_epsilon must lie in (0, 1), got {0}")]
    InvalidClipEpsilon(f64),

    /// A loss coefficient is outside its domain.
    #[error("{name} must be non-negative, got {value}")]
    InvalidCoefficient {
        /// Name of the configuration field.
        name: &'static str,
        /// Value actually given.
        value: f64,
    },
}
