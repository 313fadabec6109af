//! Errors of the guessing environment.
use thiserror::Error;

/// Errors of the guessing environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GuessNumberError {
    /// The configured range is empty.
    #[error("invalid guessing range: low ({low}) exceeds high ({high})")]
    InvalidRange {
        /// Lower bound of the range.
        low: i64,
        /// Upper bound of the range.
        high: i64,
    },

    /// A guess outside the configured range.
    ///
    /// The environment rejects the action before mutating any episode state.
    #[error("guess {guess} is outside the range [{low}, {high}]")]
    ActionOutOfRange {
        /// The rejected guess.
        guess: i64,
        /// Lower bound of the range.
        low: i64,
        /// Upper bound of the range.
        high: i64,
    },
}
