//! Action of [`GuessNumberEnv`](crate::GuessNumberEnv).
use primer_core::Act;

/// Action of [`GuessNumberEnv`](crate::GuessNumberEnv): a guessed integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessAct {
    /// The guessed value.
    pub guess: i64,
}

impl GuessAct {
    /// Constructs an action.
    pub fn new(guess: i64) -> Self {
        Self { guess }
    }
}

impl Act for GuessAct {}

impl From<i64> for GuessAct {
    fn from(guess: i64) -> Self {
        Self { guess }
    }
}
