//! Observation of [`GuessNumberEnv`](crate::GuessNumberEnv).
use ndarray::{arr1, Array1};
use primer_core::Obs;
use serde::{Deserialize, Serialize};

/// The environment's answer to the latest guess.
///
/// `Start` only appears in the observation returned by a reset. The
/// discriminants are the discrete codes exposed to numeric policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Hint {
    /// No guess has been made in this episode yet.
    Start = 0,

    /// The last guess was below the target.
    TooLow = 1,

    /// The last guess hit the target; the episode is over.
    Correct = 2,

    /// The last guess was above the target.
    TooHigh = 3,
}

impl Hint {
    /// The discrete code of the hint.
    pub fn code(&self) -> i64 {
        *self as i64
    }
}

/// Observation of [`GuessNumberEnv`](crate::GuessNumberEnv).
///
/// `last_guess` is 0 in reset observations, where the `Start` hint marks it
/// as not yet meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessObs {
    /// Answer to the latest guess.
    pub hint: Hint,

    /// The latest guess.
    pub last_guess: i64,
}

impl GuessObs {
    /// Constructs an observation.
    pub fn new(hint: Hint, last_guess: i64) -> Self {
        Self { hint, last_guess }
    }
}

impl Obs for GuessObs {
    fn dummy(_n: usize) -> Self {
        Self {
            hint: Hint::Start,
            last_guess: 0,
        }
    }

    fn len(&self) -> usize {
        1
    }
}

/// Feature row for numeric policies: `[hint code, last guess]`.
impl From<GuessObs> for Array1<f32> {
    fn from(obs: GuessObs) -> Self {
        arr1(&[obs.hint.code() as f32, obs.last_guess as f32])
    }
}

#[cfg(test)]
mod tests {
    use super::{GuessObs, Hint};
    use ndarray::{arr1, Array1};

    #[test]
    fn test_hint_codes() {
        assert_eq!(Hint::Start.code(), 0);
        assert_eq!(Hint::TooLow.code(), 1);
        assert_eq!(Hint::Correct.code(), 2);
        assert_eq!(Hint::TooHigh.code(), 3);
    }

    #[test]
    fn test_feature_row() {
        let obs = GuessObs::new(Hint::TooHigh, 42);
        let features: Array1<f32> = obs.into();
        assert_eq!(features, arr1(&[3.0, 42.0]));
    }
}
