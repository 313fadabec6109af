//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::Env;
pub use policy::{Configurable, Policy};
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Old versions of the library supported vectorized environments and an
/// observation object was able to hold multiple observations. In the current
/// version, no vectorized environment is implemented, so [`Obs::len()`]
/// always returns 1.
pub trait Obs: Clone + Debug {
    /// Returns a dummy observation.
    ///
    /// The observation created with this method is ignored.
    fn dummy(n: usize) -> Self;

    /// Returns the number of observations in the object.
    fn len(&self) -> usize;

    /// Returns `true` if the object holds no observation.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An action of an environment.
pub trait Act: Clone + Debug {}
