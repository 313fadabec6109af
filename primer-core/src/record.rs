//! Recording diagnostics of environments, policies and objective evaluators.
//!
//! A [`Record`] is a map from string keys to [`RecordValue`]s (scalars,
//! arrays, strings, timestamps). Components produce records; a [`Recorder`]
//! consumes them, either immediately with [`Recorder::write`] or through the
//! store-then-flush path backed by [`RecordStorage`], which aggregates scalar
//! series into min/max/mean/median summaries.
//!
//! ```rust
//! use primer_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(1.0));
//! record.insert("return", RecordValue::Scalar(-7.0));
//! assert_eq!(record.get_scalar("return").unwrap(), -7.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
pub use storage::RecordStorage;
