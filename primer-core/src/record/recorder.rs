//! Recorder trait.
use super::Record;

/// Writes records to an output destination.
///
/// [`Recorder::write`] emits a record immediately. Implementations that
/// summarize over time accept records with [`Recorder::store`] and emit the
/// aggregate on [`Recorder::flush`].
pub trait Recorder {
    /// Writes a record.
    fn write(&mut self, record: Record);

    /// Stores a record for later aggregation.
    fn store(&mut self, record: Record);

    /// Writes values aggregated from the stored records.
    ///
    /// `step` tells the recorder which interaction step the aggregate
    /// belongs to.
    fn flush(&mut self, step: i64);
}
