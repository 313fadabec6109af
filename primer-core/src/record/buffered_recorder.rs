//! A recorder that keeps records in memory.
use super::{Record, RecordStorage, RecordValue, Recorder};

/// Buffered recorder.
///
/// Written records are kept in memory and can be inspected with
/// [`BufferedRecorder::iter`], which is used for recording sequences of
/// observations and actions during evaluation runs. Stored records go through
/// a [`RecordStorage`] and land in the buffer as one aggregated record per
/// flush.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
    storage: RecordStorage,
}

impl BufferedRecorder {
    /// Constructs the recorder.
    pub fn new() -> Self {
        Self {
            buf: Vec::default(),
            storage: RecordStorage::new(),
        }
    }

    /// Returns an iterator over the buffered records.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.buf.iter()
    }

    /// The number of buffered records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Recorder for BufferedRecorder {
    /// Writes a [`Record`] to the buffer.
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }

    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        let mut record = self.storage.aggregate();
        record.insert("step", RecordValue::Scalar(step as f32));
        self.buf.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::BufferedRecorder;
    use crate::record::{Record, Recorder};

    #[test]
    fn test_write_then_iter() {
        let mut recorder = BufferedRecorder::new();
        recorder.write(Record::from_scalar("reward", -1.0));
        recorder.write(Record::from_scalar("reward", 0.0));

        let rewards: Vec<f32> = recorder
            .iter()
            .map(|r| r.get_scalar("reward").unwrap())
            .collect();
        assert_eq!(rewards, vec![-1.0, 0.0]);
    }

    #[test]
    fn test_store_flush_aggregates() {
        let mut recorder = BufferedRecorder::new();
        recorder.store(Record::from_scalar("loss", 1.0));
        recorder.store(Record::from_scalar("loss", 3.0));
        recorder.flush(10);

        assert_eq!(recorder.len(), 1);
        let record = recorder.iter().next().unwrap();
        assert_eq!(record.get_scalar("loss_mean").unwrap(), 2.0);
        assert_eq!(record.get_scalar("step").unwrap(), 10.0);
    }
}
