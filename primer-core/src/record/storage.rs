//! Storing and aggregating records.
use super::{Record, RecordValue};
use std::collections::HashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// Accumulates records and aggregates them into a single record.
///
/// Scalar series are summarized with min/max/mean/median; a series of length
/// one keeps its key unchanged. For non-scalar values the latest record wins.
pub struct RecordStorage {
    data: Vec<Record>,
}

fn min(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(*vs.iter().min_by(|x, y| x.total_cmp(y)).unwrap())
}

fn max(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(*vs.iter().max_by(|x, y| x.total_cmp(y)).unwrap())
}

fn mean(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().sum::<f32>() / vs.len() as f32)
}

/// Sorts the values and takes the middle element.
fn median(mut vs: Vec<f32>) -> RecordValue {
    vs.sort_by(|x, y| x.total_cmp(y));
    RecordValue::Scalar(vs[vs.len() / 2])
}

impl RecordStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    /// Stores a record.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    fn keys(&self) -> HashSet<String, Xxh3Builder> {
        let mut keys = HashSet::<String, Xxh3Builder>::default();
        for record in self.data.iter() {
            for k in record.keys() {
                keys.insert(k.clone());
            }
        }
        keys
    }

    /// The latest value seen for the key, whatever its type.
    fn latest(&self, key: &str) -> Record {
        for record in self.data.iter().rev() {
            if let Some(value) = record.get(key) {
                return Record::from_slice(&[(key, value.clone())]);
            }
        }
        panic!("Key '{}' was not found.", key);
    }

    fn scalar(&self, key: &str) -> Record {
        let vs: Vec<f32> = self
            .data
            .iter()
            .filter_map(|record| match record.get(key) {
                Some(RecordValue::Scalar(v)) => Some(*v),
                Some(_) => panic!("Expect RecordValue::Scalar for {}", key),
                None => None,
            })
            .collect();

        if vs.len() == 1 {
            Record::from_slice(&[(key, RecordValue::Scalar(vs[0]))])
        } else {
            Record::from_slice(&[
                (format!("{}_min", key), min(&vs)),
                (format!("{}_max", key), max(&vs)),
                (format!("{}_mean", key), mean(&vs)),
                (format!("{}_median", key), median(vs)),
            ])
        }
    }

    /// Aggregates all stored records and clears the storage.
    pub fn aggregate(&mut self) -> Record {
        let mut record = Record::empty();

        for key in self.keys().iter() {
            let r = match self.find(key) {
                RecordValue::Scalar(..) => self.scalar(key),
                _ => self.latest(key),
            };
            record = record.merge(r);
        }

        self.data = vec![];

        record
    }

    /// The first occurrence of a value for the key.
    fn find(&self, key: &str) -> &RecordValue {
        for record in self.data.iter() {
            if let Some(value) = record.get(key) {
                return value;
            }
        }
        panic!("Key '{}' was not found.", key);
    }
}

impl Default for RecordStorage {
    fn default() -> Self {
        Self::new()
    }
}
