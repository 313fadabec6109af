//! Records of values obtained during interaction and evaluation.
use crate::error::PrimerError;
use chrono::prelude::{DateTime, Local};
use std::{
    collections::{
        hash_map::{Iter, Keys},
        HashMap,
    },
    convert::Into,
};

/// Represents possible types of values in a [`Record`].
#[derive(Debug, Clone)]
pub enum RecordValue {
    /// A single floating-point value, typically a metric like a loss or a return.
    Scalar(f32),

    /// A timestamp with the local timezone.
    DateTime(DateTime<Local>),

    /// A 1-dimensional array of floating-point values.
    Array1(Vec<f32>),

    /// A 2-dimensional array with shape information.
    Array2(Vec<f32>, [usize; 2]),

    /// A 3-dimensional array with shape information.
    Array3(Vec<f32>, [usize; 3]),

    /// A text value.
    String(String),
}

/// A container of named values.
///
/// Keys are strings; values are [`RecordValue`]s. Typed getters return
/// [`PrimerError`] when a key is missing or holds a value of another type.
#[derive(Debug)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record with a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys of the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over key-value pairs of the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value of the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// On key collision the value of `record` wins.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Returns `true` if the record contains no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a scalar value of the given key.
    pub fn get_scalar(&self, k: &str) -> Result<f32, PrimerError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(PrimerError::RecordValueTypeError("Scalar".to_string())),
            None => Err(PrimerError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array of the given key.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, PrimerError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(PrimerError::RecordValueTypeError("Array1".to_string())),
            None => Err(PrimerError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 2-dimensional array of the given key with its shape.
    pub fn get_array2(&self, k: &str) -> Result<(Vec<f32>, [usize; 2]), PrimerError> {
        match self.0.get(k) {
            Some(RecordValue::Array2(v, s)) => Ok((v.clone(), *s)),
            Some(_) => Err(PrimerError::RecordValueTypeError("Array2".to_string())),
            None => Err(PrimerError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 3-dimensional array of the given key with its shape.
    pub fn get_array3(&self, k: &str) -> Result<(Vec<f32>, [usize; 3]), PrimerError> {
        match self.0.get(k) {
            Some(RecordValue::Array3(v, s)) => Ok((v.clone(), *s)),
            Some(_) => Err(PrimerError::RecordValueTypeError("Array3".to_string())),
            None => Err(PrimerError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value of the given key.
    pub fn get_string(&self, k: &str) -> Result<String, PrimerError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(PrimerError::RecordValueTypeError("String".to_string())),
            None => Err(PrimerError::RecordKeyError(k.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValue};

    #[test]
    fn test_scalar_access() {
        let mut record = Record::from_scalar("loss", 0.5);
        record.insert("entropy", RecordValue::Scalar(1.25));

        assert_eq!(record.get_scalar("loss").unwrap(), 0.5);
        assert_eq!(record.get_scalar("entropy").unwrap(), 1.25);
        assert!(record.get_scalar("unknown").is_err());
    }

    #[test]
    fn test_type_mismatch() {
        let record = Record::from_slice(&[("obs", RecordValue::Array1(vec![1.0, 2.0]))]);

        assert!(record.get_scalar("obs").is_err());
        assert_eq!(record.get_array1("obs").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_merge_overwrites() {
        let r1 = Record::from_scalar("loss", 1.0);
        let mut r2 = Record::from_scalar("loss", 2.0);
        r2.insert("kl", RecordValue::Scalar(0.1));

        let merged = r1.merge(r2);
        assert_eq!(merged.get_scalar("loss").unwrap(), 2.0);
        assert_eq!(merged.get_scalar("kl").unwrap(), 0.1);
    }
}
