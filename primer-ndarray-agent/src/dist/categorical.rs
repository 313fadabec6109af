//! Categorical distribution parameterized by logits.
use crate::PgError;
use ndarray::{Array1, Array2};
use rand::{distributions::WeightedIndex, Rng};

/// A batch of categorical distributions over discrete events.
///
/// Each row of the logits parameterizes one distribution. Logits are
/// normalized once at construction, so queries work on log-probabilities.
#[derive(Clone, Debug)]
pub struct Categorical {
    log_probs: Array2<f32>,
}

impl Categorical {
    /// Builds the distribution from unnormalized logits, one row per sample.
    pub fn from_logits(logits: Array2<f32>) -> Self {
        Self {
            log_probs: log_softmax(logits),
        }
    }

    /// Number of distributions (rows).
    pub fn len(&self) -> usize {
        self.log_probs.nrows()
    }

    /// Returns `true` if the batch holds no distributions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of events per distribution.
    pub fn n_events(&self) -> usize {
        self.log_probs.ncols()
    }

    /// Log-probabilities of the distributions, one row per sample.
    pub fn log_probs(&self) -> &Array2<f32> {
        &self.log_probs
    }

    /// Log-probability of one event per row.
    pub fn log_prob(&self, events: &[i64]) -> Result<Array1<f32>, PgError> {
        if events.len() != self.len() {
            return Err(PgError::LengthMismatch {
                what: "events",
                expected: self.len(),
                actual: events.len(),
            });
        }
        let n_events = self.n_events();
        let mut out = Vec::with_capacity(events.len());
        for (row, &event) in self.log_probs.rows().into_iter().zip(events.iter()) {
            if event < 0 || event as usize >= n_events {
                return Err(PgError::EventIndexOutOfRange {
                    index: event,
                    n_events,
                });
            }
            out.push(row[event as usize]);
        }
        Ok(Array1::from(out))
    }

    /// Entropy of each row in nats.
    pub fn entropy(&self) -> Array1<f32> {
        self.log_probs
            .rows()
            .into_iter()
            .map(|row| {
                -row.iter()
                    .map(|&lp| {
                        let p = lp.exp();
                        if p > 0.0 {
                            p * lp
                        } else {
                            0.0
                        }
                    })
                    .sum::<f32>()
            })
            .collect()
    }

    /// Kullback-Leibler divergence `KL(self || other)` per row.
    pub fn kl(&self, other: &Categorical) -> Result<Array1<f32>, PgError> {
        if self.len() != other.len() {
            return Err(PgError::LengthMismatch {
                what: "other distribution",
                expected: self.len(),
                actual: other.len(),
            });
        }
        if self.n_events() != other.n_events() {
            return Err(PgError::LengthMismatch {
                what: "other distribution events",
                expected: self.n_events(),
                actual: other.n_events(),
            });
        }
        let kl = self
            .log_probs
            .rows()
            .into_iter()
            .zip(other.log_probs.rows())
            .map(|(p_row, q_row)| {
                p_row
                    .iter()
                    .zip(q_row.iter())
                    .map(|(&lp, &lq)| {
                        let p = lp.exp();
                        if p > 0.0 {
                            p * (lp - lq)
                        } else {
                            0.0
                        }
                    })
                    .sum::<f32>()
            })
            .collect();
        Ok(kl)
    }

    /// Draws one event per row.
    pub fn sample(&self, rng: &mut impl Rng) -> Vec<i64> {
        self.log_probs
            .rows()
            .into_iter()
            .map(|row| {
                let probs = row.iter().map(|lp| lp.exp()).collect::<Vec<_>>();
                rng.sample(WeightedIndex::new(&probs).unwrap()) as i64
            })
            .collect()
    }

    /// Most probable event per row. Ties resolve to the lowest index.
    pub fn best(&self) -> Vec<i64> {
        self.log_probs
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = 0usize;
                let mut best_lp = f32::NEG_INFINITY;
                for (ix, &lp) in row.iter().enumerate() {
                    if lp > best_lp {
                        best = ix;
                        best_lp = lp;
                    }
                }
                best as i64
            })
            .collect()
    }
}

/// Row-wise log-softmax, shifted by the row maximum for stability.
fn log_softmax(mut logits: Array2<f32>) -> Array2<f32> {
    for mut row in logits.rows_mut() {
        let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| v - max);
        let lse = row.fold(0f32, |s, &v| s + v.exp()).ln();
        row.mapv_inplace(|v| v - lse);
    }
    logits
}
