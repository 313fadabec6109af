//! Utilities for loss arithmetic.
use crate::PgError;
use ndarray::Array1;

/// Mean of `values`, restricted to the timesteps where `mask` is `true`.
///
/// With no mask every timestep participates. Fails with
/// [`PgError::EmptyLossMask`] when no timestep participates, including the
/// case of an empty `values`.
pub fn masked_mean(values: &Array1<f32>, mask: Option<&[bool]>) -> Result<f32, PgError> {
    match mask {
        None => {
            if values.is_empty() {
                return Err(PgError::EmptyLossMask);
            }
            Ok(values.sum() / values.len() as f32)
        }
        Some(mask) => {
            if mask.len() != values.len() {
                return Err(PgError::LengthMismatch {
                    what: "loss_mask",
                    expected: values.len(),
                    actual: mask.len(),
                });
            }
            let mut sum = 0f32;
            let mut count = 0usize;
            for (v, m) in values.iter().zip(mask.iter()) {
                if *m {
                    sum += v;
                    count += 1;
                }
            }
            if count == 0 {
                return Err(PgError::EmptyLossMask);
            }
            Ok(sum / count as f32)
        }
    }
}

/// Fraction of the variance of `targets` explained by `preds`.
///
/// Returns `1.0` for a perfect fit and `0.0` for a predictor no better than
/// the mean of the targets. The result is floored at `-1.0`, which also
/// covers targets with zero variance.
pub fn explained_variance(targets: &Array1<f32>, preds: &Array1<f32>) -> f32 {
    let diff = targets - preds;
    let ev = 1.0 - variance(&diff) / variance(targets);
    ev.max(-1.0)
}

fn variance(xs: &Array1<f32>) -> f32 {
    let n = xs.len() as f32;
    let mean = xs.sum() / n;
    xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / n
}

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), PgError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PgError::LengthMismatch {
            what,
            expected,
            actual,
        })
    }
}
