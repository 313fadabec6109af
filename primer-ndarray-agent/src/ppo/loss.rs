//! The clipped surrogate objective.
use super::PpoLossConfig;
use crate::{
    dist::Categorical,
    util::{check_len, explained_variance, masked_mean},
    PgError, RolloutBatch,
};
use itertools::izip;
use ndarray::Array1;
use primer_core::record::{Record, RecordValue};

/// Evaluates the clipped policy-gradient objective on a batch of transitions.
///
/// `curr_dist` holds the action distributions of the policy being updated and
/// `behavior_dist` those of the policy that collected the batch, both with
/// one row per timestep. `value_pred` holds the current value estimates. The
/// probability ratio is taken against the log-probabilities stored in the
/// batch, so stale `behavior_dist` rows only affect the KL penalty.
///
/// The per-timestep loss is
///
/// ```text
/// - min(ratio * A, clamp(ratio, 1 - eps, 1 + eps) * A)
///   + value_loss_coef * min((v - v_target)^2, value_clip)
///   - entropy_coef * H(current)
///   + kl_coef * KL(behavior || current)
/// ```
///
/// averaged over the timesteps the loss mask keeps. The returned scalar is a
/// loss, so lower is better and an optimizer should minimize it.
///
/// Alongside the scalar, the diagnostics record carries:
///
/// * `loss`: the returned scalar,
/// * `loss_policy`: the clipped policy term,
/// * `loss_policy_unclipped`: the policy term without clipping,
/// * `loss_value`: the value term before weighting,
/// * `entropy`: mean entropy of `curr_dist`,
/// * `kl`: mean `KL(behavior || current)`, `0.0` while the penalty is off,
/// * `explained_variance`: fit of `value_pred` against the value targets.
///
/// The function is pure. It mutates none of its inputs and holds no state,
/// so evaluating the same inputs twice yields the same outputs.
pub fn clipped_surrogate_loss(
    batch: &RolloutBatch,
    curr_dist: &Categorical,
    behavior_dist: &Categorical,
    value_pred: &Array1<f32>,
    config: &PpoLossConfig,
) -> Result<(f32, Record), PgError> {
    config.validate()?;
    let n = batch.len();
    check_len("current distribution", n, curr_dist.len())?;
    check_len("behavior distribution", n, behavior_dist.len())?;
    check_len("value_pred", n, value_pred.len())?;
    let mask = batch.loss_mask();

    // Probability ratio against the log-probabilities recorded at collection.
    let curr_logp = curr_dist.log_prob(batch.actions())?;
    let ratio = (&curr_logp - batch.action_logp()).mapv(f32::exp);

    // Pessimistic bound: the worse of the unclipped and clipped surrogates.
    let eps = config.clip_epsilon as f32;
    let surrogate = batch.advantages() * &ratio;
    let clipped = batch.advantages() * &ratio.mapv(|r| r.clamp(1.0 - eps, 1.0 + eps));
    let loss_policy: Array1<f32> = izip!(surrogate.iter(), clipped.iter())
        .map(|(s, c)| -s.min(*c))
        .collect();

    let loss_value: Array1<f32> = if config.use_value_loss {
        let clip = config.value_clip as f32;
        izip!(value_pred.iter(), batch.value_targets().iter())
            .map(|(v, t)| ((v - t) * (v - t)).min(clip))
            .collect()
    } else {
        Array1::zeros(n)
    };

    let entropy = curr_dist.entropy();
    let kl = if config.kl_coef > 0.0 {
        Some(behavior_dist.kl(curr_dist)?)
    } else {
        None
    };

    let value_coef = config.value_loss_coef as f32;
    let entropy_coef = config.entropy_coef as f32;
    let total: Array1<f32> = match &kl {
        Some(kl) => {
            let kl_coef = config.kl_coef as f32;
            izip!(
                loss_policy.iter(),
                loss_value.iter(),
                entropy.iter(),
                kl.iter()
            )
            .map(|(p, v, e, k)| p + value_coef * v - entropy_coef * e + kl_coef * k)
            .collect()
        }
        None => izip!(loss_policy.iter(), loss_value.iter(), entropy.iter())
            .map(|(p, v, e)| p + value_coef * v - entropy_coef * e)
            .collect(),
    };
    let loss = masked_mean(&total, mask)?;

    let mut record = Record::from_slice(&[
        ("loss", RecordValue::Scalar(loss)),
        (
            "loss_policy",
            RecordValue::Scalar(masked_mean(&loss_policy, mask)?),
        ),
        (
            "loss_policy_unclipped",
            RecordValue::Scalar(masked_mean(&surrogate.mapv(|s| -s), mask)?),
        ),
        (
            "loss_value",
            RecordValue::Scalar(masked_mean(&loss_value, mask)?),
        ),
        (
            "entropy",
            RecordValue::Scalar(masked_mean(&entropy, mask)?),
        ),
        (
            "explained_variance",
            RecordValue::Scalar(explained_variance(batch.value_targets(), value_pred)),
        ),
    ]);
    let kl_mean = match &kl {
        Some(kl) => masked_mean(kl, mask)?,
        None => 0.0,
    };
    record.insert("kl", RecordValue::Scalar(kl_mean));

    Ok((loss, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array2};

    const LN_2: f32 = std::f32::consts::LN_2;

    fn batch_of(
        advantages: &[f32],
        action_logp: &[f32],
        value_targets: &[f32],
        loss_mask: Option<Vec<bool>>,
    ) -> RolloutBatch {
        let n = advantages.len();
        RolloutBatch::new(
            Array2::zeros((n, 1)),
            vec![0; n],
            arr1(action_logp),
            arr1(advantages),
            arr1(value_targets),
            loss_mask,
        )
        .unwrap()
    }

    fn uniform_pair(n: usize) -> (Categorical, Categorical) {
        (
            Categorical::from_logits(Array2::zeros((n, 2))),
            Categorical::from_logits(Array2::zeros((n, 2))),
        )
    }

    #[test]
    fn test_cancelling_advantages() -> anyhow::Result<()> {
        // Ratios are one, advantages sum to zero, values are exact.
        let batch = batch_of(&[1.0, -1.0], &[-LN_2, -LN_2], &[0.0, 0.0], None);
        let (curr, behavior) = uniform_pair(2);
        let value_pred = arr1(&[0.0, 0.0]);
        let config = PpoLossConfig::default();
        let (loss, record) =
            clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        assert!(loss.abs() < 1e-5);
        assert!(record.get_scalar("loss_policy")?.abs() < 1e-5);
        assert!(record.get_scalar("loss_value")?.abs() < 1e-5);
        assert_eq!(record.get_scalar("kl")?, 0.0);
        Ok(())
    }

    #[test]
    fn test_clip_is_inclusive_at_the_boundary() -> anyhow::Result<()> {
        // A ratio of exactly 1 + eps must survive the clamp unchanged.
        let batch = batch_of(&[2.0], &[-LN_2 - 1.2f32.ln()], &[0.0], None);
        let (curr, behavior) = uniform_pair(1);
        let value_pred = arr1(&[0.0]);
        let config = PpoLossConfig::default().use_value_loss(false);
        let (_, record) = clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        let clipped = record.get_scalar("loss_policy")?;
        let unclipped = record.get_scalar("loss_policy_unclipped")?;
        assert!((clipped - unclipped).abs() < 1e-5);
        Ok(())
    }

    #[test]
    fn test_clip_bounds_the_ratio() -> anyhow::Result<()> {
        let (curr, behavior) = uniform_pair(1);
        let value_pred = arr1(&[0.0]);
        let config = PpoLossConfig::default().use_value_loss(false);

        // Ratio 1.5 with a positive advantage clips down to 1.2.
        let batch = batch_of(&[1.0], &[-LN_2 - 1.5f32.ln()], &[0.0], None);
        let (loss, record) =
            clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        assert!((loss + 1.2).abs() < 1e-5);
        assert!((record.get_scalar("loss_policy_unclipped")? + 1.5).abs() < 1e-5);

        // Ratio 0.5 with a negative advantage clips up to 0.8, and the
        // pessimistic min keeps the clipped value.
        let batch = batch_of(&[-1.0], &[-LN_2 - 0.5f32.ln()], &[0.0], None);
        let (loss, _) = clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        assert!((loss - 0.8).abs() < 1e-5);
        Ok(())
    }

    #[test]
    fn test_value_clip() -> anyhow::Result<()> {
        // Squared error 100 against the default clip of 10.
        let batch = batch_of(&[0.0], &[-LN_2], &[10.0], None);
        let (curr, behavior) = uniform_pair(1);
        let value_pred = arr1(&[0.0]);

        let config = PpoLossConfig::default();
        let (loss, _) = clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        assert!((loss - 10.0).abs() < 1e-5);

        let config = PpoLossConfig::default().value_clip(1000.0);
        let (loss, _) = clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        assert!((loss - 100.0).abs() < 1e-4);

        let config = PpoLossConfig::default().use_value_loss(false);
        let (loss, record) =
            clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        assert!(loss.abs() < 1e-5);
        assert_eq!(record.get_scalar("loss_value")?, 0.0);
        Ok(())
    }

    #[test]
    fn test_loss_mask() -> anyhow::Result<()> {
        let (curr, behavior) = uniform_pair(2);
        let value_pred = arr1(&[0.0, 0.0]);
        let config = PpoLossConfig::default().use_value_loss(false);

        // The masked-out timestep must not reach the mean.
        let batch = batch_of(
            &[2.0, 999.0],
            &[-LN_2, -LN_2],
            &[0.0, 0.0],
            Some(vec![true, false]),
        );
        let (loss, _) = clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        assert!((loss + 2.0).abs() < 1e-5);

        let batch = batch_of(
            &[2.0, 999.0],
            &[-LN_2, -LN_2],
            &[0.0, 0.0],
            Some(vec![false, false]),
        );
        let err = clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)
            .unwrap_err();
        assert_eq!(err, PgError::EmptyLossMask);
        Ok(())
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let batch = batch_of(&[], &[], &[], None);
        let (curr, behavior) = uniform_pair(0);
        let value_pred = arr1(&[]);
        let config = PpoLossConfig::default();
        let err =
            clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config).unwrap_err();
        assert_eq!(err, PgError::EmptyLossMask);
    }

    #[test]
    fn test_entropy_bonus() -> anyhow::Result<()> {
        let batch = batch_of(&[0.0], &[-LN_2], &[0.0], None);
        let (curr, behavior) = uniform_pair(1);
        let value_pred = arr1(&[0.0]);
        let config = PpoLossConfig::default()
            .use_value_loss(false)
            .entropy_coef(0.5);
        let (loss, record) =
            clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        assert!((record.get_scalar("entropy")? - LN_2).abs() < 1e-6);
        assert!((loss + 0.5 * LN_2).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_kl_penalty() -> anyhow::Result<()> {
        let batch = batch_of(&[0.0], &[-LN_2], &[0.0], None);
        let curr = Categorical::from_logits(Array2::zeros((1, 2)));
        let behavior = Categorical::from_logits(arr2(&[[LN_2, 0.0]]));
        let value_pred = arr1(&[0.0]);
        let config = PpoLossConfig::default().use_value_loss(false).kl_coef(1.0);
        let (loss, record) =
            clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        // KL([2/3, 1/3] || [1/2, 1/2]) by hand.
        let expected = (2f32 / 3.0) * (4f32 / 3.0).ln() + (1f32 / 3.0) * (2f32 / 3.0).ln();
        assert!((record.get_scalar("kl")? - expected).abs() < 1e-6);
        assert!((loss - expected).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_config() {
        let batch = batch_of(&[0.0], &[-LN_2], &[0.0], None);
        let (curr, behavior) = uniform_pair(1);
        let value_pred = arr1(&[0.0]);
        let config = PpoLossConfig::default().clip_epsilon(1.0);
        let err =
            clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config).unwrap_err();
        assert_eq!(err, PgError::InvalidClipEpsilon(1.0));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let batch = batch_of(&[0.0, 0.0], &[-LN_2, -LN_2], &[0.0, 0.0], None);
        let config = PpoLossConfig::default();

        let (curr, behavior) = uniform_pair(2);
        let err = clipped_surrogate_loss(&batch, &curr, &behavior, &arr1(&[0.0]), &config)
            .unwrap_err();
        assert_eq!(
            err,
            PgError::LengthMismatch {
                what: "value_pred",
                expected: 2,
                actual: 1,
            }
        );

        let (curr, _) = uniform_pair(1);
        let (_, behavior) = uniform_pair(2);
        let err =
            clipped_surrogate_loss(&batch, &curr, &behavior, &arr1(&[0.0, 0.0]), &config)
                .unwrap_err();
        assert_eq!(
            err,
            PgError::LengthMismatch {
                what: "current distribution",
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_same_inputs_same_outputs() -> anyhow::Result<()> {
        let batch = batch_of(&[1.0, -0.5], &[-LN_2, -LN_2 - 0.1], &[1.0, 2.0], None);
        let (curr, behavior) = uniform_pair(2);
        let value_pred = arr1(&[0.5, 1.5]);
        let config = PpoLossConfig::default().entropy_coef(0.01);
        let (loss_a, record_a) =
            clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        let (loss_b, record_b) =
            clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;
        assert_eq!(loss_a, loss_b);
        for key in ["loss_policy", "loss_value", "entropy", "explained_variance"] {
            assert_eq!(record_a.get_scalar(key)?, record_b.get_scalar(key)?);
        }
        Ok(())
    }
}
