//! Batch of transitions consumed by the objective.
use crate::{util::check_len, PgError};
use ndarray::{Array1, Array2};

/// An immutable batch of transitions gathered under a behavior policy.
///
/// Rows are timesteps. All fields share the batch length, which is checked
/// once at construction so the loss can consume the batch without revisiting
/// shapes.
#[derive(Clone, Debug)]
pub struct RolloutBatch {
    /// Observation features, one row per timestep.
    obs: Array2<f32>,
    /// Chosen action index per timestep.
    actions: Vec<i64>,
    /// Log-probability of each action under the behavior policy.
    action_logp: Array1<f32>,
    /// Advantage estimate per timestep.
    advantages: Array1<f32>,
    /// Regression target for the value function per timestep.
    value_targets: Array1<f32>,
    /// Optional validity mask. `false` rows are padding.
    loss_mask: Option<Vec<bool>>,
}

impl RolloutBatch {
    /// Builds a batch, verifying that every field covers the same timesteps.
    pub fn new(
        obs: Array2<f32>,
        actions: Vec<i64>,
        action_logp: Array1<f32>,
        advantages: Array1<f32>,
        value_targets: Array1<f32>,
        loss_mask: Option<Vec<bool>>,
    ) -> Result<Self, PgError> {
        let n = obs.nrows();
        check_len("actions", n, actions.len())?;
        check_len("action_logp", n, action_logp.len())?;
        check_len("advantages", n, advantages.len())?;
        check_len("value_targets", n, value_targets.len())?;
        if let Some(mask) = &loss_mask {
            check_len("loss_mask", n, mask.len())?;
        }
        Ok(Self {
            obs,
            actions,
            action_logp,
            advantages,
            value_targets,
            loss_mask,
        })
    }

    /// Number of timesteps in the batch.
    pub fn len(&self) -> usize {
        self.obs.nrows()
    }

    /// Returns `true` if the batch holds no timesteps.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Observation features.
    pub fn obs(&self) -> &Array2<f32> {
        &self.obs
    }

    /// Chosen action indices.
    pub fn actions(&self) -> &[i64] {
        &self.actions
    }

    /// Behavior log-probabilities.
    pub fn action_logp(&self) -> &Array1<f32> {
        &self.action_logp
    }

    /// Advantage estimates.
    pub fn advantages(&self) -> &Array1<f32> {
        &self.advantages
    }

    /// Value regression targets.
    pub fn value_targets(&self) -> &Array1<f32> {
        &self.value_targets
    }

    /// Validity mask, if the batch carries one.
    pub fn loss_mask(&self) -> Option<&[bool]> {
        self.loss_mask.as_deref()
    }
}
