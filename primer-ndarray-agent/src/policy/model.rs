//! Policy models with one forward method per purpose.
use crate::PgError;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// A model mapping observation features to action logits and state values.
///
/// The interface names the purpose of every forward pass instead of routing
/// through a mode flag. Callers pick the variant at the call site:
///
/// * [`forward_inference`](Self::forward_inference) backs greedy action
///   selection,
/// * [`forward_exploration`](Self::forward_exploration) backs sampled action
///   selection,
/// * [`forward_train`](Self::forward_train) additionally yields the value
///   estimates the objective needs.
///
/// Observations are `(batch, features)` arrays. Logits come back as
/// `(batch, n_actions)`.
pub trait PolicyModel {
    /// Action logits for greedy evaluation.
    fn forward_inference(&self, obs: &Array2<f32>) -> Result<Array2<f32>, PgError>;

    /// Action logits for exploratory rollouts.
    fn forward_exploration(&self, obs: &Array2<f32>) -> Result<Array2<f32>, PgError>;

    /// Action logits and state values for loss evaluation.
    fn forward_train(&self, obs: &Array2<f32>) -> Result<(Array2<f32>, Array1<f32>), PgError>;
}

/// A model that is indifferent between its actions.
///
/// All logits are zero, so the induced distribution is uniform and the value
/// estimate is zero everywhere. Useful as a behavior policy baseline.
#[derive(Clone, Debug)]
pub struct UniformPolicyModel {
    n_actions: usize,
}

impl UniformPolicyModel {
    /// Creates a model over `n_actions` actions.
    pub fn new(n_actions: usize) -> Self {
        Self { n_actions }
    }

    /// Number of actions.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }
}

impl PolicyModel for UniformPolicyModel {
    fn forward_inference(&self, obs: &Array2<f32>) -> Result<Array2<f32>, PgError> {
        Ok(Array2::zeros((obs.nrows(), self.n_actions)))
    }

    fn forward_exploration(&self, obs: &Array2<f32>) -> Result<Array2<f32>, PgError> {
        self.forward_inference(obs)
    }

    fn forward_train(&self, obs: &Array2<f32>) -> Result<(Array2<f32>, Array1<f32>), PgError> {
        Ok((
            Array2::zeros((obs.nrows(), self.n_actions)),
            Array1::zeros(obs.nrows()),
        ))
    }
}

/// A model backed by per-state lookup tables.
///
/// The first observation feature addresses a row of the tables. Logits live
/// in a `(n_states, n_actions)` table and values in a `(n_states,)` table,
/// both updated externally through the row setters.
#[derive(Clone, Debug)]
pub struct TabularPolicyModel {
    logits: Array2<f32>,
    values: Array1<f32>,
}

impl TabularPolicyModel {
    /// Creates zero-initialized tables.
    pub fn zeros(n_states: usize, n_actions: usize) -> Self {
        Self {
            logits: Array2::zeros((n_states, n_actions)),
            values: Array1::zeros(n_states),
        }
    }

    /// Creates a model from existing tables.
    pub fn from_tables(logits: Array2<f32>, values: Array1<f32>) -> Result<Self, PgError> {
        if values.len() != logits.nrows() {
            return Err(PgError::LengthMismatch {
                what: "values",
                expected: logits.nrows(),
                actual: values.len(),
            });
        }
        Ok(Self { logits, values })
    }

    /// Number of table rows.
    pub fn n_states(&self) -> usize {
        self.logits.nrows()
    }

    /// Number of actions.
    pub fn n_actions(&self) -> usize {
        self.logits.ncols()
    }

    /// Overwrites the logits of one state.
    pub fn set_logits_row(&mut self, state: usize, row: &[f32]) -> Result<(), PgError> {
        if state >= self.n_states() {
            return Err(PgError::StateIndexOutOfRange {
                index: state as i64,
                n_states: self.n_states(),
            });
        }
        if row.len() != self.n_actions() {
            return Err(PgError::LengthMismatch {
                what: "logits row",
                expected: self.n_actions(),
                actual: row.len(),
            });
        }
        self.logits
            .row_mut(state)
            .assign(&ArrayView1::from(row));
        Ok(())
    }

    /// Overwrites the value of one state.
    pub fn set_value(&mut self, state: usize, value: f32) -> Result<(), PgError> {
        if state >= self.n_states() {
            return Err(PgError::StateIndexOutOfRange {
                index: state as i64,
                n_states: self.n_states(),
            });
        }
        self.values[state] = value;
        Ok(())
    }

    fn state_ix(&self, features: ArrayView1<f32>) -> Result<usize, PgError> {
        if features.is_empty() {
            return Err(PgError::LengthMismatch {
                what: "observation features",
                expected: 1,
                actual: 0,
            });
        }
        let ix = features[0] as i64;
        if ix < 0 || ix as usize >= self.n_states() {
            return Err(PgError::StateIndexOutOfRange {
                index: ix,
                n_states: self.n_states(),
            });
        }
        Ok(ix as usize)
    }
}

impl PolicyModel for TabularPolicyModel {
    fn forward_inference(&self, obs: &Array2<f32>) -> Result<Array2<f32>, PgError> {
        let mut out = Array2::zeros((obs.nrows(), self.n_actions()));
        for (mut out_row, obs_row) in out.rows_mut().into_iter().zip(obs.rows()) {
            let state = self.state_ix(obs_row)?;
            out_row.assign(&self.logits.row(state));
        }
        Ok(out)
    }

    fn forward_exploration(&self, obs: &Array2<f32>) -> Result<Array2<f32>, PgError> {
        self.forward_inference(obs)
    }

    fn forward_train(&self, obs: &Array2<f32>) -> Result<(Array2<f32>, Array1<f32>), PgError> {
        let logits = self.forward_inference(obs)?;
        let mut values = Array1::zeros(obs.nrows());
        for (out, obs_row) in values.iter_mut().zip(obs.rows()) {
            *out = self.values[self.state_ix(obs_row)?];
        }
        Ok((logits, values))
    }
}

/// The policy models supported out of the box.
#[derive(Clone, Debug)]
pub enum PgModel {
    /// See [`UniformPolicyModel`].
    Uniform(UniformPolicyModel),
    /// See [`TabularPolicyModel`].
    Tabular(TabularPolicyModel),
}

impl PgModel {
    /// The tabular model inside, if this is one.
    pub fn as_tabular_mut(&mut self) -> Option<&mut TabularPolicyModel> {
        match self {
            Self::Tabular(model) => Some(model),
            _ => None,
        }
    }
}

impl PolicyModel for PgModel {
    fn forward_inference(&self, obs: &Array2<f32>) -> Result<Array2<f32>, PgError> {
        match self {
            Self::Uniform(model) => model.forward_inference(obs),
            Self::Tabular(model) => model.forward_inference(obs),
        }
    }

    fn forward_exploration(&self, obs: &Array2<f32>) -> Result<Array2<f32>, PgError> {
        match self {
            Self::Uniform(model) => model.forward_exploration(obs),
            Self::Tabular(model) => model.forward_exploration(obs),
        }
    }

    fn forward_train(&self, obs: &Array2<f32>) -> Result<(Array2<f32>, Array1<f32>), PgError> {
        match self {
            Self::Uniform(model) => model.forward_train(obs),
            Self::Tabular(model) => model.forward_train(obs),
        }
    }
}

/// Configuration of [`PgModel`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub enum PolicyModelConfig {
    /// Uniform logits over `n_actions` actions.
    Uniform {
        /// Number of actions.
        n_actions: usize,
    },
    /// Zero-initialized lookup tables.
    Tabular {
        /// Number of table rows.
        n_states: usize,
        /// Number of actions.
        n_actions: usize,
    },
}

impl PolicyModelConfig {
    /// Builds the configured model.
    pub fn build(&self) -> PgModel {
        match self {
            Self::Uniform { n_actions } => PgModel::Uniform(UniformPolicyModel::new(*n_actions)),
            Self::Tabular {
                n_states,
                n_actions,
            } => PgModel::Tabular(TabularPolicyModel::zeros(*n_states, *n_actions)),
        }
    }
}
