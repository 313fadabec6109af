//! Collects a short rollout on the guess-number environment and evaluates
//! the clipped surrogate objective on it.
use anyhow::Result;
use ndarray::{Array1, Array2};
use primer_core::{record::RecordValue, Configurable, Env, Policy};
use primer_guess_env::{GuessNumberEnv, GuessNumberEnvConfig};
use primer_ndarray_agent::{
    dist::Categorical,
    policy::{PolicyModel, PolicyModelConfig, StochasticPolicy, StochasticPolicyConfig},
    ppo::{clipped_surrogate_loss, PpoLossConfig},
    RolloutBatch,
};

const N_STEPS: usize = 256;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut env = GuessNumberEnv::build(&GuessNumberEnvConfig::default(), 42)?;
    let mut policy = StochasticPolicy::<GuessNumberEnv>::build(
        StochasticPolicyConfig::new(PolicyModelConfig::Tabular {
            n_states: 4,
            n_actions: 101,
        })
        .seed(7),
    );

    let mut features = Vec::new();
    let mut actions: Vec<i64> = Vec::new();
    let mut rewards: Vec<f32> = Vec::new();
    let mut dones: Vec<bool> = Vec::new();
    let mut obs = env.reset(None)?;
    for _ in 0..N_STEPS {
        let act = policy.sample(&obs);
        let feat: Array1<f32> = obs.clone().into();
        features.extend(feat.iter().copied());
        actions.push(act.guess);
        let (step, _) = env.step(&act)?;
        rewards.push(step.reward[0]);
        dones.push(step.is_done());
        obs = if step.is_done() {
            env.reset(None)?
        } else {
            step.obs.clone()
        };
    }
    let obs_mat = Array2::from_shape_vec((N_STEPS, 2), features)?;

    let mut value_targets = vec![0f32; N_STEPS];
    let mut acc = 0f32;
    for i in (0..N_STEPS).rev() {
        if dones[i] {
            acc = 0.0;
        }
        acc += rewards[i];
        value_targets[i] = acc;
    }

    let behavior = Categorical::from_logits(policy.model().forward_exploration(&obs_mat)?);
    let action_logp = behavior.log_prob(&actions)?;
    let (logits, value_pred) = policy.model().forward_train(&obs_mat)?;
    let curr = Categorical::from_logits(logits);

    let batch = RolloutBatch::new(
        obs_mat,
        actions,
        action_logp,
        Array1::from(value_targets.clone()),
        Array1::from(value_targets),
        None,
    )?;
    let config = PpoLossConfig::default().entropy_coef(0.01);
    let (loss, record) = clipped_surrogate_loss(&batch, &curr, &behavior, &value_pred, &config)?;

    println!("loss = {:.4}", loss);
    for (key, value) in record.iter() {
        if let RecordValue::Scalar(value) = value {
            println!("{:24} {:10.4}", key, value);
        }
    }
    Ok(())
}
