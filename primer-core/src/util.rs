//! Utilities for interaction of policies and environments.
use crate::{
    record::{RecordValue, Recorder},
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// Runs episodes with a policy and a recorder, returning episode returns.
///
/// One record per step is written to `recorder`, carrying whatever the
/// environment reported for that step plus the `episode`, `step` and
/// `reward` scalars. Episodes start from [`Env::reset`]; use
/// [`DefaultEvaluator`](crate::DefaultEvaluator) when reproducible initial
/// states are needed.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
{
    let mut rs = Vec::new();

    for episode in 0..n_episodes {
        let mut prev_obs = env.reset(None)?;
        let mut count_step = 0;
        let mut r_total = 0.0;

        loop {
            let act = policy.sample(&prev_obs);
            let (step, mut record) = env.step(&act)?;
            r_total += step.reward[0];

            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            record.insert("reward", RecordValue::Scalar(step.reward[0]));
            recorder.write(record);

            if step.is_done() {
                break;
            }

            prev_obs = step.obs;
            count_step += 1;
        }

        info!(
            "Episode {}: {} steps, return = {}",
            episode,
            count_step + 1,
            r_total
        );
        rs.push(r_total);
    }

    Ok(rs)
}
