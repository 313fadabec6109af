use anyhow::Result;
use primer_core::{record::BufferedRecorder, util, Env as _};
use primer_guess_env::{GuessNumberEnv, GuessNumberEnvConfig, RandomGuessPolicy};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GuessNumberEnvConfig::default();
    let mut env = GuessNumberEnv::build(&config, 42)?;
    let mut policy = RandomGuessPolicy::from_config(&config, 42);
    let mut recorder = BufferedRecorder::new();

    let rs = util::eval_with_recorder(&mut env, &mut policy, 5, &mut recorder)?;
    for (episode, r) in rs.iter().enumerate() {
        println!("episode {}: return = {}", episode, r);
    }

    Ok(())
}
