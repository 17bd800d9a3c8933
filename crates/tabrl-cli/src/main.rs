//! tabrl CLI - trains the tabular estimator on a bundled chain-walk
//! environment, for debugging and manual inspection.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod chain;
mod settings;

use chain::ChainWalk;
use settings::Settings;
use tabrl::{EpsilonGreedy, QLearning, QLearningConfig, Trainer, TrainerConfig, TrainingReport};

#[derive(Parser)]
#[command(name = "tabrl")]
#[command(version, about = "Train a tabular Q-learning estimator on a chain-walk demo", long_about = None)]
struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override the chain length
    #[arg(long)]
    chain_length: Option<usize>,

    /// RNG seed for the exploration policy
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the training report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tabrl={log_level},tabrl_cli={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(episodes) = cli.episodes {
        settings.trainer.episodes = episodes;
    }
    if let Some(length) = cli.chain_length {
        settings.chain.length = length;
    }
    tracing::info!(
        episodes = settings.trainer.episodes,
        chain_length = settings.chain.length,
        "starting training run"
    );

    let mut estimator = QLearning::new(QLearningConfig {
        learning_rate: settings.estimator.learning_rate,
        discount_factor: settings.estimator.discount_factor,
        action_space_size: ChainWalk::ACTIONS,
    })?;

    let mut env = ChainWalk::new(settings.chain.length);
    let mut selection = EpsilonGreedy::new(
        settings.exploration.epsilon,
        settings.exploration.decay,
        settings.exploration.min_epsilon,
    );
    if let Some(seed) = cli.seed {
        selection = selection.with_seed(seed);
    }

    let trainer = Trainer::new(TrainerConfig {
        episodes: settings.trainer.episodes,
        max_steps_per_episode: settings.trainer.max_steps_per_episode,
    });
    let report = trainer.run(&mut estimator, &mut env, &mut selection)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&estimator, &report, env.length());
    }

    Ok(())
}

fn print_summary(estimator: &QLearning<usize>, report: &TrainingReport, length: usize) {
    println!("Training complete");
    println!("  episodes:       {}", report.episodes);
    println!("  total steps:    {}", report.total_steps);
    println!("  mean ep reward: {:.3}", report.mean_episode_reward);
    println!("  states seen:    {}", report.states_seen);
    println!();
    println!("Greedy policy (L = left, R = right):");
    for position in 0..length {
        match estimator.values(&position) {
            Some(values) => {
                // Same first-max tie-break the estimator uses.
                let greedy = if values[ChainWalk::RIGHT] > values[ChainWalk::LEFT] {
                    'R'
                } else {
                    'L'
                };
                println!(
                    "  state {position:3}: [{:+.3}, {:+.3}] -> {greedy}",
                    values[ChainWalk::LEFT],
                    values[ChainWalk::RIGHT]
                );
            }
            None => println!("  state {position:3}: unvisited"),
        }
    }
}
