mod input;
mod rank;
mod ranking_file;

use std::path::PathBuf;

use adtrend_core::{parse_scoring_policy, ScoringPolicy};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adtrend-cli")]
#[command(about = "Rank advertisement creatives by tag trend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline over a batch of ads and write the ranking
    Rank {
        /// JSON file holding an array of ad records
        #[arg(long)]
        ads: PathBuf,

        /// Tag history (YAML or JSON map of tag to metrics)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Where to write the ranking file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Maximum Hamming distance treated as a visual duplicate
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=64))]
        phash_threshold: Option<u32>,

        /// Scoring policy: trend or weighted
        #[arg(long, value_parser = parse_scoring_policy)]
        policy: Option<ScoringPolicy>,

        /// Print the ranking without writing the output file
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the 64-bit perceptual hash of one image
    Phash {
        image: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let mut config = adtrend_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Rank {
            ads,
            history,
            output,
            phash_threshold,
            policy,
            dry_run,
        }) => {
            if let Some(threshold) = phash_threshold {
                config.phash_threshold = threshold;
            }
            if let Some(policy) = policy {
                config.scoring_policy = policy;
            }
            if let Some(output) = output {
                config.ranking_output = output;
            }
            if history.is_some() {
                config.history_path = history;
            }
            rank::run_rank(&config, &ads, dry_run)?;
        }
        Some(Commands::Phash { image }) => {
            println!("{}", rank::image_phash(&config, &image)?);
        }
        None => println!("adtrend-cli: use `rank --ads <file>` or `phash <image>`"),
    }

    Ok(())
}
