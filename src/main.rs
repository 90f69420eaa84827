//! replay-uploader - uploads StarCraft II replays to sc2replaystats

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use replay_uploader::config::{Config, ConfigOptions};
use replay_uploader::uploader::RetryingUploader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "replay-uploader-rs")]
#[command(about = "Uploads StarCraft II replays to sc2replaystats")]
struct Args {
    /// sc2replaystats account hash key
    #[arg(long)]
    hash_key: String,

    /// sc2replaystats authentication token
    #[arg(long)]
    token: String,

    /// Maximum upload attempts per replay
    #[arg(long, default_value_t = 3)]
    max_tries: u32,

    /// Override the upload endpoint base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Replay files to upload
    #[arg(required = true)]
    replays: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = Config::new(
        args.hash_key,
        args.token,
        ConfigOptions {
            base_url: args.base_url,
            max_tries: Some(args.max_tries),
            ..Default::default()
        },
    )?;

    let uploader = RetryingUploader::from_config(config)?;

    let mut failures = 0usize;
    for replay in &args.replays {
        match uploader.upload_file(replay).await {
            Ok(receipt) => {
                info!(
                    "Uploaded {}: {}",
                    replay.display(),
                    serde_json::to_string(&receipt)?
                );
            }
            Err(e) => {
                error!("Giving up on {}: {}", replay.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
