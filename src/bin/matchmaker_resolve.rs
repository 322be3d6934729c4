//! matchmaker-resolve: resolve topics against the live registry
//!
//! Diagnostic tool that prints what the matchmaker would hand the
//! messaging layer for each topic.
//!
//! ## Usage
//! ```text
//! matchmaker-resolve compute fanout~scheduler compute.host1
//! ```
//!
//! ## Configuration
//! - MATCHMAKER_CONFIG: Path to a YAML config file (optional)
//! - MATCHMAKER__REGISTRY__HOST / MATCHMAKER__REGISTRY__PORT: registry agent
//! - MATCHMAKER_LOG: tracing filter (default: info)

use futures::future::try_join_all;
use tracing::info;

use matchmaker_consul::utils::bootstrap::init_tracing;
use matchmaker_consul::{AddressingMode, MatchMaker, MatchmakerConfig, MatchmakerError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let topics: Vec<String> = std::env::args().skip(1).collect();
    if topics.is_empty() {
        eprintln!("usage: matchmaker-resolve <topic>...");
        std::process::exit(2);
    }

    let config = MatchmakerConfig::load(None)?;
    let matchmaker = MatchMaker::new(&config)?;

    info!(registry = %config.registry.base_url(), topics = topics.len(), "Resolving topics");

    let matchmaker = &matchmaker;
    let resolutions = try_join_all(topics.iter().map(|topic| async move {
        let mode = AddressingMode::classify(topic)?;
        let targets = matchmaker.resolve(topic).await?;
        Ok::<_, MatchmakerError>((topic, mode, targets))
    }))
    .await?;

    for (topic, mode, targets) in resolutions {
        if targets.is_empty() {
            println!("{} [{}] -> (no active hosts)", topic, mode);
        }
        for target in targets {
            println!("{} [{}] -> {}", topic, mode, target);
        }
    }

    Ok(())
}
