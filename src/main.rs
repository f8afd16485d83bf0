#[macro_use]
mod logging;

mod analytics;
mod api;
mod buffer;
mod cli;
mod collectors;
mod config;
mod dashboard;
mod error;
mod feed;
mod producer;

#[cfg(test)]
mod tests;

use clap::Parser;
use cli::{Cli, Commands, FeedKind, GenerateArgs};
use config::{DashboardConfig, load_config_from_file};
use dashboard::Dashboard;
use error::Result;
use feed::{EventSource, LogSource, SeverityWeights, ThreatSource};
use log::LevelFilter;
use logging::{LogLevel, init_logging};
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    let log_level = match LogLevel::parse(&cli.log_level) {
        Some(level) => LevelFilter::from(level),
        None => {
            eprintln!(
                "Invalid log level '{}', defaulting to 'info'",
                cli.log_level
            );
            LevelFilter::Info
        }
    };

    if let Err(e) = init_logging(log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let outcome = match &cli.command {
        Commands::Version => {
            println!("threatwatch v{}", env!("CARGO_PKG_VERSION"));
            println!("Threat intelligence dashboard backend");
            println!("License: Apache 2.0");
            Ok(())
        }
        Commands::Generate(args) => generate_sample(args).map(|json| println!("{}", json)),
        Commands::Config(args) => load_config(args.config.as_deref())
            .and_then(|config| config.to_yaml())
            .map(|yaml| print!("{}", yaml)),
        Commands::Serve(args) => load_config(args.config.as_deref()).and_then(|mut config| {
            if let Some(bind) = args.bind {
                config.server.bind_address = bind;
            }
            serve(config)
        }),
    };

    if let Err(e) = outcome {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            load_config_from_file(path)
        }
        None => {
            let config = DashboardConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

fn serve(config: DashboardConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move { Dashboard::new(config)?.run().await })
}

/// Draw `count` events from a fresh source and render them as JSON.
pub(crate) fn generate_sample(args: &GenerateArgs) -> Result<String> {
    let json = match args.feed {
        FeedKind::Threats => {
            let weights = SeverityWeights::default();
            let mut source = match args.seed {
                Some(seed) => ThreatSource::with_seed(weights, seed),
                None => ThreatSource::new(weights),
            };
            let events: Vec<_> = (0..args.count).map(|_| source.next_event()).collect();
            serde_json::to_string_pretty(&events)?
        }
        FeedKind::Logs => {
            let mut source = match args.seed {
                Some(seed) => LogSource::with_seed(seed),
                None => LogSource::new(),
            };
            let events: Vec<_> = (0..args.count).map(|_| source.next_event()).collect();
            serde_json::to_string_pretty(&events)?
        }
    };
    Ok(json)
}
