use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the producers and the HTTP API
    Serve(ServeArgs),
    /// Print synthetic events as a JSON array
    Generate(GenerateArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
    /// Show version information
    Version,
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the bind address (e.g. 0.0.0.0:5000)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FeedKind {
    Threats,
    Logs,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Which feed to sample
    #[arg(short, long, value_enum, default_value = "threats")]
    pub feed: FeedKind,
    /// Number of events
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,
    /// Seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
