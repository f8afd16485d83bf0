// src/tests/test_cli.rs

use crate::cli::{Cli, Commands, FeedKind};
use clap::Parser;

#[test]
fn test_serve_arguments() {
    let cli = Cli::try_parse_from([
        "threatwatch",
        "--log-level",
        "debug",
        "serve",
        "--config",
        "dashboard.yaml",
        "--bind",
        "0.0.0.0:9000",
    ])
    .unwrap();

    assert_eq!(cli.log_level, "debug");
    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.config.unwrap().to_str(), Some("dashboard.yaml"));
            assert_eq!(args.bind.unwrap().port(), 9000);
        }
        other => panic!("Expected Serve, got {:?}", other),
    }
}

#[test]
fn test_generate_defaults() {
    let cli = Cli::try_parse_from(["threatwatch", "generate"]).unwrap();
    match cli.command {
        Commands::Generate(args) => {
            assert_eq!(args.feed, FeedKind::Threats);
            assert_eq!(args.count, 10);
            assert!(args.seed.is_none());
        }
        other => panic!("Expected Generate, got {:?}", other),
    }

    let cli = Cli::try_parse_from(["threatwatch", "generate", "--feed", "logs", "-n", "3"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Generate(ref args) if args.feed == FeedKind::Logs && args.count == 3
    ));
}

#[test]
fn test_bad_bind_address_rejected() {
    assert!(Cli::try_parse_from(["threatwatch", "serve", "--bind", "not-an-address"]).is_err());
}
