use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelscroll_core::AppConfig;

mod commands;

use commands::simulate::SimulateArgs;

#[derive(Parser)]
#[command(name = "reelscroll")]
#[command(author, version, about = "Wheel-driven smooth horizontal scrolling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal page
    Run,
    /// Replay wheel and scroll-to input headlessly, one JSON snapshot per frame
    Simulate(SimulateArgs),
    /// Print the effective configuration
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    info!(path = %AppConfig::config_path().display(), "Configuration loaded");

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Simulate(args)) => commands::simulate::run(&config, &args),
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from([
            "reelscroll", "simulate", "--wheel", "150", "--wheel", "-50", "--scroll-to", "2000",
            "--duration-ms", "500", "--frames", "10",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Simulate(args)) => {
                assert_eq!(args.wheel, vec![150.0, -50.0]);
                assert_eq!(args.scroll_to, Some(2000.0));
                assert_eq!(args.duration_ms, Some(500));
                assert_eq!(args.frames, 10);
                assert_eq!(args.frame_ms, 16);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_duration_requires_target() {
        assert!(Cli::try_parse_from(["reelscroll", "simulate", "--duration-ms", "500"]).is_err());
    }
}
