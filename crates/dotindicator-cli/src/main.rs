use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dotindicator_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "dotindicator")]
#[command(author, version, about = "Autoplaying dot page indicator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/dotindicator/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal demo
    Run {
        /// Cycle the dots without a carousel
        #[arg(long)]
        standalone: bool,
        /// Number of carousel pages
        #[arg(short = 'p', long)]
        pages: Option<usize>,
    },
    /// Run the demo headless and print one JSON snapshot per frame
    Simulate {
        /// Simulated time to cover
        #[arg(short = 's', long, default_value_t = 10.0)]
        seconds: f64,
        /// Frames per simulated second
        #[arg(long, default_value_t = 30)]
        fps: u32,
        /// Cycle the dots without a carousel
        #[arg(long)]
        standalone: bool,
        /// Number of carousel pages
        #[arg(short = 'p', long)]
        pages: Option<usize>,
        /// Grab the carousel at this many milliseconds
        #[arg(long)]
        hold_at: Option<u64>,
        /// How long the grab lasts
        #[arg(long, default_value_t = 1000)]
        hold_for: u64,
    },
    /// Inspect or write the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file location
    Path,
    /// Write the effective configuration to the default location
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the demo screen or JSON output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Some(Commands::Run { standalone, pages }) => {
            commands::run::run(with_demo_overrides(config, standalone, pages))
        }
        None => commands::run::run(config),
        Some(Commands::Simulate {
            seconds,
            fps,
            standalone,
            pages,
            hold_at,
            hold_for,
        }) => {
            let config = with_demo_overrides(config, standalone, pages);
            let options = commands::simulate::SimulateOptions {
                seconds,
                fps,
                hold_at,
                hold_for,
            };
            commands::simulate::run(&config, &options)
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init => commands::config::init(&config),
        },
    }
}

fn with_demo_overrides(mut config: AppConfig, standalone: bool, pages: Option<usize>) -> AppConfig {
    if standalone {
        config.demo.standalone = true;
    }
    if let Some(pages) = pages {
        config.demo.page_count = pages;
    }
    config
}
