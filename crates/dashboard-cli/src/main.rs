//! ML Training Dashboard CLI
//!
//! A terminal front end for the training/inference service: trains models,
//! polls performance metrics and predictions, and renders them as tables.

mod commands;
mod config;
mod output;
mod sink;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use dashboard_lib::ModelKind;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ML Training Dashboard CLI
#[derive(Parser)]
#[command(name = "mldash")]
#[command(author, version, about = "Terminal dashboard for the ML training service", long_about = None)]
pub struct Cli {
    /// Training service URL (can also be set via MLDASH_API_URL env var)
    #[arg(long, env = "MLDASH_API_URL")]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train a model, then watch it live
    Train {
        /// Which model category to train
        #[arg(value_enum)]
        kind: KindArg,

        /// Exit after training instead of entering the watch loop
        #[arg(long)]
        no_watch: bool,
    },

    /// Poll an already-trained model until interrupted
    Watch,

    /// Show current performance metrics
    Performance,

    /// Show a sample of predictions
    Predictions {
        /// Number of predictions to sample
        #[arg(long, short = 'n', default_value_t = 20)]
        count: usize,
    },

    /// Show model architecture
    Info,
}

/// Trainable model categories
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Classification,
    Regression,
}

impl From<KindArg> for ModelKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Classification => ModelKind::Classification,
            KindArg::Regression => ModelKind::Regression,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Default to warn so log lines stay out of the rendered tables
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let mut config = config::DashboardConfig::load()?;
    if let Some(api_url) = cli.api_url.clone() {
        config.api_url = api_url;
    }

    match cli.command {
        Commands::Train { kind, no_watch } => {
            commands::train(&config, kind.into(), !no_watch, cli.format).await
        }
        Commands::Watch => commands::watch(&config, cli.format).await,
        Commands::Performance => commands::performance(&config, cli.format).await,
        Commands::Predictions { count } => {
            commands::predictions(&config, count, cli.format).await
        }
        Commands::Info => commands::info(&config, cli.format).await,
    }
}
