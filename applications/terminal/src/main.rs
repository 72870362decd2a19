//! Marigold Terminal - play a playlist from the command line

use clap::{Parser, Subcommand};
use marigold_terminal::{config::AppConfig, load_catalog, view::ConsoleView, TerminalPlayer};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "marigold-terminal")]
#[command(about = "Marigold playlist player for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive player
    Play {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// TOML catalog to play instead of the demo playlist
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Do not attach the media session
        #[arg(long)]
        no_media_session: bool,
    },
    /// Print the playlist and exit
    List {
        /// TOML catalog to list instead of the demo playlist
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            catalog,
            no_media_session,
        } => {
            let mut config = AppConfig::load(config.as_deref())?;
            if no_media_session {
                config.media_session.enabled = false;
            }
            init_tracing(&config.logging.filter);
            play(&config, catalog).await?;
        }
        Commands::List { catalog } => {
            init_tracing("marigold_terminal=warn");
            list(catalog)?;
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    // Logs go to stderr so the player display keeps stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn play(config: &AppConfig, catalog_override: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(config.catalog_path(catalog_override.as_deref()))?;
    if catalog.is_empty() {
        tracing::warn!("Catalog is empty, nothing to play");
    }

    let view = ConsoleView::new(std::io::stdout());
    let player = TerminalPlayer::new(catalog, config, Box::new(view));

    let stdin = BufReader::new(tokio::io::stdin());
    let last = player.run(stdin).await?;

    if let Some(track) = last.track {
        tracing::info!(title = %track.title, status = ?last.state.status, "Stopped");
    }
    Ok(())
}

fn list(catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    if catalog.is_empty() {
        println!("No tracks found");
        return Ok(());
    }

    for (i, track) in catalog.iter().enumerate() {
        println!("{:>3}. {} - {}", i + 1, track.title, track.artist);
    }

    Ok(())
}
