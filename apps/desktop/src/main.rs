use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{Capabilities, RandomSource, SeededRandom, SessionController, ThreadRandom};
use shared::catalog::PromptCatalog;
use storage::{PreferenceStore, Storage};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod platform;
mod shell;

use config::{load_catalog, load_settings, normalize_database_url, Settings};

#[derive(Parser, Debug)]
#[command(name = "reflection-dice", about = "Roll the dice for a mindfulness prompt")]
struct Args {
    /// Config file (defaults to ./reflection_dice.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    database_url: Option<String>,
    /// TOML file with `prompts = [...]`.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long)]
    no_haptics: bool,
    #[arg(long)]
    no_share: bool,
    /// Seed the prompt draw for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.database_url {
            settings.database_url = v.clone();
        }
        if let Some(v) = &self.catalog {
            settings.catalog_path = Some(v.clone());
        }
        if self.no_haptics {
            settings.haptics = false;
        }
        if self.no_share {
            settings.share = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    args.apply(&mut settings);

    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url)
        .await
        .with_context(|| format!("failed to open preferences at '{database_url}'"))?;
    storage.health_check().await?;
    info!(%database_url, "preferences opened");

    let catalog = match &settings.catalog_path {
        Some(path) => load_catalog(path)?,
        None => PromptCatalog::builtin(),
    };
    let capabilities = platform::detect_capabilities(&settings);
    let prefs = PreferenceStore::new(storage);

    match args.seed {
        Some(seed) => start(catalog, prefs, SeededRandom::new(seed), capabilities).await,
        None => start(catalog, prefs, ThreadRandom, capabilities).await,
    }
}

async fn start<R: RandomSource>(
    catalog: PromptCatalog,
    prefs: PreferenceStore<Storage>,
    random: R,
    capabilities: Capabilities,
) -> Result<()> {
    let mut controller = SessionController::open(catalog, prefs, random, capabilities).await;
    let input = BufReader::new(tokio::io::stdin());
    shell::run(&mut controller, input, std::io::stdout()).await?;
    controller.preferences().medium().pool().close().await;
    Ok(())
}
