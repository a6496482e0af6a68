use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::catalog::PromptCatalog;

pub const DEFAULT_CONFIG_FILE: &str = "reflection_dice.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub catalog_path: Option<PathBuf>,
    pub haptics: bool,
    pub share: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            catalog_path: None,
            haptics: true,
            share: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    database_url: Option<String>,
    catalog_path: Option<PathBuf>,
    haptics: Option<bool>,
    share: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    prompts: Vec<String>,
}

fn default_database_url() -> String {
    match dirs::data_dir() {
        Some(dir) => {
            let path = dir.join("reflection-dice").join("prefs.db");
            format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"))
        }
        None => "sqlite://./data/prefs.db".into(),
    }
}

/// Defaults, then the config file, then the environment. A missing file is
/// only an error when its path was given explicitly.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file_config(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound && config_path.is_none() => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn apply_file_config(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileConfig = toml::from_str(raw)?;
    if let Some(v) = file_cfg.database_url {
        settings.database_url = v;
    }
    if let Some(v) = file_cfg.catalog_path {
        settings.catalog_path = Some(v);
    }
    if let Some(v) = file_cfg.haptics {
        settings.haptics = v;
    }
    if let Some(v) = file_cfg.share {
        settings.share = v;
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = var("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = var("APP__CATALOG_PATH") {
        settings.catalog_path = Some(PathBuf::from(v));
    }

    if let Some(v) = var("APP__HAPTICS").as_deref().and_then(parse_flag) {
        settings.haptics = v;
    }
    if let Some(v) = var("APP__SHARE").as_deref().and_then(parse_flag) {
        settings.share = v;
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Accepts plain paths and `sqlite:` shorthands; other URLs pass through.
pub fn normalize_database_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return default_database_url();
    }
    if raw.contains("://") || raw.starts_with("sqlite::memory:") {
        return raw.to_string();
    }
    let path = raw.strip_prefix("sqlite:").unwrap_or(raw);
    format!("sqlite://{}", path.replace('\\', "/"))
}

pub fn load_catalog(path: &Path) -> anyhow::Result<PromptCatalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read prompt catalog '{}'", path.display()))?;
    parse_catalog(&raw).with_context(|| format!("invalid prompt catalog '{}'", path.display()))
}

fn parse_catalog(raw: &str) -> anyhow::Result<PromptCatalog> {
    let file: CatalogFile = toml::from_str(raw)?;
    if file.prompts.is_empty() {
        bail!("catalog declares no prompts");
    }
    Ok(PromptCatalog::new(file.prompts)?)
}
