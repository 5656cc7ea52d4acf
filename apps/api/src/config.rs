use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::scoring::config::ScoringConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional TOML file overriding scoring defaults.
    pub scoring_config_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring_config_path: std::env::var("SCORING_CONFIG")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Scoring defaults, or the configured override file. A bad file is fatal.
    pub fn load_scoring_config(&self) -> Result<ScoringConfig> {
        match &self.scoring_config_path {
            Some(path) => {
                let config = ScoringConfig::from_toml_file(path).with_context(|| {
                    format!("Failed to load scoring config from {}", path.display())
                })?;
                info!(
                    "Loaded scoring config v{} from {}",
                    config.version,
                    path.display()
                );
                Ok(config)
            }
            None => {
                warn!("SCORING_CONFIG not set, using default scoring constants");
                Ok(ScoringConfig::default())
            }
        }
    }
}
