use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::layout::paginator::DEFAULT_SECOND_COLUMN_SLACK;

/// Application configuration loaded from environment variables.
/// Every variable is optional; missing ones fall back to local defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Documents are kept in memory when unset.
    pub database_url: Option<String>,
    /// Directory of tile and decoration images. The bundled manifest is used when unset.
    pub asset_dir: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
    /// Extra height the second text column may use before a new column opens.
    pub second_column_slack: f32,
    pub body_font: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            asset_dir: optional_env("ASSET_DIR").map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            second_column_slack: match optional_env("SECOND_COLUMN_SLACK") {
                Some(raw) => raw
                    .parse::<f32>()
                    .context("SECOND_COLUMN_SLACK must be a number")?,
                None => DEFAULT_SECOND_COLUMN_SLACK,
            },
            body_font: std::env::var("BODY_FONT").unwrap_or_else(|_| "System".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
