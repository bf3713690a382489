use anyhow::{Context, Result};
use tracing::warn;

use crate::submission::builder::BackendEndpoints;

/// Application configuration loaded from environment variables.
///
/// Backend base URLs are optional. A missing one is logged at startup and surfaces
/// as a transport failure on the first submission routed to it.
#[derive(Debug, Clone)]
pub struct Config {
    pub file_api_url: String,
    pub text_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            file_api_url: optional_env("FILE_API_URL"),
            text_api_url: optional_env("TEXT_API_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn endpoints(&self) -> BackendEndpoints {
        BackendEndpoints {
            file_api_base: self.file_api_url.clone(),
            text_api_base: self.text_api_url.clone(),
        }
    }

    /// Logs every backend URL that is unset. Call after logging is initialized.
    pub fn warn_missing(&self) {
        for (key, value) in [
            ("FILE_API_URL", &self.file_api_url),
            ("TEXT_API_URL", &self.text_api_url),
        ] {
            if value.is_empty() {
                warn!("{key} is not set; submissions routed to it will fail");
            }
        }
    }
}

fn optional_env(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}
