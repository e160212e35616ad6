use serde::Deserialize;
use std::path::PathBuf;

/// Default REST base, matching the development server.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub download_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = std::env::var("CUSTOMER_API_BASE_URL")
            .or_else(|_| std::env::var("API_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let config = Self {
            api_base_url: validate_base_url(&api_base_url)?,
            download_dir: std::env::var("DOWNLOAD_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("API Base URL: {}", config.api_base_url);
        tracing::debug!("Download directory: {}", config.download_dir.display());

        Ok(config)
    }

    /// Builds a config from explicit values, validating the base URL the same
    /// way `from_env` does.
    pub fn new(api_base_url: &str, download_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        Ok(Self {
            api_base_url: validate_base_url(api_base_url)?,
            download_dir: download_dir.into(),
        })
    }
}

/// Checks scheme and syntax and strips trailing slashes so paths can be
/// appended with a single `/`.
pub fn validate_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("CUSTOMER_API_BASE_URL cannot be empty");
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        anyhow::bail!("CUSTOMER_API_BASE_URL must start with http:// or https://");
    }
    url::Url::parse(trimmed)
        .map_err(|e| anyhow::anyhow!("CUSTOMER_API_BASE_URL is not a valid URL: {}", e))?;

    Ok(trimmed.trim_end_matches('/').to_string())
}
