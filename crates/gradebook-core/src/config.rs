use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Service URL used when neither the config file nor the command line names one.
pub const DEFAULT_API_URL: &str = "http://localhost:5039";

/// How long a form-level notice stays visible.
pub const DEFAULT_NOTICE_TTL_SECS: u64 = 5;

/// Global configuration loaded from `~/.config/gradebook/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the grade-management service.
    pub api_url: String,
    /// Optional TCP connect timeout in seconds (None = libcurl default).
    /// Requests themselves are never timed out.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Seconds before a success/error notice clears itself.
    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: u64,
}

fn default_notice_ttl_secs() -> u64 {
    DEFAULT_NOTICE_TTL_SECS
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: None,
            notice_ttl_secs: DEFAULT_NOTICE_TTL_SECS,
        }
    }
}

impl ConsoleConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }

    /// Returns the trimmed `api_url`, or the built-in default when it is blank.
    pub fn effective_api_url(&self) -> &str {
        resolve_api_url(&self.api_url)
    }
}

/// Trims a user-supplied service URL, falling back to [`DEFAULT_API_URL`] when blank.
pub fn resolve_api_url(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_API_URL
    } else {
        trimmed
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gradebook")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ConsoleConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ConsoleConfig> {
    if !path.exists() {
        let default_cfg = ConsoleConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: ConsoleConfig = toml::from_str(&data)?;
    Ok(cfg)
}
