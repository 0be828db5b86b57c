use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TOP_LIMIT: u32 = 5;
pub const DEFAULT_AUDIT_DAYS: u32 = 30;
pub const DEFAULT_GROWTH_MONTHS: u32 = 12;
pub const DEFAULT_LOG_FILTER: &str = "roster=info";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub top_departments_limit: u32,
    pub audit_days: u32,
    /// Look-back window of the salary growth report
    pub growth_months: u32,
    pub export_dir: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            top_departments_limit: DEFAULT_TOP_LIMIT,
            audit_days: DEFAULT_AUDIT_DAYS,
            growth_months: DEFAULT_GROWTH_MONTHS,
            export_dir: None,
            log_filter: None,
        }
    }
}

impl Config {
    /// Base URL with a scheme and without a trailing slash
    pub fn api_base_url(&self) -> String {
        normalize_base_url(&self.api_base_url)
    }
}

/// Load the config file at `path`, or the default location when `None`.
/// A missing file yields the defaults.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path.map(Path::to_path_buf).or_else(config_path) {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()))
        }
    };
    toml::from_str::<Config>(&content)
        .with_context(|| format!("invalid config file {}", path.display()))
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("ROSTER_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("roster").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("roster").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "roster", "roster")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("roster"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("roster"));
    }
    directories::ProjectDirs::from("io", "roster", "roster")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("roster.log"))
}

pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
