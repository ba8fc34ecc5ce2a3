// App configuration: API endpoints and the on-disk config/session files
// under ~/.config/planctl/. Environment variables (optionally from a .env
// file) override the config file, which overrides the built-in defaults.

pub mod session;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_DIR_NAME: &str = "planctl";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Platform API (infrastructure submission).
const DEFAULT_API_BASE_URL: &str = "http://152.42.192.113:4000";
/// Customer-website API (registration).
const DEFAULT_AUTH_BASE_URL: &str = "http://152.42.192.113:8000/api/v1/website";
/// Auth API (login).
const DEFAULT_LOGIN_BASE_URL: &str = "http://152.42.192.113:8000/api/v1/auth";

/// Blanket client-wide request timeout. There is no per-request tuning and
/// no retry.
pub const API_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: Option<String>,
    pub auth_base_url: Option<String>,
    pub login_base_url: Option<String>,
}

pub fn get_home_dir() -> Result<PathBuf> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE")) // Windows fallback
        .map(PathBuf::from)
        .with_context(|| "Could not determine home directory")
}

pub fn get_config_dir() -> Result<PathBuf> {
    let home = get_home_dir()?;
    let config_dir = home.join(".config").join(CONFIG_DIR_NAME);

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;
    }

    Ok(config_dir)
}

pub fn get_config_file_path() -> Result<PathBuf> {
    let config_dir = get_config_dir()?;
    Ok(config_dir.join(CONFIG_FILE_NAME))
}

pub fn load_config() -> Result<AppConfig> {
    let config_path = get_config_file_path()?;

    if !config_path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(config)
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    let config_path = get_config_file_path()?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    Ok(())
}

fn resolve(env_key: &str, configured: Option<String>, default: &str) -> String {
    if let Ok(url) = std::env::var(env_key) {
        return url;
    }
    configured.unwrap_or_else(|| default.to_string())
}

/// Base URL for the infrastructure submission API.
pub fn api_base_url() -> String {
    let configured = load_config().ok().and_then(|c| c.api_base_url);
    resolve("PLANCTL_API_URL", configured, DEFAULT_API_BASE_URL)
}

/// Base URL for customer registration.
pub fn auth_base_url() -> String {
    let configured = load_config().ok().and_then(|c| c.auth_base_url);
    resolve("PLANCTL_AUTH_URL", configured, DEFAULT_AUTH_BASE_URL)
}

/// Base URL for login.
pub fn login_base_url() -> String {
    let configured = load_config().ok().and_then(|c| c.login_base_url);
    resolve("PLANCTL_LOGIN_URL", configured, DEFAULT_LOGIN_BASE_URL)
}
