use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use creator_core::dashboard::{default_series_start, DEFAULT_SERIES_DAYS, MAX_SERIES_DAYS};
use creator_core::rules::validate_email;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "creator";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_DESTINATION: &str = "/dashboard";
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 800;
pub const MAX_SUBMIT_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub sign_in: SignInConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignInConfig {
    pub destination: String,
    pub submit_delay_ms: u64,
    pub reject_emails: Vec<String>,
}

impl SignInConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub series_days: usize,
    pub series_start: NaiveDate,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sign_in: SignInConfig {
                destination: DEFAULT_DESTINATION.to_string(),
                submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
                reject_emails: Vec::new(),
            },
            dashboard: DashboardConfig {
                series_days: DEFAULT_SERIES_DAYS,
                series_start: default_series_start(),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid sign_in.destination value: {0}")]
    InvalidDestination(String),
    #[error("invalid sign_in.submit_delay_ms value: {0}")]
    InvalidSubmitDelay(u64),
    #[error("invalid sign_in.reject_emails entry: {0}")]
    InvalidRejectEmail(String),
    #[error("invalid dashboard.series_days value: {0}")]
    InvalidSeriesDays(usize),
    #[error("invalid dashboard.series_start value: {0}")]
    InvalidSeriesStart(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    sign_in: Option<SignInFile>,
    dashboard: Option<DashboardFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SignInFile {
    destination: Option<String>,
    submit_delay_ms: Option<u64>,
    reject_emails: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DashboardFile {
    series_days: Option<usize>,
    series_start: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(sign_in) = parsed.sign_in {
        if let Some(destination) = sign_in.destination {
            let destination = destination.trim().to_string();
            if !destination.starts_with('/') || destination.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidDestination(destination));
            }
            config.sign_in.destination = destination;
        }
        if let Some(delay) = sign_in.submit_delay_ms {
            if delay > MAX_SUBMIT_DELAY_MS {
                return Err(ConfigError::InvalidSubmitDelay(delay));
            }
            config.sign_in.submit_delay_ms = delay;
        }
        if let Some(emails) = sign_in.reject_emails {
            let mut normalized = Vec::with_capacity(emails.len());
            for raw in emails {
                let email =
                    validate_email(&raw).map_err(|_| ConfigError::InvalidRejectEmail(raw))?;
                if !normalized.contains(&email) {
                    normalized.push(email);
                }
            }
            config.sign_in.reject_emails = normalized;
        }
    }

    if let Some(dashboard) = parsed.dashboard {
        if let Some(days) = dashboard.series_days {
            if days == 0 || days > MAX_SERIES_DAYS {
                return Err(ConfigError::InvalidSeriesDays(days));
            }
            config.dashboard.series_days = days;
        }
        if let Some(start) = dashboard.series_start {
            config.dashboard.series_start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
                .map_err(|_| ConfigError::InvalidSeriesStart(start))?;
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
