//! TOML configuration file loading and settings resolution
//!
//! Precedence, highest first: command line, environment (`RAFFLE_API_URL`,
//! `RAFFLE_TOKEN`, resolved by clap), config file, built-in defaults.

use crate::app::cli::args::Args;
use crate::checkin::CheckinTimings;
use crate::core::error_handling::ContextualError;
use crate::core::logging::verbosity_to_level;
use crate::core::validation::{validate_api_url, ValidationError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "RaffleAdmin";
const CONFIG_FILE_NAME: &str = "raffle-admin.toml";
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("Error reading configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Parse { message: String },

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("No API URL configured. Use --api-url, RAFFLE_API_URL or api_url in the config file.")]
    MissingApiUrl,
}

impl ConfigError {
    fn not_found(path: &Path) -> Self {
        ConfigError::NotFound {
            message: format!(
                "The specified configuration file does not exist: {}",
                path.display()
            ),
        }
    }

    fn parse(path: &Path, error: toml::de::Error) -> Self {
        ConfigError::Parse {
            message: format!(
                "Error parsing configuration file {}: {}",
                path.display(),
                error
            ),
        }
    }
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { message } | ConfigError::Parse { message } => Some(message),
            ConfigError::Invalid(e) => Some(&e.message),
            ConfigError::MissingApiUrl => Some(
                "No API URL configured. Use --api-url, RAFFLE_API_URL or api_url in the config file.",
            ),
            ConfigError::Read { .. } => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Contents of `raffle-admin.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
    pub color: Option<bool>,
    pub checkin: CheckinSection,
}

/// `[checkin]` table: banner delays in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckinSection {
    pub success_reset_ms: Option<u64>,
    pub error_reset_ms: Option<u64>,
    pub invalid_reset_ms: Option<u64>,
}

impl CheckinSection {
    fn timings(&self) -> Result<CheckinTimings, ValidationError> {
        let defaults = CheckinTimings::default();
        Ok(CheckinTimings {
            success_reset: delay("success_reset_ms", self.success_reset_ms, defaults.success_reset)?,
            error_reset: delay("error_reset_ms", self.error_reset_ms, defaults.error_reset)?,
            invalid_reset: delay("invalid_reset_ms", self.invalid_reset_ms, defaults.invalid_reset)?,
        })
    }
}

fn delay(key: &str, value: Option<u64>, default: Duration) -> Result<Duration, ValidationError> {
    match value {
        None => Ok(default),
        Some(0) => Err(ValidationError::new(format!(
            "checkin.{key} must be greater than 0"
        ))),
        Some(ms) => Ok(Duration::from_millis(ms)),
    }
}

/// `<config_dir>/RaffleAdmin/raffle-admin.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Parse config file contents; `path` is only used in messages
pub fn parse_config(contents: &str, path: &Path) -> ConfigResult<FileConfig> {
    toml::from_str::<FileConfig>(contents).map_err(|e| ConfigError::parse(path, e))
}

/// Load the config file named on the command line, or the default one if present
///
/// An explicitly named file must exist; a missing default file is not an error.
pub async fn load_config_file(explicit: Option<&Path>) -> ConfigResult<FileConfig> {
    let path = match explicit {
        Some(path) if !path.exists() => return Err(ConfigError::not_found(path)),
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No configuration file found");
                return Ok(FileConfig::default());
            }
        },
    };

    log::debug!("Loading configuration from {}", path.display());
    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
    parse_config(&contents, &path)
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
    /// `None` means decide from the terminal
    pub color: Option<bool>,
    pub timings: CheckinTimings,
}

impl Settings {
    /// Settings from the command line alone (used when the config file is unusable)
    pub fn from_args(args: &Args) -> Self {
        Self {
            api_url: args.api_url.clone(),
            token: args.token.clone(),
            log_level: cli_log_level(args),
            log_format: args.log_format.clone(),
            log_file: args.log_file.clone(),
            color: args.color_override(),
            timings: CheckinTimings::default(),
        }
    }

    /// Merge the command line over the config file and validate the result
    pub fn resolve(args: &Args, file: FileConfig) -> ConfigResult<Self> {
        let cli = Self::from_args(args);

        let api_url = match cli.api_url {
            Some(url) => Some(url),
            None => file
                .api_url
                .as_deref()
                .map(validate_api_url)
                .transpose()
                .map_err(ValidationError::new)?,
        };

        let log_level = cli.log_level.or(file.log_level);
        check_choice("log_level", log_level.as_deref(), &LOG_LEVELS)?;
        let log_format = cli.log_format.or(file.log_format);
        check_choice("log_format", log_format.as_deref(), &LOG_FORMATS)?;

        Ok(Self {
            api_url,
            token: cli.token.or(file.token).filter(|t| !t.trim().is_empty()),
            log_level,
            log_format,
            log_file: cli.log_file.or(file.log_file),
            color: cli.color.or(file.color),
            timings: file.checkin.timings()?,
        })
    }

    pub fn require_api_url(&self) -> ConfigResult<&str> {
        self.api_url.as_deref().ok_or(ConfigError::MissingApiUrl)
    }
}

/// `--log-level` wins over `-v`/`-q`
fn cli_log_level(args: &Args) -> Option<String> {
    args.log_level
        .clone()
        .or_else(|| verbosity_to_level(args.verbosity()).map(str::to_string))
}

fn check_choice(key: &str, value: Option<&str>, allowed: &[&str]) -> Result<(), ValidationError> {
    match value {
        Some(v) if !allowed.contains(&v) => Err(ValidationError::new(format!(
            "Invalid {key} '{v}' (expected one of: {})",
            allowed.join(", ")
        ))),
        _ => Ok(()),
    }
}
