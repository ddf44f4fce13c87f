use std::str::FromStr;

use thiserror::Error;
use tracing::Level;

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const FUNCTION_NAME_ENV: &str = "AWS_LAMBDA_FUNCTION_NAME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("LOG_LEVEL '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
    #[error("LOG_FORMAT '{0}' is not one of text, json")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    pub function_name: String,
    pub log_level: Level,
    pub log_format: LogFormat,
}

impl FunctionConfig {
    /// Reads configuration from the process environment.
    pub fn from_env(default_function_name: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(default_function_name, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        default_function_name: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let log_level = match non_empty(lookup(LOG_LEVEL_ENV)) {
            Some(raw) => {
                Level::from_str(raw.trim()).map_err(|_| ConfigError::InvalidLogLevel(raw))?
            }
            None => Level::INFO,
        };
        let log_format = match non_empty(lookup(LOG_FORMAT_ENV)) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        let function_name = non_empty(lookup(FUNCTION_NAME_ENV))
            .unwrap_or_else(|| default_function_name.to_string());

        Ok(Self {
            function_name,
            log_level,
            log_format,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}
