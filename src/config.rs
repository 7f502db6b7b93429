//! App Configuration
//!
//! A wasm bundle has no process environment, so overrides are read at
//! build time (`TODO_API_BASE_URL=... trunk build`) and baked in.

use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "https://recondite-baboon.glitch.me/";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_ERROR_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL every API path is joined onto
    pub api_base_url: String,
    /// `localStorage` key holding the bearer token
    pub token_key: String,
    /// How long an error banner stays up; 0 keeps it until the next action
    pub error_dismiss_ms: u32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            error_dismiss_ms: DEFAULT_ERROR_DISMISS_MS,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with the build-time environment
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("TODO_API_BASE_URL"),
            option_env!("TODO_LOG"),
            option_env!("TODO_ERROR_DISMISS_MS"),
        )
    }

    /// Overlay raw variable values on the defaults. Unusable values keep the
    /// default and are reported once logging is up.
    pub fn from_vars(base_url: Option<&str>, log: Option<&str>, dismiss_ms: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.to_string();
        }
        if let Some(level) = log.and_then(|l| l.trim().parse::<LevelFilter>().ok()) {
            config.log_level = level;
        }
        if let Some(ms) = dismiss_ms.and_then(|ms| ms.trim().parse::<u32>().ok()) {
            config.error_dismiss_ms = ms;
        }
        config
    }

    /// Problems with the raw values, for logging after the logger is installed
    pub fn warnings(base_url: Option<&str>, log: Option<&str>, dismiss_ms: Option<&str>) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(url) = base_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                warnings.push(format!("TODO_API_BASE_URL {:?} has no http(s) scheme", url));
            }
        }
        if let Some(level) = log {
            if level.trim().parse::<LevelFilter>().is_err() {
                warnings.push(format!("TODO_LOG {:?} is not a log level, using info", level));
            }
        }
        if let Some(ms) = dismiss_ms {
            if ms.trim().parse::<u32>().is_err() {
                warnings.push(format!(
                    "TODO_ERROR_DISMISS_MS {:?} is not a number, using {}",
                    ms, DEFAULT_ERROR_DISMISS_MS
                ));
            }
        }
        warnings
    }

    pub fn build_warnings() -> Vec<String> {
        Self::warnings(
            option_env!("TODO_API_BASE_URL"),
            option_env!("TODO_LOG"),
            option_env!("TODO_ERROR_DISMISS_MS"),
        )
    }
}
