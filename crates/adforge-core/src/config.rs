use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Like [`load_app_config`], but any key present in `overrides` wins over
/// both `.env` and the process environment.
///
/// # Errors
///
/// Returns `ConfigError` if required values are missing or invalid.
pub fn load_app_config_with_overrides(
    overrides: &HashMap<&str, String>,
) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| match overrides.get(key) {
        Some(value) => Ok(value.clone()),
        None => std::env::var(key),
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: e.to_string(),
                    })
            }
            _ => Ok(None),
        }
    };

    let discovery_url =
        parse_webhook_url("ADFORGE_DISCOVERY_URL", &require("ADFORGE_DISCOVERY_URL")?)?;
    let generation_url =
        parse_webhook_url("ADFORGE_GENERATION_URL", &require("ADFORGE_GENERATION_URL")?)?;

    let env = parse_environment(&or_default("ADFORGE_ENV", "development"))?;
    let log_level = or_default("ADFORGE_LOG_LEVEL", "info");
    let webhook_timeout_secs = parse_optional_u64("ADFORGE_WEBHOOK_TIMEOUT_SECS")?;
    let user_agent = or_default("ADFORGE_USER_AGENT", "adforge/0.1 (campaign-wizard)");
    let sample_video_path = or_default("ADFORGE_SAMPLE_VIDEO_PATH", "/sample-video.mp4");
    let sample_image_path = or_default("ADFORGE_SAMPLE_IMAGE_PATH", "/sample-image.png");
    let output_dir = PathBuf::from(or_default("ADFORGE_OUTPUT_DIR", "./generated"));

    Ok(AppConfig {
        env,
        log_level,
        discovery_url,
        generation_url,
        webhook_timeout_secs,
        user_agent,
        sample_video_path,
        sample_image_path,
        output_dir,
    })
}

/// Parse and check a webhook endpoint. Only `http` and `https` are accepted.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] naming `var` if `raw` is not an
/// absolute http(s) URL.
pub fn parse_webhook_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADFORGE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
