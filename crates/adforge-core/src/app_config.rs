use std::path::PathBuf;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub discovery_url: Url,
    pub generation_url: Url,
    /// `None` leaves webhook calls unbounded.
    pub webhook_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub sample_video_path: String,
    pub sample_image_path: String,
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("discovery_url", &redact_query(&self.discovery_url))
            .field("generation_url", &redact_query(&self.generation_url))
            .field("webhook_timeout_secs", &self.webhook_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("sample_video_path", &self.sample_video_path)
            .field("sample_image_path", &self.sample_image_path)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

/// Webhook URLs sometimes carry tokens in the query string.
fn redact_query(url: &Url) -> String {
    let mut shown = url.clone();
    if shown.query().is_some() {
        shown.set_query(Some("[redacted]"));
    }
    shown.to_string()
}
