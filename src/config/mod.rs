//! Configuration for loanwiz
//!
//! Runtime settings only: the wizard keeps no state on disk, so settings are
//! assembled from defaults and CLI/environment overrides at startup.

use std::time::Duration;

use serde::Serialize;

use crate::error::{WizardError, WizardResult};

/// Default base URL of the catalog/submission service
pub const DEFAULT_API_BASE_URL: &str = "https://dummyjson.com";

/// How long a fetched category list stays fresh
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;

/// Runtime settings for the wizard
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Base URL of the remote service (category list + submission)
    pub api_base_url: String,

    /// Category cache time-to-live in seconds
    pub cache_ttl_secs: u64,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Build settings from an optional base URL override
    pub fn with_base_url(base_url: Option<String>) -> WizardResult<Self> {
        let mut settings = Self::default();
        if let Some(url) = base_url {
            let trimmed = url.trim_end_matches('/');
            if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
                return Err(WizardError::Config(format!(
                    "API base URL must start with http:// or https://, got '{}'",
                    url
                )));
            }
            settings.api_base_url = trimmed.to_string();
        }
        Ok(settings)
    }

    /// Category cache time-to-live
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// HTTP request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
