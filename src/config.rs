//! Application configuration loaded from environment variables.
//!
//! - `IMS_API_URL` overrides the default API base URL
//!   (`http://localhost:8081/api`).
//! - `IMS_API_TIMEOUT_SECS` sets a per-request timeout in whole seconds.
//!   Without it the HTTP client's default applies.
//! - `IMS_LOG_FILE` names a file that receives tracing output. The
//!   terminal belongs to the UI, so logging stays off when unset.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8081/api";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log_file: Option<PathBuf>,
}

/// Settings for the remote inventory API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; resource endpoints are `{base_url}/{resource}`.
    pub base_url: Url,
    /// Optional per-request timeout.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    /// Builds an API configuration from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns [`ImsError::Config`](crate::ImsError::Config) if the URL does
    /// not parse or cannot serve as a base for resource paths.
    pub fn new(base_url: &str) -> crate::Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            crate::ImsError::Config(format!("invalid API URL {base_url:?}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(crate::ImsError::Config(format!(
                "API URL {base_url} cannot be used as a base"
            )));
        }
        Ok(Self {
            base_url,
            timeout: None,
        })
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the collection endpoint for a resource path segment.
    pub fn endpoint(&self, resource: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource);
        }
        url
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`ImsError::Config`](crate::ImsError::Config) if `IMS_API_URL`
/// is not a usable URL or `IMS_API_TIMEOUT_SECS` is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = non_empty_var("IMS_API_URL");
    let mut api = ApiConfig::new(base_url.as_deref().unwrap_or(DEFAULT_API_URL))?;

    if let Some(raw) = non_empty_var("IMS_API_TIMEOUT_SECS") {
        let secs = raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| {
                crate::ImsError::Config(format!(
                    "IMS_API_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                ))
            })?;
        api = api.with_timeout(Duration::from_secs(secs));
    }

    let log_file = non_empty_var("IMS_LOG_FILE").map(PathBuf::from);

    Ok(AppConfig { api, log_file })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
