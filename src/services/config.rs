use crate::constants::{api, env as env_keys, network};
use crate::errors::ConfigError;
use once_cell::sync::Lazy;
use std::fmt;
use std::path::Path;
use url::Url;

static DEFAULT_BASE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse(api::DEFAULT_BASE_URL).expect("api::DEFAULT_BASE_URL must be a valid URL"));

/// Connection settings for the Clockodo API, resolved once at startup.
#[derive(Clone)]
pub struct ClockodoConfig {
    pub api_user: String,
    api_key: String,
    pub base_url: Url,
    pub external_application: String,
    pub timeout_ms: u64,
}

impl ClockodoConfig {
    pub fn new(api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        let api_user = api_user.into();
        Self {
            external_application: default_external_application(&api_user),
            api_user,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.clone(),
            timeout_ms: network::TIMEOUT_API_REQUEST_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_user =
            read(env_keys::API_USER).ok_or(ConfigError::MissingVariable(env_keys::API_USER))?;
        let api_key =
            read(env_keys::API_KEY).ok_or(ConfigError::MissingVariable(env_keys::API_KEY))?;
        let mut config = Self::new(api_user, api_key);

        if let Some(raw) = read(env_keys::BASE_URL) {
            config.base_url = parse_base_url(&raw)?;
        }
        if let Some(app) = read(env_keys::EXTERNAL_APPLICATION) {
            config.external_application = app;
        }
        if let Some(raw) = read(env_keys::TIMEOUT_MS) {
            config.timeout_ms = raw
                .parse::<u64>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: env_keys::TIMEOUT_MS,
                    reason: format!("expected a positive integer, got '{}'", raw),
                })?;
        }
        Ok(config)
    }

    /// Builds the absolute URL of an API path such as `/v2/entries/7`.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))
    }
}

impl fmt::Debug for ClockodoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockodoConfig")
            .field("api_user", &self.api_user)
            .field("api_key", &"***")
            .field("base_url", &self.base_url.as_str())
            .field("external_application", &self.external_application)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn default_external_application(api_user: &str) -> String {
    format!("{};{}", api::APPLICATION_NAME, api_user)
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::Invalid {
        name: env_keys::BASE_URL,
        reason: err.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            name: env_keys::BASE_URL,
            reason: "only http/https URLs are supported".to_string(),
        });
    }
    Ok(url)
}

/// Primes the process environment from a `.env` file. Variables already set
/// in the process keep their values.
///
/// An explicit `CLOCKODO_ENV_FILE` must exist; the implicit `./.env` is optional.
pub fn load_env_file() -> Result<Option<String>, ConfigError> {
    if let Ok(explicit) = std::env::var(env_keys::ENV_FILE) {
        let path = explicit.trim();
        if !path.is_empty() {
            dotenvy::from_path(Path::new(path)).map_err(|err| ConfigError::EnvFile {
                path: path.to_string(),
                reason: err.to_string(),
            })?;
            return Ok(Some(path.to_string()));
        }
    }
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path.display().to_string())),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(ConfigError::EnvFile {
            path: ".env".to_string(),
            reason: err.to_string(),
        }),
    }
}
