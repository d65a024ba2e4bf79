use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_UPLOAD_PATH: &str = "/upload";
pub const DEFAULT_STOP_PATH: &str = "/stop";
pub const DEFAULT_IMAGE_PREFIX: &str = "/images";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("SLIDES_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Where the client sends uploads and how it names the slide images it renders.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub upload_path: String,
    pub stop_path: String,
    pub image_prefix: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            stop_path: DEFAULT_STOP_PATH.to_string(),
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            timeout: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // a missing .env is fine

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup("SLIDES_BASE_URL") {
            Some(raw) => parse_base_url("SLIDES_BASE_URL", &raw)?,
            None => parse_base_url("SLIDES_BASE_URL", DEFAULT_BASE_URL)?,
        };
        let mut config = Self::new(base_url);

        if let Some(path) = lookup("SLIDES_UPLOAD_PATH") {
            config.upload_path = path;
        }
        if let Some(path) = lookup("SLIDES_STOP_PATH") {
            config.stop_path = path;
        }
        if let Some(prefix) = lookup("SLIDES_IMAGE_PREFIX") {
            config.image_prefix = prefix.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("SLIDES_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url("--base-url", raw)?;
        Ok(self)
    }

    pub fn upload_url(&self) -> Result<Url, ConfigError> {
        self.endpoint("SLIDES_UPLOAD_PATH", &self.upload_path)
    }

    pub fn stop_url(&self) -> Result<Url, ConfigError> {
        self.endpoint("SLIDES_STOP_PATH", &self.stop_path)
    }

    /// Endpoint paths are relative to the base URL, including any path it carries.
    fn endpoint(&self, key: &'static str, path: &str) -> Result<Url, ConfigError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|source| ConfigError::InvalidUrl { key, source })
    }
}

fn parse_base_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { key, source })
}
