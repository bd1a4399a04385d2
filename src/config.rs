//! Client configuration: endpoint, signing scope and HTTP transport knobs.
//!
//! Defaults point at the `us-west-2` regional endpoint. Every field can be
//! overridden explicitly, or loaded from `POLLY_*` environment variables via
//! [`ClientConfig::from_env`]. Credentials are never part of this struct.

use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_SERVICE_NAME: &str = "polly";

pub const SPEECH_PATH: &str = "/v1/speech";
pub const VOICES_PATH: &str = "/v1/voices";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Endpoint root. API paths are appended to its path segments.
    pub base_url: Url,
    /// Region used in the signature scope.
    pub region: String,
    /// Service name used in the signature scope.
    pub service_name: String,
    /// Per-request deadline. `None` leaves the call unbounded.
    pub timeout: Option<Duration>,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_region(DEFAULT_REGION)
            .expect("Default region must yield a valid endpoint (this should never happen)")
    }
}

impl ClientConfig {
    /// Configuration for the public regional endpoint of `region`.
    pub fn for_region(region: impl Into<String>) -> Result<Self> {
        let region = region.into();
        Ok(Self {
            base_url: regional_endpoint(&region)?,
            region,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            timeout: None,
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
        })
    }

    /// Load configuration from the environment.
    ///
    /// - `POLLY_REGION` (default `us-west-2`)
    /// - `POLLY_ENDPOINT_URL` (default derived from the region)
    /// - `POLLY_HTTP_TIMEOUT_SECS` (default unset)
    /// - `POLLY_HTTP_POOL_MAX_IDLE_PER_HOST` (default 32)
    /// - `POLLY_PROXY_URL` (default unset)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("POLLY_REGION") {
            Some(region) if !region.trim().is_empty() => Self::for_region(region.trim())?,
            _ => Self::default(),
        };

        if let Some(endpoint) = lookup("POLLY_ENDPOINT_URL") {
            config = config.with_base_url(&endpoint)?;
        }
        if let Some(secs) = lookup("POLLY_HTTP_TIMEOUT_SECS") {
            let secs = parse_env_number::<u64>("POLLY_HTTP_TIMEOUT_SECS", &secs)?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(n) = lookup("POLLY_HTTP_POOL_MAX_IDLE_PER_HOST") {
            config.pool_max_idle_per_host =
                parse_env_number::<usize>("POLLY_HTTP_POOL_MAX_IDLE_PER_HOST", &n)?;
        }
        if let Some(proxy) = lookup("POLLY_PROXY_URL") {
            config.proxy_url = Some(proxy);
        }
        Ok(config)
    }

    /// Switch the signing region and move the endpoint to that region's
    /// public URL. Other settings are kept.
    pub fn with_region(mut self, region: impl Into<String>) -> Result<Self> {
        let region = region.into();
        self.base_url = regional_endpoint(&region)?;
        self.region = region;
        Ok(self)
    }

    /// Point the client at another endpoint (a mock server, a VPC endpoint).
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Absolute URL of an API path under the base URL. The base URL's query
    /// is kept; its fragment is dropped.
    pub fn endpoint(&self, path: &str) -> String {
        let mut url = self.base_url.clone();
        url.set_fragment(None);
        // Base URLs are checked to carry a path when they are set.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url.into()
    }
}

fn regional_endpoint(region: &str) -> Result<Url> {
    parse_base_url(&format!("https://polly.{}.amazonaws.com", region)).map_err(|_| {
        Error::configuration_with_context(
            format!("Region '{}' does not form a valid endpoint", region),
            ErrorContext::new().with_field_path("region").with_source("config"),
        )
    })
}

fn parse_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid base URL '{}': {}", url, e),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_source("config"),
        )
    })?;
    if parsed.cannot_be_a_base() {
        return Err(Error::configuration_with_context(
            format!("Base URL '{}' cannot carry a path", url),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_source("config"),
        ));
    }
    Ok(parsed)
}

fn parse_env_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        Error::configuration_with_context(
            format!("{} must be a non-negative integer, got '{}'", key, value),
            ErrorContext::new().with_field_path(key).with_source("config"),
        )
    })
}
