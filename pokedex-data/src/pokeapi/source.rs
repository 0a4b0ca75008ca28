//! HTTP-backed [`CatalogSource`] for PokeAPI.
//!
//! [`CatalogSource`] is synchronous so the ingest pipeline stays a plain
//! loop. This source bridges to `reqwest` by blocking on a current-thread
//! Tokio runtime that it owns and reuses for every request.

use std::time::Duration;

use pokedex_core::{CatalogSource, TransportError};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Public PokeAPI endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "pokedex-engine/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised when constructing an [`HttpCatalogSource`].
#[derive(Debug, Error)]
pub enum SourceBuildError {
    #[error("invalid base URL '{base_url}'")]
    InvalidBaseUrl {
        base_url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
    #[error("failed to build Tokio runtime")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpCatalogSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCatalogSourceConfig {
    /// API root, e.g. `"https://pokeapi.co/api/v2"`.
    pub base_url: String,
    /// Value of the `User-Agent` header. May be empty.
    pub user_agent: String,
    /// Whole-request deadline; `None` disables it.
    pub timeout: Option<Duration>,
}

impl Default for HttpCatalogSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl HttpCatalogSourceConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Blocking PokeAPI client.
///
/// When called from inside a multi-threaded Tokio runtime the request runs on
/// that runtime via [`tokio::task::block_in_place`]; otherwise it runs on the
/// source's own current-thread runtime.
pub struct HttpCatalogSource {
    client: Client,
    config: HttpCatalogSourceConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpCatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogSource")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpCatalogSource {
    /// Create a source with default settings for `base_url`.
    ///
    /// # Errors
    ///
    /// See [`HttpCatalogSource::with_config`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceBuildError> {
        Self::with_config(HttpCatalogSourceConfig::new(base_url))
    }

    /// Create a source with explicit configuration.
    ///
    /// Trailing slashes are trimmed from the base URL and an empty value falls
    /// back to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`SourceBuildError::InvalidBaseUrl`] when the base URL is not
    /// absolute, or a build error from the HTTP client or runtime.
    pub fn with_config(mut config: HttpCatalogSourceConfig) -> Result<Self, SourceBuildError> {
        config.base_url = sanitise_base_url(&config.base_url);
        url::Url::parse(&config.base_url).map_err(|source| SourceBuildError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            source,
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }
        let client = builder.build().map_err(SourceBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration, after base URL normalisation.
    #[must_use]
    pub fn config(&self) -> &HttpCatalogSourceConfig {
        &self.config
    }

    async fn fetch_async(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.config.user_agent.as_str())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, url))?;
        response
            .text()
            .await
            .map_err(|err| convert_reqwest_error(&err, url))
    }
}

impl CatalogSource for HttpCatalogSource {
    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let future = self.fetch_async(url);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Trim trailing slashes and fall back to the public PokeAPI endpoint.
pub(crate) fn sanitise_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn convert_reqwest_error(error: &reqwest::Error, url: &str) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout {
            url: url.to_owned(),
        };
    }

    if let Some(status) = error.status() {
        return TransportError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    TransportError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}
