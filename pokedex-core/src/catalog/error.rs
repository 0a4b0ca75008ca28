use thiserror::Error;

/// Errors from [`crate::catalog::CatalogSource::fetch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short description supplied by the transport.
        message: String,
    },
    /// The request did not complete before the configured deadline.
    #[error("request to {url} timed out")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
    },
    /// Connection-level failure (refused, reset, DNS, body read).
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// Description of the underlying failure.
        message: String,
    },
}

impl TransportError {
    /// URL of the request that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. } | Self::Timeout { url } | Self::Network { url, .. } => url,
        }
    }
}
