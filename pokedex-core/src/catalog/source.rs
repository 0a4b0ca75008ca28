//! Catalog source trait.

use super::error::TransportError;

/// Issue blocking GET requests against the remote catalog.
///
/// # Examples
///
/// ```rust
/// use pokedex_core::{CatalogSource, TransportError};
///
/// struct Canned;
///
/// impl CatalogSource for Canned {
///     fn base_url(&self) -> &str {
///         "https://example.test/api/v2"
///     }
///
///     fn fetch(&self, url: &str) -> Result<String, TransportError> {
///         if url.ends_with("/pokemon/") {
///             Ok(r#"{"count": 1}"#.to_owned())
///         } else {
///             Err(TransportError::Http {
///                 url: url.to_owned(),
///                 status: 404,
///                 message: "not found".to_owned(),
///             })
///         }
///     }
/// }
///
/// let body = Canned.fetch("https://example.test/api/v2/pokemon/")?;
/// assert!(body.contains("count"));
/// # Ok::<(), TransportError>(())
/// ```
pub trait CatalogSource {
    /// Base URL of the API, without a trailing slash.
    fn base_url(&self) -> &str;

    /// Fetch `url` and return the raw response body.
    ///
    /// Implementations must not retry or cache.
    fn fetch(&self, url: &str) -> Result<String, TransportError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn base_url(&self) -> &str {
        (**self).base_url()
    }

    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        (**self).fetch(url)
    }
}
