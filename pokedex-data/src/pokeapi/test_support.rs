//! Test utilities for catalog consumers.
//!
//! [`StubCatalogSource`] is a deterministic stand-in for
//! [`HttpCatalogSource`](super::HttpCatalogSource) that serves canned bodies
//! keyed by URL without opening a socket.

use std::cell::RefCell;
use std::collections::HashMap;

use pokedex_core::{CatalogSource, TransportError};

use super::endpoints;

/// Stub [`CatalogSource`] for testing.
///
/// Unknown URLs answer with an HTTP 404 error. Every requested URL is
/// recorded so tests can assert on fetch order.
///
/// # Example
///
/// ```
/// use pokedex_core::CatalogSource;
/// use pokedex_data::pokeapi::test_support::StubCatalogSource;
///
/// let source = StubCatalogSource::new("https://example.test/api/v2")
///     .with_species_collection(r#"{"count": 1, "results": []}"#);
///
/// let body = source.fetch("https://example.test/api/v2/pokemon/")?;
/// assert!(body.contains("count"));
/// assert!(source.fetch("https://example.test/api/v2/pokemon/1/").is_err());
/// # Ok::<(), pokedex_core::TransportError>(())
/// ```
#[derive(Debug, Default)]
pub struct StubCatalogSource {
    base_url: String,
    bodies: HashMap<String, String>,
    failures: HashMap<String, TransportError>,
    requests: RefCell<Vec<String>>,
}

impl StubCatalogSource {
    /// Create an empty stub rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Serve `body` for `url`.
    #[must_use]
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Fail requests for `url` with `error`.
    #[must_use]
    pub fn with_failure(mut self, url: impl Into<String>, error: TransportError) -> Self {
        self.failures.insert(url.into(), error);
        self
    }

    /// Serve the species collection listing.
    #[must_use]
    pub fn with_species_collection(self, body: impl Into<String>) -> Self {
        let url = endpoints::species_collection_url(&self.base_url);
        self.with_body(url, body)
    }

    /// Serve the first page of the type catalog.
    #[must_use]
    pub fn with_type_listing(self, body: impl Into<String>) -> Self {
        let url = endpoints::type_collection_url(&self.base_url);
        self.with_body(url, body)
    }

    /// Serve the detail document for species `id`.
    #[must_use]
    pub fn with_species(self, id: u32, body: impl Into<String>) -> Self {
        let url = endpoints::species_url(&self.base_url, id);
        self.with_body(url, body)
    }

    /// URLs requested so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl CatalogSource for StubCatalogSource {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        self.requests.borrow_mut().push(url.to_owned());
        if let Some(error) = self.failures.get(url) {
            return Err(error.clone());
        }
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Http {
                url: url.to_owned(),
                status: 404,
                message: "not found".to_owned(),
            })
    }
}
