//! Fetch raw documents from the remote species catalog.
//!
//! The [`CatalogSource`] trait abstracts a single blocking GET that returns
//! the response body as text. Implementations perform no parsing; callers
//! decide whether a failure is fatal for the whole run or only for one
//! document.

mod error;
mod source;

pub use error::TransportError;
pub use source::CatalogSource;
