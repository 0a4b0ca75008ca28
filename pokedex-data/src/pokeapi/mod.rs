//! PokeAPI transport and document decoding.
//!
//! [`HttpCatalogSource`] implements [`pokedex_core::CatalogSource`] over
//! `reqwest`, blocking on an owned Tokio runtime so callers stay synchronous.
//! The parser functions turn raw response bodies into core values; they never
//! touch the network.
//!
//! # Example
//!
//! ```no_run
//! use pokedex_core::CatalogSource;
//! use pokedex_data::pokeapi::{HttpCatalogSource, endpoints, parse_count};
//!
//! let source = HttpCatalogSource::new("https://pokeapi.co/api/v2")?;
//! let body = source.fetch(&endpoints::species_collection_url(source.base_url()))?;
//! println!("{} species available", parse_count(&body)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod endpoints;
mod error;
mod ids;
mod parse;
mod source;

#[doc(hidden)]
pub mod test_support;


pub use error::ParseError;
pub use ids::{TYPE_MARKER, extract_trailing_id};
pub use parse::{parse_count, parse_species, parse_type_catalog};
pub use source::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpCatalogSource, HttpCatalogSourceConfig,
    SourceBuildError,
};
