//! Core domain types for the Pokedex engine.
//!
//! The crate holds the values that flow through an ingest run: the type
//! catalog entries, the immutable [`Species`] produced by a
//! [`SpeciesBuilder`], and the [`CatalogSource`] seam used to fetch raw
//! documents from the remote encyclopedia. It performs no I/O of its own.
#![forbid(unsafe_code)]

pub mod catalog;
mod pokemon_type;
mod species;
mod stat;

pub use catalog::{CatalogSource, TransportError};
pub use pokemon_type::PokemonType;
pub use species::{Species, SpeciesBuilder};
pub use stat::Stat;
