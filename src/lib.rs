//! Facade crate for the Pokedex engine.
//!
//! This crate re-exports the core domain types and, behind the `ingest`
//! feature, the PokeAPI client, SQLite store and ingest pipeline.

#![forbid(unsafe_code)]

pub use pokedex_core::{
    CatalogSource, PokemonType, Species, SpeciesBuilder, Stat, TransportError,
};

#[cfg(feature = "ingest")]
pub use pokedex_data::{
    HttpCatalogSource, HttpCatalogSourceConfig, IngestError, IngestPhase, IngestReport,
    ParseError, PokedexStore, Roster, SchemaError, SkipReason, SkippedSpecies, SourceBuildError,
    StoreError, StoredSpecies, ingest_catalog,
};
