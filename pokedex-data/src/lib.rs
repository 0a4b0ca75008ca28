//! Data access and ingestion logic for the Pokedex engine.
//!
//! Responsibilities:
//! - Fetch and decode PokeAPI documents ([`pokeapi`]).
//! - Own the SQLite schema and its persistence rules ([`store`]).
//! - Drive a full catalog ingest from remote source to store ([`ingest`]).
//!
//! Boundaries:
//! - Domain values live in `pokedex-core`; this crate only moves them.
//! - Every operation is blocking; the HTTP source drives its own runtime.
//!
//! Invariants:
//! - No global mutable state. The species roster is owned by the caller.
#![forbid(unsafe_code)]

pub mod ingest;
pub mod pokeapi;
pub mod store;

pub use ingest::{
    IngestError, IngestPhase, IngestReport, Roster, SkipReason, SkippedSpecies, ingest_catalog,
};
pub use pokeapi::{HttpCatalogSource, HttpCatalogSourceConfig, ParseError, SourceBuildError};
pub use store::{PokedexStore, SchemaError, StoreError, StoredSpecies};
