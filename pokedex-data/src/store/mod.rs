//! SQLite persistence for the Pokedex catalog.
//!
//! The module is split into two focused submodules:
//! - [`schema`] materialises the three catalog tables and the bookkeeping
//!   tables, and verifies the layout of an existing store.
//! - [`persistence`] wraps the connection in [`PokedexStore`], which writes
//!   types, species and bridge rows and reads them back.
#![forbid(unsafe_code)]

mod persistence;
mod schema;

pub use persistence::{PokedexStore, StoreError, StoredSpecies};
pub use schema::{SCHEMA_VERSION, SchemaError};

#[cfg(test)]
mod tests;
