//! Error types emitted by the Pokedex CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use pokedex_data::{IngestError, SourceBuildError, StoreError};
use thiserror::Error;

/// Errors emitted by the Pokedex CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing or empty after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The store path could not be inspected.
    #[error("failed to inspect store path {path:?}: {source}")]
    InspectStore {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An incomplete store could not be removed before rebuilding.
    #[error("failed to remove incomplete store {path:?}: {source}")]
    RemoveStore {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening or querying the store failed.
    #[error("failed to open store {path:?}: {source}")]
    OpenStore {
        path: Utf8PathBuf,
        #[source]
        source: StoreError,
    },
    /// Constructing the HTTP catalog source failed.
    #[error("failed to build catalog source for {base_url:?}: {source}")]
    BuildCatalogSource {
        base_url: String,
        #[source]
        source: SourceBuildError,
    },
    /// The ingest run aborted.
    #[error("failed to build Pokedex at {path:?}: {source}")]
    Ingest {
        path: Utf8PathBuf,
        #[source]
        source: IngestError,
    },
}
