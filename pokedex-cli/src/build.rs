//! Build command: ensure a complete Pokedex store exists at the configured path.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pokedex_core::CatalogSource;
use pokedex_data::pokeapi::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use pokedex_data::{
    HttpCatalogSource, HttpCatalogSourceConfig, IngestReport, PokedexStore, Roster,
    ingest_catalog,
};
use serde::{Deserialize, Serialize};

use crate::{ARG_BASE_URL, ARG_DATABASE, ARG_TIMEOUT_SECS, ARG_USER_AGENT, CliError, ENV_DATABASE};

const DEFAULT_DATABASE: &str = "pokedex.db";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI arguments for the `build` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "build",
    long_about = "Create the SQLite Pokedex if it does not exist yet. A store \
                 left behind by an interrupted run is removed and rebuilt; a \
                 complete store is left untouched.",
    about = "Create or repair the local Pokedex store"
)]
#[ortho_config(prefix = "POKEDEX")]
pub(crate) struct BuildArgs {
    /// Path to the SQLite store (default `pokedex.db`).
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// PokeAPI root (default `https://pokeapi.co/api/v2`).
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Value sent in the `User-Agent` header; may be empty.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Per-request timeout in seconds; `0` disables it.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl BuildArgs {
    pub(crate) fn into_config(self) -> Result<BuildConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BuildConfig::try_from(merged)
    }
}

/// Resolved `build` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildConfig {
    /// Path to the SQLite store.
    pub(crate) database: Utf8PathBuf,
    /// PokeAPI root URL.
    pub(crate) base_url: String,
    /// `User-Agent` header value.
    pub(crate) user_agent: String,
    /// Request deadline, if any.
    pub(crate) timeout: Option<Duration>,
}

impl BuildConfig {
    pub(crate) fn source_config(&self) -> HttpCatalogSourceConfig {
        HttpCatalogSourceConfig::new(self.base_url.clone())
            .with_user_agent(self.user_agent.clone())
            .with_timeout(self.timeout)
    }
}

impl TryFrom<BuildArgs> for BuildConfig {
    type Error = CliError;

    fn try_from(args: BuildArgs) -> Result<Self, Self::Error> {
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));
        if database.as_str().trim().is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_DATABASE,
                env: ENV_DATABASE,
            });
        }
        let base_url = args
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let user_agent = args
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());
        let timeout = match args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Ok(Self {
            database,
            base_url,
            user_agent,
            timeout,
        })
    }
}

/// Builds the catalog source for the current build invocation.
pub(crate) trait CatalogSourceBuilder {
    fn build(&self, config: &BuildConfig) -> Result<Box<dyn CatalogSource>, CliError>;
}

pub(crate) struct HttpCatalogSourceBuilder;

impl CatalogSourceBuilder for HttpCatalogSourceBuilder {
    fn build(&self, config: &BuildConfig) -> Result<Box<dyn CatalogSource>, CliError> {
        let source = HttpCatalogSource::with_config(config.source_config()).map_err(|source| {
            CliError::BuildCatalogSource {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(source))
    }
}

/// What a build invocation did.
#[derive(Debug)]
pub(crate) enum BuildOutcome {
    /// A complete store already existed.
    AlreadyReady,
    /// A fresh store was ingested.
    Built(IngestReport),
}

pub(crate) fn run_build(args: BuildArgs) -> Result<BuildOutcome, CliError> {
    let config = args.into_config()?;
    run_build_with(&config, &HttpCatalogSourceBuilder)
}

pub(crate) fn run_build_with(
    config: &BuildConfig,
    builder: &dyn CatalogSourceBuilder,
) -> Result<BuildOutcome, CliError> {
    let path = config.database.as_path();
    if store_exists(path)? {
        if store_is_complete(path)? {
            info!("Pokedex is ready.");
            return Ok(BuildOutcome::AlreadyReady);
        }
        warn!("Pokedex at {path} is incomplete; rebuilding from scratch");
        pokedex_fs::remove_file(path).map_err(|source| CliError::RemoveStore {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let source = builder.build(config)?;
    let mut store = open_store(path)?;
    let report = ingest_catalog(source.as_ref(), &mut store, Roster::new()).map_err(|source| {
        CliError::Ingest {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(
        "Pokedex written to {path}: {} types, {} species",
        report.types_loaded, report.species_loaded
    );
    Ok(BuildOutcome::Built(report))
}

fn store_exists(path: &Utf8Path) -> Result<bool, CliError> {
    pokedex_fs::file_is_file(path).map_err(|source| CliError::InspectStore {
        path: path.to_path_buf(),
        source,
    })
}

fn store_is_complete(path: &Utf8Path) -> Result<bool, CliError> {
    open_store(path)?
        .is_complete()
        .map_err(|source| CliError::OpenStore {
            path: path.to_path_buf(),
            source,
        })
}

fn open_store(path: &Utf8Path) -> Result<PokedexStore, CliError> {
    PokedexStore::open(path).map_err(|source| CliError::OpenStore {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<BuildConfig, CliError> {
    let merged = BuildArgs::merge_from_layers(layers).map_err(CliError::from)?;
    BuildConfig::try_from(merged)
}
