//! Test helpers: a stub-backed source builder and on-disk store fixtures.

use crate::build::{BuildConfig, CatalogSourceBuilder};
use crate::CliError;
use camino::Utf8PathBuf;
use pokedex_core::CatalogSource;
use pokedex_data::PokedexStore;
use pokedex_data::pokeapi::test_support::StubCatalogSource;
use std::cell::Cell;
use std::time::Duration;
use tempfile::TempDir;

pub(super) const STUB_BASE: &str = "https://stub.test/api/v2";

/// A one-type, two-species catalog served without network access.
pub(super) fn small_catalog(base: &str) -> StubCatalogSource {
    let species = |name: &str| {
        format!(
            r#"{{"forms": [{{"name": "{name}"}}], "stats": [], "types": [{{"type": {{"url": "{base}/type/13/"}}}}]}}"#
        )
    };
    StubCatalogSource::new(base)
        .with_species_collection(r#"{"count": 2, "results": []}"#)
        .with_type_listing(format!(
            r#"{{"count": 1, "results": [{{"name": "electric", "url": "{base}/type/13/"}}]}}"#
        ))
        .with_species(1, species("pichu"))
        .with_species(2, species("pikachu"))
}

/// Source builder that hands out [`small_catalog`] and counts invocations.
#[derive(Debug, Default)]
pub(super) struct StubSourceBuilder {
    builds: Cell<usize>,
}

impl StubSourceBuilder {
    pub(super) fn builds(&self) -> usize {
        self.builds.get()
    }
}

impl CatalogSourceBuilder for StubSourceBuilder {
    fn build(&self, config: &BuildConfig) -> Result<Box<dyn CatalogSource>, CliError> {
        self.builds.set(self.builds.get() + 1);
        Ok(Box::new(small_catalog(&config.base_url)))
    }
}

/// Temporary directory holding the store under test.
#[derive(Debug)]
pub(super) struct StoreDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl StoreDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self { _dir: dir, root }
    }

    pub(super) fn database(&self) -> Utf8PathBuf {
        self.root.join("pokedex.db")
    }

    pub(super) fn config(&self) -> BuildConfig {
        BuildConfig {
            database: self.database(),
            base_url: STUB_BASE.to_owned(),
            user_agent: String::new(),
            timeout: Some(Duration::from_secs(5)),
        }
    }

    /// Leave behind a store whose last run never finished.
    pub(super) fn seed_incomplete_store(&self) {
        let mut store = PokedexStore::open(&self.database()).expect("open store");
        store.initialise_schema().expect("initialise schema");
        store.begin_run(2).expect("begin run");
    }

    /// Leave behind a store whose last run completed.
    pub(super) fn seed_complete_store(&self) {
        let mut store = PokedexStore::open(&self.database()).expect("open store");
        store.initialise_schema().expect("initialise schema");
        let run = store.begin_run(0).expect("begin run");
        store.complete_run(run, 0, 0).expect("complete run");
    }

    pub(super) fn open(&self) -> PokedexStore {
        PokedexStore::open(&self.database()).expect("open store")
    }
}
