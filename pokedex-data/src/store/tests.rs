//! Unit tests for the Pokedex SQLite store.

use super::{PokedexStore, SCHEMA_VERSION, SchemaError, StoreError};
use camino::Utf8PathBuf;
use chrono::{TimeZone, Utc};
use pokedex_core::{PokemonType, Species, SpeciesBuilder};
use rstest::{fixture, rstest};
use rusqlite::Connection;
use tempfile::TempDir;

fn grass_and_poison() -> Vec<PokemonType> {
    vec![PokemonType::new(4, "poison"), PokemonType::new(12, "grass")]
}

fn bulbasaur() -> Species {
    SpeciesBuilder::new(1)
        .with_name("bulbasaur")
        .with_base_experience(64)
        .with_height(0.7)
        .with_weight(6.9)
        .with_hp(45)
        .with_attack(49)
        .with_defense(49)
        .with_special_attack(65)
        .with_special_defense(65)
        .with_speed(45)
        .with_types(vec![4, 12])
        .build()
}

#[fixture]
fn store() -> PokedexStore {
    let mut store = PokedexStore::open_in_memory().expect("open in-memory store");
    store.initialise_schema().expect("initialise schema");
    store
}

#[fixture]
fn seeded(mut store: PokedexStore) -> PokedexStore {
    store
        .persist_type_catalog(&grass_and_poison())
        .expect("persist types");
    store
}

#[rstest]
fn initialise_schema_is_idempotent(mut store: PokedexStore) {
    store.initialise_schema().expect("second initialisation");
    assert_eq!(store.type_count().expect("count types"), 0);
    assert!(!store.is_complete().expect("inspect runs"));
}

#[rstest]
fn records_schema_version(store: PokedexStore) {
    let version: i64 = store
        .connection
        .query_row("SELECT version FROM pokedex_schema_version", [], |row| row.get(0))
        .expect("schema version present");
    assert_eq!(version, SCHEMA_VERSION);
}

#[rstest]
fn rejects_tables_with_foreign_layout() {
    let mut store = PokedexStore::open_in_memory().expect("open in-memory store");
    store
        .connection
        .execute("CREATE TABLE types (id INTEGER PRIMARY KEY, label TEXT)", [])
        .expect("create conflicting table");

    let err = store.initialise_schema().expect_err("layout must be rejected");

    match err {
        SchemaError::IncompatibleTable { table, found, .. } => {
            assert_eq!(table, "types");
            assert_eq!(found, "id, label");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn rejects_unknown_schema_version(mut store: PokedexStore) {
    store
        .connection
        .execute("UPDATE pokedex_schema_version SET version = 7", [])
        .expect("bump version");

    let err = store.initialise_schema().expect_err("version must be rejected");

    assert!(matches!(
        err,
        SchemaError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found: 7
        }
    ));
}

#[rstest]
fn persists_and_reloads_type_catalog(mut store: PokedexStore) {
    let inserted = store
        .persist_type_catalog(&grass_and_poison())
        .expect("persist types");
    assert_eq!(inserted, 2);
    assert_eq!(
        store.load_type_catalog().expect("load types"),
        grass_and_poison()
    );
}

#[rstest]
fn duplicate_type_batch_is_rolled_back(mut store: PokedexStore) {
    let batch = vec![PokemonType::new(1, "normal"), PokemonType::new(1, "fighting")];

    let err = store.persist_type_catalog(&batch).expect_err("duplicate id");

    assert!(matches!(err, StoreError::Constraint { .. }));
    assert_eq!(store.type_count().expect("count types"), 0);
}

#[rstest]
fn species_before_types_violates_constraint(mut store: PokedexStore) {
    let err = store
        .persist_species(&bulbasaur())
        .expect_err("types are missing");

    assert!(matches!(err, StoreError::Constraint { .. }));
    assert_eq!(store.species_count().expect("count species"), 0);
    assert_eq!(store.bridge_count().expect("count bridges"), 0);
}

#[rstest]
fn duplicate_species_is_rejected(mut seeded: PokedexStore) {
    seeded.persist_species(&bulbasaur()).expect("first insert");
    let err = seeded
        .persist_species(&bulbasaur())
        .expect_err("duplicate species");
    assert!(matches!(err, StoreError::Constraint { .. }));
    assert_eq!(seeded.bridge_count().expect("count bridges"), 2);
}

#[rstest]
fn species_round_trips_with_timestamp(mut seeded: PokedexStore) {
    let captured_at = Utc
        .with_ymd_and_hms(2016, 10, 18, 9, 30, 0)
        .single()
        .expect("valid timestamp");

    seeded
        .persist_species_at(&bulbasaur(), captured_at)
        .expect("persist species");

    let stored = seeded
        .load_species(1)
        .expect("load species")
        .expect("species present");
    assert_eq!(stored.species, bulbasaur());
    assert_eq!(stored.captured_at, captured_at);
    assert_eq!(stored.species.types(), &[4, 12]);
}

#[rstest]
fn bridge_rows_keep_source_order(mut seeded: PokedexStore) {
    let reversed = SpeciesBuilder::new(2)
        .with_name("ivysaur")
        .with_types(vec![12, 4])
        .build();
    seeded.persist_species(&reversed).expect("persist species");

    let stored = seeded
        .load_species(2)
        .expect("load species")
        .expect("species present");
    assert_eq!(stored.species.types(), &[12, 4]);
}

#[rstest]
fn persist_species_stamps_insertion_time(mut seeded: PokedexStore) {
    let before = Utc::now();
    let stamped = seeded.persist_species(&bulbasaur()).expect("persist species");
    let after = Utc::now();

    assert!(before <= stamped && stamped <= after);
    let stored = seeded
        .load_species(1)
        .expect("load species")
        .expect("species present");
    assert_eq!(stored.captured_at, stamped);
}

#[rstest]
fn read_back_counts(mut seeded: PokedexStore) {
    assert_eq!(seeded.last_species_id().expect("last id"), None);
    assert!(seeded.load_species(1).expect("load species").is_none());

    seeded.persist_species(&bulbasaur()).expect("persist bulbasaur");
    seeded
        .persist_species(&SpeciesBuilder::new(3).with_types(vec![12]).build())
        .expect("persist venusaur");

    assert_eq!(seeded.type_count().expect("count types"), 2);
    assert_eq!(seeded.species_count().expect("count species"), 2);
    assert_eq!(seeded.bridge_count().expect("count bridges"), 3);
    assert_eq!(seeded.last_species_id().expect("last id"), Some(3));
}

#[rstest]
fn run_bookkeeping_tracks_completion(store: PokedexStore) {
    let first = store.begin_run(3).expect("begin run");
    assert!(!store.is_complete().expect("inspect runs"));

    store.complete_run(first, 3, 0).expect("complete run");
    assert!(store.is_complete().expect("inspect runs"));

    store.begin_run(3).expect("begin second run");
    assert!(!store.is_complete().expect("latest run is open"));
}

#[rstest]
fn completing_unknown_run_fails(store: PokedexStore) {
    let err = store.complete_run(99, 0, 0).expect_err("unknown run");
    assert!(matches!(err, StoreError::UnknownRun { run_id: 99 }));
}

#[rstest]
fn store_without_bookkeeping_is_incomplete() {
    let store = PokedexStore::open_in_memory().expect("open in-memory store");
    assert!(!store.is_complete().expect("inspect runs"));
}

#[rstest]
fn open_creates_parent_directories() {
    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    let path = root.join("nested/data/pokedex.db");

    let mut store = PokedexStore::open(&path).expect("open on-disk store");
    store.initialise_schema().expect("initialise schema");

    assert_eq!(store.location(), Some(path.as_path()));
    assert!(path.is_file());
}

#[rstest]
fn on_disk_store_enforces_foreign_keys() {
    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    let path = root.join("pokedex.db");
    {
        let mut store = PokedexStore::open(&path).expect("open store");
        store.initialise_schema().expect("initialise schema");
    }

    let mut reopened = PokedexStore::open(&path).expect("reopen store");
    let err = reopened
        .persist_species(&bulbasaur())
        .expect_err("foreign keys enforced after reopen");
    assert!(matches!(err, StoreError::Constraint { .. }));

    let raw = Connection::open(&path).expect("open raw connection");
    let rows: i64 = raw
        .query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))
        .expect("count rows");
    assert_eq!(rows, 0);
}
