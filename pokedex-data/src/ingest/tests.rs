//! Unit tests for the ingest pipeline driven by the stub catalog source.

use super::{IngestError, IngestPhase, Roster, SkipReason, ingest_catalog};
use crate::pokeapi::test_support::StubCatalogSource;
use crate::pokeapi::{ParseError, endpoints};
use crate::store::{PokedexStore, StoreError};
use pokedex_core::{SpeciesBuilder, TransportError};
use rstest::{fixture, rstest};

const BASE: &str = "https://example.test/api/v2";

fn type_listing(count: u32, entries: &[(u32, &str)]) -> String {
    let results: Vec<_> = entries
        .iter()
        .map(|(id, name)| serde_json::json!({"name": name, "url": format!("{BASE}/type/{id}/")}))
        .collect();
    serde_json::json!({"count": count, "results": results}).to_string()
}

fn species_document(name: &str, speed: u32, types: &[u32]) -> String {
    let types: Vec<_> = types
        .iter()
        .map(|id| serde_json::json!({"type": {"url": format!("{BASE}/type/{id}/")}}))
        .collect();
    serde_json::json!({
        "base_experience": 64,
        "height": 7,
        "weight": 69,
        "forms": [{"name": name}],
        "stats": [{"stat": {"name": "speed"}, "base_stat": speed}],
        "types": types,
    })
    .to_string()
}

#[fixture]
fn store() -> PokedexStore {
    PokedexStore::open_in_memory().expect("open in-memory store")
}

#[fixture]
fn two_types_three_species() -> StubCatalogSource {
    StubCatalogSource::new(BASE)
        .with_species_collection(r#"{"count": 3, "results": []}"#)
        .with_type_listing(type_listing(2, &[(4, "poison"), (12, "grass")]))
        .with_species(1, species_document("bulbasaur", 45, &[4, 12]))
        .with_species(2, species_document("ivysaur", 60, &[12]))
        .with_species(3, species_document("venusaur", 80, &[12, 4]))
}

#[rstest]
fn ingests_types_then_species(two_types_three_species: StubCatalogSource, mut store: PokedexStore) {
    let report = ingest_catalog(&two_types_three_species, &mut store, Roster::new())
        .expect("ingest succeeds");

    assert_eq!(report.phase, IngestPhase::Complete);
    assert_eq!(report.types_loaded, 2);
    assert_eq!(report.species_expected, 3);
    assert_eq!(report.species_loaded, 3);
    assert!(report.skipped.is_empty());
    let names: Vec<_> = report.roster.iter().map(|species| species.name()).collect();
    assert_eq!(names, ["bulbasaur", "ivysaur", "venusaur"]);

    assert_eq!(store.type_count().expect("count types"), 2);
    assert_eq!(store.species_count().expect("count species"), 3);
    assert_eq!(store.bridge_count().expect("count bridges"), 5);
    assert!(store.is_complete().expect("inspect runs"));

    let requests = two_types_three_species.requests();
    assert_eq!(
        requests,
        vec![
            endpoints::species_collection_url(BASE),
            endpoints::type_collection_url(BASE),
            endpoints::species_url(BASE, 1),
            endpoints::species_url(BASE, 2),
            endpoints::species_url(BASE, 3),
        ]
    );
}

#[rstest]
fn skips_species_that_fail_to_fetch_or_parse(mut store: PokedexStore) {
    let source = StubCatalogSource::new(BASE)
        .with_species_collection(r#"{"count": 3, "results": []}"#)
        .with_type_listing(type_listing(1, &[(12, "grass")]))
        .with_species(1, species_document("bulbasaur", 45, &[12]))
        .with_species(3, r#"{"forms": [], "stats": [], "types": []}"#);

    let report = ingest_catalog(&source, &mut store, Roster::new()).expect("ingest succeeds");

    assert_eq!(report.phase, IngestPhase::Complete);
    assert_eq!(report.species_loaded, 1);
    let skipped: Vec<_> = report.skipped.iter().map(|entry| entry.id).collect();
    assert_eq!(skipped, [2, 3]);
    assert!(matches!(
        report.skipped.first().map(|entry| &entry.reason),
        Some(SkipReason::Transport(TransportError::Http { status: 404, .. }))
    ));
    assert!(matches!(
        report.skipped.get(1).map(|entry| &entry.reason),
        Some(SkipReason::Parse(ParseError::EmptyForms))
    ));
    assert_eq!(store.species_count().expect("count species"), 1);
    assert_eq!(store.last_species_id().expect("last id"), Some(1));
    assert!(store.is_complete().expect("inspect runs"));
}

#[rstest]
fn refetches_partial_type_listing_as_one_page(mut store: PokedexStore) {
    let source = StubCatalogSource::new(BASE)
        .with_species_collection(r#"{"count": 0, "results": []}"#)
        .with_type_listing(type_listing(3, &[(1, "normal")]))
        .with_body(
            endpoints::type_collection_page_url(BASE, 3),
            type_listing(3, &[(1, "normal"), (2, "fighting"), (3, "flying")]),
        );

    let report = ingest_catalog(&source, &mut store, Roster::new()).expect("ingest succeeds");

    assert_eq!(report.types_loaded, 3);
    assert_eq!(store.type_count().expect("count types"), 3);
    assert!(
        source
            .requests()
            .contains(&endpoints::type_collection_page_url(BASE, 3))
    );
}

#[rstest]
fn count_fetch_failure_is_fatal(mut store: PokedexStore) {
    let source = StubCatalogSource::new(BASE).with_failure(
        endpoints::species_collection_url(BASE),
        TransportError::Timeout {
            url: endpoints::species_collection_url(BASE),
        },
    );

    let err = ingest_catalog(&source, &mut store, Roster::new()).expect_err("count is required");

    assert_eq!(err.phase(), IngestPhase::SchemaCreated);
    assert!(matches!(
        err,
        IngestError::Transport {
            source: TransportError::Timeout { .. },
            ..
        }
    ));
    assert!(!store.is_complete().expect("inspect runs"));
}

#[rstest]
fn malformed_type_listing_is_fatal(mut store: PokedexStore) {
    let source = StubCatalogSource::new(BASE)
        .with_species_collection(r#"{"count": 1, "results": []}"#)
        .with_type_listing(r#"{"count": 1, "results": [{"name": "grass", "url": "grass"}]}"#);

    let err = ingest_catalog(&source, &mut store, Roster::new()).expect_err("types are required");

    assert!(matches!(
        err,
        IngestError::Parse {
            phase: IngestPhase::SchemaCreated,
            source: ParseError::MissingMarker { .. },
        }
    ));
    assert_eq!(store.species_count().expect("count species"), 0);
}

#[rstest]
fn unknown_type_reference_aborts_the_run(mut store: PokedexStore) {
    let source = StubCatalogSource::new(BASE)
        .with_species_collection(r#"{"count": 2, "results": []}"#)
        .with_type_listing(type_listing(1, &[(12, "grass")]))
        .with_species(1, species_document("bulbasaur", 45, &[12]))
        .with_species(2, species_document("mystery", 10, &[99]));

    let err = ingest_catalog(&source, &mut store, Roster::new()).expect_err("type 99 is unknown");

    assert!(matches!(
        err,
        IngestError::Store {
            phase: IngestPhase::SpeciesLoading(2),
            source: StoreError::Constraint { .. },
        }
    ));
    assert_eq!(store.species_count().expect("count species"), 1);
    assert_eq!(store.bridge_count().expect("count bridges"), 1);
    assert!(!store.is_complete().expect("inspect runs"));
}

#[rstest]
fn appends_to_caller_roster(two_types_three_species: StubCatalogSource, mut store: PokedexStore) {
    let mut roster = Roster::new();
    roster.push(SpeciesBuilder::new(0).with_name("missingno").build());

    let report =
        ingest_catalog(&two_types_three_species, &mut store, roster).expect("ingest succeeds");

    assert_eq!(report.roster.len(), 4);
    assert_eq!(report.species_loaded, 3);
    assert_eq!(
        report.roster.iter().next().map(|species| species.name()),
        Some("missingno")
    );
}
