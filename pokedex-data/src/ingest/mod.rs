//! Full catalog ingest from a [`CatalogSource`] into a [`PokedexStore`].
//!
//! A run walks a fixed sequence of [`IngestPhase`]s: create the schema, read
//! the species count, persist the complete type catalog, then fetch, decode
//! and persist species `1..=count` one at a time. Types always land before
//! any species so every bridge row has a target.
//!
//! Failures before the species loop abort the run. A species whose document
//! cannot be fetched or decoded is logged, recorded in
//! [`IngestReport::skipped`] and left out of the store; later species keep
//! their own identifiers. Store failures always abort.

use log::{debug, info, warn};
use pokedex_core::{CatalogSource, PokemonType, Species};

use crate::pokeapi::{endpoints, parse_count, parse_species, parse_type_catalog};
use crate::store::PokedexStore;

mod error;
mod report;
mod roster;

pub use error::IngestError;
pub use report::{IngestPhase, IngestReport, SkipReason, SkippedSpecies};
pub use roster::Roster;

#[cfg(test)]
mod tests;

/// Ingest the whole remote catalog into `store`.
///
/// Finalised species are appended to `roster`, which is handed back in the
/// returned report. The run is recorded in the store's bookkeeping and only
/// marked complete once every species identifier has been attempted.
///
/// # Examples
/// ```
/// use pokedex_data::pokeapi::test_support::StubCatalogSource;
/// use pokedex_data::{IngestPhase, PokedexStore, Roster, ingest_catalog};
///
/// let source = StubCatalogSource::new("https://example.test/api/v2")
///     .with_species_collection(r#"{"count": 1, "results": []}"#)
///     .with_type_listing(r#"{"count": 1, "results": [
///         {"name": "electric", "url": "https://example.test/api/v2/type/13/"}
///     ]}"#)
///     .with_species(1, r#"{
///         "forms": [{"name": "pikachu"}],
///         "stats": [{"stat": {"name": "speed"}, "base_stat": 90}],
///         "types": [{"type": {"url": "https://example.test/api/v2/type/13/"}}]
///     }"#);
/// let mut store = PokedexStore::open_in_memory()?;
///
/// let report = ingest_catalog(&source, &mut store, Roster::new())?;
///
/// assert_eq!(report.phase, IngestPhase::Complete);
/// assert_eq!(report.roster.get(1).map(|species| species.speed()), Some(90));
/// assert!(store.is_complete()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// [`IngestError`] tagged with the phase reached when schema creation, the
/// count or type catalog fetch, or any store write fails.
pub fn ingest_catalog<S>(
    source: &S,
    store: &mut PokedexStore,
    mut roster: Roster,
) -> Result<IngestReport, IngestError>
where
    S: CatalogSource + ?Sized,
{
    let mut phase = IngestPhase::NotStarted;
    store
        .initialise_schema()
        .map_err(IngestError::schema(phase))?;
    phase = IngestPhase::SchemaCreated;

    let base = source.base_url();
    info!("Reading catalog counts from {base}");
    let species_body = source
        .fetch(&endpoints::species_collection_url(base))
        .map_err(IngestError::transport(phase))?;
    let species_expected = parse_count(&species_body).map_err(IngestError::parse(phase))?;
    let run_id = store
        .begin_run(species_expected)
        .map_err(IngestError::store(phase))?;

    let types = fetch_type_catalog(source, phase)?;
    let types_loaded = store
        .persist_type_catalog(&types)
        .map_err(IngestError::store(phase))?;
    phase = IngestPhase::TypesLoaded;
    info!("Persisted {types_loaded} types; loading {species_expected} species");

    let mut species_loaded = 0_u32;
    let mut skipped = Vec::new();
    for id in 1..=species_expected {
        phase = IngestPhase::SpeciesLoading(id);
        match load_species(source, id) {
            Ok(species) => {
                store
                    .persist_species(&species)
                    .map_err(IngestError::store(phase))?;
                debug!("Loaded species {id} ({})", species.name());
                roster.push(species);
                species_loaded += 1;
            }
            Err(reason) => {
                warn!("Skipped species {id}: {reason}");
                skipped.push(SkippedSpecies { id, reason });
            }
        }
    }

    let species_skipped = species_expected.saturating_sub(species_loaded);
    store
        .complete_run(run_id, species_loaded, species_skipped)
        .map_err(IngestError::store(phase))?;
    phase = IngestPhase::Complete;
    info!(
        "Ingest complete: {types_loaded} types, {species_loaded} of {species_expected} species, {species_skipped} skipped"
    );

    Ok(IngestReport {
        types_loaded,
        species_expected,
        species_loaded,
        roster,
        skipped,
        phase,
    })
}

/// Fetch the type catalog, widening the page when the first one is partial.
fn fetch_type_catalog<S>(source: &S, phase: IngestPhase) -> Result<Vec<PokemonType>, IngestError>
where
    S: CatalogSource + ?Sized,
{
    let base = source.base_url();
    let body = source
        .fetch(&endpoints::type_collection_url(base))
        .map_err(IngestError::transport(phase))?;
    let count = parse_count(&body).map_err(IngestError::parse(phase))?;
    let types = parse_type_catalog(&body).map_err(IngestError::parse(phase))?;
    if u32::try_from(types.len()).is_ok_and(|listed| listed >= count) {
        return Ok(types);
    }

    debug!(
        "Type listing holds {} of {count} entries; refetching as one page",
        types.len()
    );
    let body = source
        .fetch(&endpoints::type_collection_page_url(base, count))
        .map_err(IngestError::transport(phase))?;
    parse_type_catalog(&body).map_err(IngestError::parse(phase))
}

fn load_species<S>(source: &S, id: u32) -> Result<Species, SkipReason>
where
    S: CatalogSource + ?Sized,
{
    let body = source
        .fetch(&endpoints::species_url(source.base_url(), id))
        .map_err(SkipReason::Transport)?;
    let builder = parse_species(&body, id).map_err(SkipReason::Parse)?;
    Ok(builder.build())
}
