//! Decoders for the three PokeAPI document shapes used during ingest.

use log::debug;
use pokedex_core::{PokemonType, SpeciesBuilder, Stat};
use serde::Deserialize;

use super::{ParseError, TYPE_MARKER, extract_trailing_id};

#[derive(Debug, Deserialize)]
struct CountDocument {
    count: u32,
}

#[derive(Debug, Deserialize)]
struct NamedResourceList {
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct SpeciesDocument {
    base_experience: Option<u32>,
    height: Option<u32>,
    weight: Option<u32>,
    forms: Vec<FormEntry>,
    stats: Vec<StatEntry>,
    types: Vec<TypeSlot>,
}

#[derive(Debug, Deserialize)]
struct FormEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct StatEntry {
    base_stat: u32,
    stat: StatName,
}

#[derive(Debug, Deserialize)]
struct StatName {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: TypeLink,
}

#[derive(Debug, Deserialize)]
struct TypeLink {
    url: String,
}

/// Read the top-level `count` of a collection listing.
///
/// # Examples
/// ```
/// use pokedex_data::pokeapi::parse_count;
///
/// assert_eq!(parse_count(r#"{"count": 811, "results": []}"#)?, 811);
/// # Ok::<(), pokedex_data::ParseError>(())
/// ```
///
/// # Errors
///
/// [`ParseError::Json`] when the body is malformed or `count` is missing.
pub fn parse_count(body: &str) -> Result<u32, ParseError> {
    let document: CountDocument = serde_json::from_str(body)?;
    Ok(document.count)
}

/// Decode the type catalog listing into ordered `(id, name)` entries.
///
/// Identifiers come from each entry's `url` via [`extract_trailing_id`].
///
/// # Errors
///
/// [`ParseError::Json`] for a malformed body, or any identifier extraction
/// error for an entry whose link is not shaped like `.../type/<id>/`.
pub fn parse_type_catalog(body: &str) -> Result<Vec<PokemonType>, ParseError> {
    let listing: NamedResourceList = serde_json::from_str(body)?;
    listing
        .results
        .into_iter()
        .map(|entry| {
            let id = extract_trailing_id(&entry.url, TYPE_MARKER)?;
            Ok(PokemonType::new(id, entry.name))
        })
        .collect()
}

/// Decode a species detail document into a builder for species `id`.
///
/// Height and weight arrive in decimetres and hectograms and are converted to
/// metres and kilograms. A missing or `null` `base_experience`, `height` or
/// `weight` leaves the attribute at zero. Stats outside the closed [`Stat`]
/// set are skipped. Type identifiers keep the order the document lists them.
///
/// # Errors
///
/// [`ParseError::Json`] when the body is malformed or lacks `forms`, `stats`
/// or `types`; [`ParseError::EmptyForms`] when `forms` is empty; identifier
/// extraction errors for malformed type links.
pub fn parse_species(body: &str, id: u32) -> Result<SpeciesBuilder, ParseError> {
    let document: SpeciesDocument = serde_json::from_str(body)?;
    let name = document
        .forms
        .into_iter()
        .next()
        .map(|form| form.name)
        .ok_or(ParseError::EmptyForms)?;

    let mut builder = SpeciesBuilder::new(id)
        .with_name(name)
        .with_base_experience(document.base_experience.unwrap_or_default())
        .with_height(tenths(document.height))
        .with_weight(tenths(document.weight));

    for entry in document.stats {
        match Stat::from_api_name(&entry.stat.name) {
            Some(stat) => builder = builder.with_stat(stat, entry.base_stat),
            None => debug!("species {id}: ignoring unknown stat '{}'", entry.stat.name),
        }
    }

    let types = document
        .types
        .iter()
        .map(|slot| extract_trailing_id(&slot.kind.url, TYPE_MARKER))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(builder.with_types(types))
}

fn tenths(value: Option<u32>) -> f64 {
    f64::from(value.unwrap_or_default()) / 10.0
}
