//! URL construction for the PokeAPI resources used during ingest.
//!
//! Every helper expects a base URL without a trailing slash (as returned by
//! [`pokedex_core::CatalogSource::base_url`]) and yields a URL ending in `/`
//! or a query string, matching the links PokeAPI embeds in its own responses.

/// Collection listing whose `count` gives the number of species.
#[must_use]
pub fn species_collection_url(base: &str) -> String {
    format!("{base}/pokemon/")
}

/// First page of the type catalog.
#[must_use]
pub fn type_collection_url(base: &str) -> String {
    format!("{base}/type/")
}

/// Type catalog page sized to hold `limit` entries.
#[must_use]
pub fn type_collection_page_url(base: &str, limit: u32) -> String {
    format!("{base}/type/?limit={limit}")
}

/// Detail document for one species.
///
/// # Examples
/// ```
/// use pokedex_data::pokeapi::endpoints::species_url;
///
/// assert_eq!(
///     species_url("https://pokeapi.co/api/v2", 25),
///     "https://pokeapi.co/api/v2/pokemon/25/"
/// );
/// ```
#[must_use]
pub fn species_url(base: &str, id: u32) -> String {
    format!("{base}/pokemon/{id}/")
}
