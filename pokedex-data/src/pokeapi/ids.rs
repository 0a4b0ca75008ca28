//! Identifier extraction from PokeAPI resource links.

use super::ParseError;

/// Path marker preceding a type identifier in PokeAPI links.
pub const TYPE_MARKER: &str = "type/";

/// Extract the numeric identifier that follows `marker` in a resource URL.
///
/// The identifier is the text between the end of the first occurrence of
/// `marker` and the final character, which must be `/`. Any further path
/// segments after the identifier make it non-numeric and are rejected.
///
/// # Examples
/// ```
/// use pokedex_data::pokeapi::{TYPE_MARKER, extract_trailing_id};
///
/// let id = extract_trailing_id("https://pokeapi.co/api/v2/type/12/", TYPE_MARKER)?;
/// assert_eq!(id, 12);
/// # Ok::<(), pokedex_data::ParseError>(())
/// ```
///
/// # Errors
///
/// [`ParseError::MissingMarker`] when `marker` is absent,
/// [`ParseError::MissingTrailingSlash`] when the URL does not end with `/`,
/// and [`ParseError::InvalidId`] when the remaining segment is not an
/// unsigned integer.
pub fn extract_trailing_id(url: &str, marker: &'static str) -> Result<u32, ParseError> {
    let start = url
        .find(marker)
        .map(|position| position + marker.len())
        .ok_or_else(|| ParseError::MissingMarker {
            url: url.to_owned(),
            marker,
        })?;
    let trimmed = url
        .strip_suffix('/')
        .ok_or_else(|| ParseError::MissingTrailingSlash {
            url: url.to_owned(),
        })?;
    // `start` can pass the end when the marker itself supplies the slash.
    let segment = trimmed.get(start..).unwrap_or_default();
    segment.parse().map_err(|_| ParseError::InvalidId {
        url: url.to_owned(),
        segment: segment.to_owned(),
    })
}
