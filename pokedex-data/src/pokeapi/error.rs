use thiserror::Error;

/// Errors raised while decoding PokeAPI documents.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body was not valid JSON or lacked a required field.
    #[error("malformed catalog document")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    /// A species document listed no forms, so it has no display name.
    #[error("species document lists no forms")]
    EmptyForms,
    /// The resource URL did not contain the expected path marker.
    #[error("URL {url} does not contain marker '{marker}'")]
    MissingMarker { url: String, marker: &'static str },
    /// The resource URL did not end with `/`.
    #[error("URL {url} does not end with '/'")]
    MissingTrailingSlash { url: String },
    /// The text between marker and trailing slash was not an identifier.
    #[error("URL {url} carries non-numeric identifier segment '{segment}'")]
    InvalidId { url: String, segment: String },
}

impl From<serde_json::Error> for ParseError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}
