use std::fmt;

use pokedex_core::TransportError;

use super::Roster;
use crate::pokeapi::ParseError;

/// Stage reached by an ingest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestPhase {
    /// Nothing has touched the store yet.
    NotStarted,
    /// Tables exist; the remote counts are being read.
    SchemaCreated,
    /// The full type catalog is persisted.
    TypesLoaded,
    /// The species with this identifier is being fetched or written.
    SpeciesLoading(u32),
    /// Every species was attempted and the run is recorded as finished.
    Complete,
}

impl fmt::Display for IngestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not started"),
            Self::SchemaCreated => f.write_str("schema created"),
            Self::TypesLoaded => f.write_str("types loaded"),
            Self::SpeciesLoading(id) => write!(f, "loading species {id}"),
            Self::Complete => f.write_str("complete"),
        }
    }
}

/// Why a species was left out of the store.
#[derive(Debug)]
pub enum SkipReason {
    /// The detail document could not be fetched.
    Transport(TransportError),
    /// The detail document could not be decoded.
    Parse(ParseError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "fetch failed: {err}"),
            Self::Parse(err) => write!(f, "parse failed: {err}"),
        }
    }
}

/// A species that was skipped during an ingest run.
#[derive(Debug)]
pub struct SkippedSpecies {
    /// Identifier of the skipped species.
    pub id: u32,
    /// Failure that caused the skip.
    pub reason: SkipReason,
}

/// Outcome of a completed ingest run.
#[derive(Debug)]
pub struct IngestReport {
    /// Number of type rows written.
    pub types_loaded: usize,
    /// Species count reported by the remote collection.
    pub species_expected: u32,
    /// Species written to the store by this run.
    pub species_loaded: u32,
    /// The caller's roster with this run's species appended in load order.
    pub roster: Roster,
    /// Species that failed to fetch or decode, in identifier order.
    pub skipped: Vec<SkippedSpecies>,
    /// Final phase; [`IngestPhase::Complete`] for a returned report.
    pub phase: IngestPhase,
}
