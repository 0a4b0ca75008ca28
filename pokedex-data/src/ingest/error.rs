use pokedex_core::TransportError;
use thiserror::Error;

use super::IngestPhase;
use crate::pokeapi::ParseError;
use crate::store::{SchemaError, StoreError};

/// Fatal failures that abort an ingest run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("transport failure while {phase}")]
    Transport {
        phase: IngestPhase,
        #[source]
        source: TransportError,
    },
    #[error("malformed catalog document while {phase}")]
    Parse {
        phase: IngestPhase,
        #[source]
        source: ParseError,
    },
    #[error("store failure while {phase}")]
    Store {
        phase: IngestPhase,
        #[source]
        source: StoreError,
    },
}

impl IngestError {
    /// Phase the run had reached when it failed.
    #[must_use]
    pub const fn phase(&self) -> IngestPhase {
        match self {
            Self::Transport { phase, .. } | Self::Parse { phase, .. } | Self::Store { phase, .. } => {
                *phase
            }
        }
    }

    pub(super) fn transport(phase: IngestPhase) -> impl FnOnce(TransportError) -> Self {
        move |source| Self::Transport { phase, source }
    }

    pub(super) fn parse(phase: IngestPhase) -> impl FnOnce(ParseError) -> Self {
        move |source| Self::Parse { phase, source }
    }

    pub(super) fn store(phase: IngestPhase) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { phase, source }
    }

    pub(super) fn schema(phase: IngestPhase) -> impl FnOnce(SchemaError) -> Self {
        move |source| Self::Store {
            phase,
            source: StoreError::Schema(source),
        }
    }
}
