//! Domain error types.
//!
//! These errors represent validation failures while assembling the
//! infrastructure and service repository. They are distinct from file I/O
//! errors, which belong to the loader.

use super::{SegmentId, StationId, TrainId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// An identifier field was empty
    #[error("{0} identifier cannot be empty")]
    EmptyId(&'static str),

    /// The same identifier was registered twice
    #[error("duplicate {kind} identifier: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// A reference to a station that was never registered
    #[error("unknown station: {0}")]
    UnknownStation(StationId),

    /// A reference to a segment that was never registered
    #[error("unknown segment: {0}")]
    UnknownSegment(SegmentId),

    /// A reference to a train that was never registered
    #[error("unknown train: {0}")]
    UnknownTrain(TrainId),

    /// Consecutive route segments do not share a station
    #[error("route of train {train} is discontinuous: {previous} ends where {next} does not start")]
    DiscontinuousRoute {
        train: TrainId,
        previous: SegmentId,
        next: SegmentId,
    },

    /// A minimum stopping time below zero
    #[error("negative minimum stopping time {value} for train {train} at {station}")]
    NegativeStoppingTime {
        train: TrainId,
        station: StationId,
        value: i64,
    },
}
