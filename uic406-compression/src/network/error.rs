//! Event-activity network error types.

use crate::domain::{SegmentId, SegmentIndex, StationId, TrainId, TrainIndex};

use super::{ActivityKind, EventId};

/// Data-integrity failures while building, solving or mapping a network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A train arrives at a segment's end before it departs from its start
    #[error(
        "negative running time for train {train} on segment {segment}: departs {departure}, arrives {arrival}"
    )]
    NegativeRunningTime {
        train: TrainId,
        segment: SegmentId,
        departure: i64,
        arrival: i64,
    },

    /// Any activity with a minimum duration below zero
    #[error("negative {kind} duration {duration} from {from} to {to}")]
    NegativeDuration {
        kind: ActivityKind,
        from: EventId,
        to: EventId,
        duration: i64,
    },

    /// The headway policy returned a negative separation
    #[error("negative headway {value} on segment {segment}")]
    InvalidHeadway { segment: SegmentId, value: i64 },

    /// The network is not acyclic
    #[error("cycle detected through event {event}")]
    Cycle { event: EventId },

    /// An activity endpoint outside the network
    #[error("unknown event {0}")]
    UnknownEvent(EventId),

    /// A non-origin event without a train or segment binding
    #[error("event {0} is not bound to a train and segment")]
    UnboundEvent(EventId),

    /// Event bound to a train index the repository does not hold
    #[error("unknown train index {0}")]
    UnknownTrain(TrainIndex),

    /// Event bound to a segment index the repository does not hold
    #[error("unknown segment index {0}")]
    UnknownSegment(SegmentIndex),

    /// Result mapping found no timetable entry for the event's station
    #[error("train {train} has no timetable entry for station {station}")]
    MissingTimetableEntry { train: TrainId, station: StationId },
}
