//! Events: points in time at a segment boundary.

use std::fmt;

use crate::domain::{Operation, Repository, SegmentIndex, StationId, TrainIndex};

use super::ActivityId;

/// Index of an event within its [`Network`](super::Network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub usize);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// What an event stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The synthetic schedule origin; exactly one per network.
    Origin,
    /// A train enters a segment (departs from the segment's origin station).
    Entering,
    /// A train leaves a segment (arrives at the segment's destination station).
    Leaving,
}

impl EventKind {
    /// The timetable slot this kind of event is written back to.
    pub fn operation(self) -> Option<Operation> {
        match self {
            EventKind::Origin => None,
            EventKind::Entering => Some(Operation::Departure),
            EventKind::Leaving => Some(Operation::Arrival),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Origin => "Origin",
            EventKind::Entering => "Entering",
            EventKind::Leaving => "Leaving",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kinds of event a train can produce.
///
/// [`Network::add_event`](super::Network::add_event) takes this rather than
/// [`EventKind`], so a network can never gain a second origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Entering,
    Leaving,
}

impl From<Boundary> for EventKind {
    fn from(boundary: Boundary) -> Self {
        match boundary {
            Boundary::Entering => EventKind::Entering,
            Boundary::Leaving => EventKind::Leaving,
        }
    }
}

/// A node of the event-activity network.
///
/// Events own no activities: `incoming` and `outgoing` hold indices into the
/// network's activity list and exist for traversal only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    train: Option<TrainIndex>,
    segment: Option<SegmentIndex>,
    original_time: i64,
    compressed_time: i64,
    incoming: Vec<ActivityId>,
    outgoing: Vec<ActivityId>,
}

impl Event {
    pub(super) fn origin() -> Self {
        Self {
            kind: EventKind::Origin,
            train: None,
            segment: None,
            original_time: 0,
            compressed_time: 0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub(super) fn bound(
        kind: EventKind,
        train: TrainIndex,
        segment: SegmentIndex,
        original_time: i64,
    ) -> Self {
        Self {
            kind,
            train: Some(train),
            segment: Some(segment),
            original_time,
            compressed_time: 0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn train(&self) -> Option<TrainIndex> {
        self.train
    }

    pub fn segment(&self) -> Option<SegmentIndex> {
        self.segment
    }

    pub fn original_time(&self) -> i64 {
        self.original_time
    }

    pub fn compressed_time(&self) -> i64 {
        self.compressed_time
    }

    pub(super) fn set_compressed_time(&mut self, time: i64) {
        self.compressed_time = time;
    }

    pub fn incoming(&self) -> &[ActivityId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[ActivityId] {
        &self.outgoing
    }

    pub(super) fn push_incoming(&mut self, id: ActivityId) {
        self.incoming.push(id);
    }

    pub(super) fn push_outgoing(&mut self, id: ActivityId) {
        self.outgoing.push(id);
    }

    pub fn is_origin(&self) -> bool {
        self.kind == EventKind::Origin
    }

    /// The station whose timetable slot this event represents.
    ///
    /// Entering events belong to the segment's origin station, leaving events
    /// to its destination. `None` for the origin event or a foreign segment.
    pub fn station<'r>(&self, repo: &'r Repository) -> Option<&'r StationId> {
        let segment = repo.get_segment(self.segment?)?;
        match self.kind {
            EventKind::Origin => None,
            EventKind::Entering => Some(&segment.from),
            EventKind::Leaving => Some(&segment.to),
        }
    }
}
