//! Activities: minimum-duration constraints between two events.

use std::fmt;

use super::EventId;

/// Index of an activity within its [`Network`](super::Network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityId(pub usize);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// Kind of timing dependency an activity models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    /// Running through a segment, entering to leaving.
    Running,
    /// Standing at a station between arrival and the next departure.
    Dwelling,
    /// Separation between two successive trains at one segment boundary.
    Headway,
    /// Link from the network origin to a train's first event.
    Origin,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Running => "Running",
            ActivityKind::Dwelling => "Dwelling",
            ActivityKind::Headway => "Headway",
            ActivityKind::Origin => "Origin",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge `from -> to` requiring
/// `to.compressed_time >= from.compressed_time + min_duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    kind: ActivityKind,
    from: EventId,
    to: EventId,
    min_duration: i64,
}

impl Activity {
    pub(super) fn new(kind: ActivityKind, from: EventId, to: EventId, min_duration: i64) -> Self {
        Self {
            kind,
            from,
            to,
            min_duration,
        }
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn from(&self) -> EventId {
        self.from
    }

    pub fn to(&self) -> EventId {
        self.to
    }

    pub fn min_duration(&self) -> i64 {
        self.min_duration
    }
}
