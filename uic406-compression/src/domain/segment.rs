//! Track segment types.

use std::fmt;

use super::StationId;

/// A non-empty track segment identifier.
///
/// # Examples
///
/// ```
/// use uic406_compression::domain::SegmentId;
///
/// let id = SegmentId::new("S01").unwrap();
/// assert_eq!(id.as_str(), "S01");
/// assert!(SegmentId::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(String);

impl SegmentId {
    /// Create a segment identifier, rejecting empty input.
    pub fn new(s: impl AsRef<str>) -> Result<Self, super::DomainError> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(super::DomainError::EmptyId("segment"));
        }
        Ok(SegmentId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentId({})", self.0)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a segment within the [`Repository`](super::Repository).
///
/// Network events refer to segments by index so the graph never borrows
/// the repository it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentIndex(pub usize);

impl fmt::Display for SegmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed track segment between two adjacent stations.
///
/// A train *enters* a segment when it departs from `from` and *leaves* it
/// when it arrives at `to`. The opposite running direction is a separate
/// segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTrack {
    pub id: SegmentId,
    pub from: StationId,
    pub to: StationId,
}

impl SegmentTrack {
    pub fn new(id: SegmentId, from: StationId, to: StationId) -> Self {
        Self { id, from, to }
    }
}
