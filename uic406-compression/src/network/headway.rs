//! Minimum headway policies.
//!
//! The separation required between two successive movements at the same
//! segment boundary is supplied from outside the network builder. A policy
//! sees the segment and both events, so it can vary by segment, direction
//! kind, or anything derivable from the events.

use std::collections::HashMap;

use crate::domain::{SegmentId, SegmentTrack};

use super::Event;

/// Supplies the minimum separation between two consecutive events of the
/// same kind on one segment.
///
/// Any `Fn(&SegmentTrack, &Event, &Event) -> i64` closure is a policy.
///
/// # Examples
///
/// ```
/// use uic406_compression::network::{EventKind, HeadwayPolicy};
/// use uic406_compression::domain::SegmentTrack;
/// use uic406_compression::network::Event;
///
/// // Longer separation for departures than for arrivals
/// let policy = |_: &SegmentTrack, leading: &Event, _: &Event| -> i64 {
///     if leading.kind() == EventKind::Entering { 4 } else { 3 }
/// };
/// fn takes_policy(_: &dyn HeadwayPolicy) {}
/// takes_policy(&policy);
/// ```
pub trait HeadwayPolicy {
    /// Minimum time from `leading` to `following`; must not be negative.
    fn min_headway(&self, segment: &SegmentTrack, leading: &Event, following: &Event) -> i64;
}

impl<F> HeadwayPolicy for F
where
    F: Fn(&SegmentTrack, &Event, &Event) -> i64,
{
    fn min_headway(&self, segment: &SegmentTrack, leading: &Event, following: &Event) -> i64 {
        self(segment, leading, following)
    }
}

/// The same headway everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHeadway(pub i64);

impl HeadwayPolicy for FixedHeadway {
    fn min_headway(&self, _: &SegmentTrack, _: &Event, _: &Event) -> i64 {
        self.0
    }
}

/// A default headway with per-segment overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentHeadways {
    default: i64,
    overrides: HashMap<SegmentId, i64>,
}

impl SegmentHeadways {
    /// Create a policy using `default` on every segment.
    pub fn new(default: i64) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Override the headway of one segment.
    pub fn set(&mut self, segment: SegmentId, value: i64) {
        self.overrides.insert(segment, value);
    }

    /// Add overrides, replacing earlier values for the same segment.
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (SegmentId, i64)>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Headway used on a segment.
    pub fn get(&self, segment: &SegmentId) -> i64 {
        self.overrides.get(segment).copied().unwrap_or(self.default)
    }

    pub fn default_headway(&self) -> i64 {
        self.default
    }

    /// Number of segments with an override.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl HeadwayPolicy for SegmentHeadways {
    fn min_headway(&self, segment: &SegmentTrack, _: &Event, _: &Event) -> i64 {
        self.get(&segment.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SegmentIndex, StationId, TrainIndex};
    use crate::network::{Boundary, Network};

    fn segment(id: &str) -> SegmentTrack {
        SegmentTrack::new(
            SegmentId::new(id).unwrap(),
            StationId::new("A").unwrap(),
            StationId::new("B").unwrap(),
        )
    }

    fn two_events() -> Network {
        let mut net = Network::new();
        net.add_event(Boundary::Entering, TrainIndex(0), SegmentIndex(0), 0);
        net.add_event(Boundary::Entering, TrainIndex(1), SegmentIndex(0), 2);
        net
    }

    #[test]
    fn fixed() {
        let net = two_events();
        let (a, b) = (&net.events()[1], &net.events()[2]);
        assert_eq!(FixedHeadway(6).min_headway(&segment("S1"), a, b), 6);
    }

    #[test]
    fn per_segment_overrides() {
        let net = two_events();
        let (a, b) = (&net.events()[1], &net.events()[2]);
        let policy = SegmentHeadways::new(6)
            .with_overrides([(SegmentId::new("S2").unwrap(), 4)]);

        assert_eq!(policy.len(), 1);
        assert_eq!(policy.default_headway(), 6);
        assert_eq!(policy.min_headway(&segment("S1"), a, b), 6);
        assert_eq!(policy.min_headway(&segment("S2"), a, b), 4);
    }

    #[test]
    fn set_replaces_override() {
        let mut policy = SegmentHeadways::new(6);
        assert!(policy.is_empty());
        policy.set(SegmentId::new("S1").unwrap(), 3);
        policy.set(SegmentId::new("S1").unwrap(), 5);
        assert_eq!(policy.get(&SegmentId::new("S1").unwrap()), 5);
    }

    #[test]
    fn closure_policy() {
        let net = two_events();
        let (a, b) = (&net.events()[1], &net.events()[2]);
        let policy = |_: &SegmentTrack, lead: &Event, follow: &Event| {
            follow.original_time() - lead.original_time() + 1
        };
        assert_eq!(policy.min_headway(&segment("S1"), a, b), 3);
    }
}
