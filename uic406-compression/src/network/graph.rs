//! Index-based event-activity network.

use crate::domain::{Repository, SegmentIndex, TrainIndex};

use super::{Activity, ActivityId, ActivityKind, Boundary, Event, EventId, NetworkError};

/// The event-activity network: every event and activity of one compression
/// run, rooted at a single origin event.
///
/// The network owns all activities; events refer to them by [`ActivityId`]
/// and activities refer to their endpoints by [`EventId`], so there are no
/// reference cycles. Each network carries its own origin, so independent
/// networks can be built and solved side by side.
#[derive(Debug, Clone)]
pub struct Network {
    events: Vec<Event>,
    activities: Vec<Activity>,
    origin: EventId,
}

impl Network {
    /// Create a network containing only the origin event.
    pub fn new() -> Self {
        Self {
            events: vec![Event::origin()],
            activities: Vec::new(),
            origin: EventId(0),
        }
    }

    /// The synthetic origin every train hangs off.
    pub fn origin(&self) -> EventId {
        self.origin
    }

    /// Add an event bound to a train and segment.
    pub fn add_event(
        &mut self,
        kind: Boundary,
        train: TrainIndex,
        segment: SegmentIndex,
        original_time: i64,
    ) -> EventId {
        let id = EventId(self.events.len());
        self.events
            .push(Event::bound(kind.into(), train, segment, original_time));
        id
    }

    /// Add an activity and register it with both endpoints.
    pub fn add_activity(
        &mut self,
        kind: ActivityKind,
        from: EventId,
        to: EventId,
        min_duration: i64,
    ) -> Result<ActivityId, NetworkError> {
        for endpoint in [from, to] {
            if endpoint.0 >= self.events.len() {
                return Err(NetworkError::UnknownEvent(endpoint));
            }
        }
        if min_duration < 0 {
            return Err(NetworkError::NegativeDuration {
                kind,
                from,
                to,
                duration: min_duration,
            });
        }

        let id = ActivityId(self.activities.len());
        self.activities
            .push(Activity::new(kind, from, to, min_duration));
        self.events[from.0].push_outgoing(id);
        self.events[to.0].push_incoming(id);
        Ok(id)
    }

    /// Event by id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not handed out by this network.
    pub fn event(&self, id: EventId) -> &Event {
        &self.events[id.0]
    }

    pub fn get_event(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.0)
    }

    /// Activity by id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not handed out by this network.
    pub fn activity(&self, id: ActivityId) -> &Activity {
        &self.activities[id.0]
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Iterate events with their ids, origin first.
    pub fn indexed_events(&self) -> impl Iterator<Item = (EventId, &Event)> {
        self.events
            .iter()
            .enumerate()
            .map(|(i, e)| (EventId(i), e))
    }

    /// Iterate activities with their ids, in creation order.
    pub fn indexed_activities(&self) -> impl Iterator<Item = (ActivityId, &Activity)> {
        self.activities
            .iter()
            .enumerate()
            .map(|(i, a)| (ActivityId(i), a))
    }

    pub fn outgoing(&self, id: EventId) -> impl Iterator<Item = &Activity> {
        self.events[id.0]
            .outgoing()
            .iter()
            .map(|a| &self.activities[a.0])
    }

    pub fn incoming(&self, id: EventId) -> impl Iterator<Item = &Activity> {
        self.events[id.0]
            .incoming()
            .iter()
            .map(|a| &self.activities[a.0])
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    pub(crate) fn set_compressed_time(&mut self, id: EventId, time: i64) {
        self.events[id.0].set_compressed_time(time);
    }

    /// Number of activities of each kind, in `ActivityKind` declaration order.
    pub fn activity_counts(&self) -> [(ActivityKind, usize); 4] {
        let mut counts = [
            (ActivityKind::Running, 0),
            (ActivityKind::Dwelling, 0),
            (ActivityKind::Headway, 0),
            (ActivityKind::Origin, 0),
        ];
        for activity in &self.activities {
            if let Some(slot) = counts.iter_mut().find(|(k, _)| *k == activity.kind()) {
                slot.1 += 1;
            }
        }
        counts
    }

    /// Human-readable `train|segment|kind` label, `null` for missing bindings.
    pub fn label(&self, id: EventId, repo: &Repository) -> String {
        let Some(event) = self.get_event(id) else {
            return format!("unknown|unknown|{id}");
        };
        let train = event
            .train()
            .and_then(|t| repo.train(t))
            .map(|t| t.id().to_string())
            .unwrap_or_else(|| "null".to_string());
        let segment = event
            .segment()
            .and_then(|s| repo.get_segment(s))
            .map(|s| s.id.to_string())
            .unwrap_or_else(|| "null".to_string());
        format!("{train}|{segment}|{}", event.kind())
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
