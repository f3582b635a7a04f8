//! Event-activity network construction.
//!
//! Trains are processed in repository order. Each segment on a train's route
//! becomes an entering/leaving event pair joined by a running activity;
//! consecutive segments are joined by a dwelling activity at the shared
//! station; legs on either side of a skipped segment are chained with a
//! zero-length running activity; and the first leg hangs off the network
//! origin. Once every train is in place, events at each segment boundary are
//! chained in original-time order by headway activities.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::{Repository, SegmentIndex, SegmentTrack, Train, TrainId, TrainIndex};

use super::{ActivityKind, Boundary, EventId, EventKind, HeadwayPolicy, Network, NetworkError};

/// One segment of a train's route that produced events.
#[derive(Debug, Clone, Copy)]
struct Leg {
    /// Position of the segment in the route.
    position: usize,
    segment: SegmentIndex,
    entering: EventId,
    leaving: EventId,
}

/// Build the event-activity network for every train in the repository.
///
/// Segments whose departure or arrival time is missing from the train's
/// timetable are skipped with a warning. A running time below zero is a
/// data error and aborts construction.
pub fn build_network(
    repo: &Repository,
    headway: &dyn HeadwayPolicy,
) -> Result<Network, NetworkError> {
    let mut network = Network::new();
    let mut boundaries: HashMap<(SegmentIndex, EventKind), Vec<EventId>> = HashMap::new();
    let mut skipped = 0;

    for (train_index, train) in repo.indexed_trains() {
        let legs = add_running(&mut network, repo, train_index, train, &mut skipped)?;
        if legs.is_empty() && !train.route().is_empty() {
            warn!(train = %train.id(), "no segment of the route has complete times");
        }
        add_dwelling(&mut network, repo, train, &legs)?;
        add_chain_links(&mut network, &legs)?;

        for leg in &legs {
            boundaries
                .entry((leg.segment, EventKind::Entering))
                .or_default()
                .push(leg.entering);
            boundaries
                .entry((leg.segment, EventKind::Leaving))
                .or_default()
                .push(leg.leaving);
        }
    }

    for (segment_index, segment) in repo.indexed_segments() {
        for kind in [EventKind::Entering, EventKind::Leaving] {
            if let Some(events) = boundaries.get(&(segment_index, kind)) {
                add_headways(&mut network, repo, segment, events, headway)?;
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "segments skipped for incomplete timetables");
    }
    debug!(
        trains = repo.trains().len(),
        events = network.event_count(),
        activities = network.activity_count(),
        "event-activity network built"
    );

    Ok(network)
}

/// Create the entering/leaving events and running activity of every segment.
fn add_running(
    network: &mut Network,
    repo: &Repository,
    train_index: TrainIndex,
    train: &Train,
    skipped: &mut usize,
) -> Result<Vec<Leg>, NetworkError> {
    let mut legs = Vec::with_capacity(train.route().len());

    for (position, &segment_index) in train.route().iter().enumerate() {
        let segment = repo
            .get_segment(segment_index)
            .ok_or(NetworkError::UnknownSegment(segment_index))?;

        let departure = train.times_at(&segment.from).and_then(|t| t.departure);
        let arrival = train.times_at(&segment.to).and_then(|t| t.arrival);
        let (Some(departure), Some(arrival)) = (departure, arrival) else {
            warn!(
                train = %train.id(),
                segment = %segment.id,
                "incomplete timetable, segment skipped"
            );
            *skipped += 1;
            continue;
        };

        if arrival < departure {
            return Err(NetworkError::NegativeRunningTime {
                train: train.id().clone(),
                segment: segment.id.clone(),
                departure,
                arrival,
            });
        }

        let entering =
            network.add_event(Boundary::Entering, train_index, segment_index, departure);
        let leaving = network.add_event(Boundary::Leaving, train_index, segment_index, arrival);
        network.add_activity(ActivityKind::Running, entering, leaving, arrival - departure)?;

        legs.push(Leg {
            position,
            segment: segment_index,
            entering,
            leaving,
        });
    }

    Ok(legs)
}

/// Join consecutive legs at their shared station.
///
/// The minimum dwell is the train's stopping time at the station, or zero
/// where the train passes through without a scheduled stop.
fn add_dwelling(
    network: &mut Network,
    repo: &Repository,
    train: &Train,
    legs: &[Leg],
) -> Result<(), NetworkError> {
    for pair in legs.windows(2) {
        let (arriving, departing) = (pair[0], pair[1]);
        if departing.position != arriving.position + 1 {
            continue;
        }
        let station = &repo.segment(arriving.segment).to;
        let dwell = train.min_stopping_time(station).unwrap_or(0);
        network.add_activity(
            ActivityKind::Dwelling,
            arriving.leaving,
            departing.entering,
            dwell,
        )?;
    }
    Ok(())
}

/// Hang the train's first leg off the origin and bridge skipped segments.
///
/// A leg after a gap in the route is tied to the leaving event of the last
/// leg before the gap by a zero-length running activity, so the train can
/// never reach a later segment before an earlier one.
fn add_chain_links(network: &mut Network, legs: &[Leg]) -> Result<(), NetworkError> {
    let Some(first) = legs.first() else {
        return Ok(());
    };
    network.add_activity(ActivityKind::Origin, network.origin(), first.entering, 0)?;

    for pair in legs.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        if after.position != before.position + 1 {
            network.add_activity(ActivityKind::Running, before.leaving, after.entering, 0)?;
        }
    }
    Ok(())
}

/// Chain the events at one segment boundary in original-time order.
///
/// Ties are broken by train identifier, then by creation order.
fn add_headways(
    network: &mut Network,
    repo: &Repository,
    segment: &SegmentTrack,
    events: &[EventId],
    headway: &dyn HeadwayPolicy,
) -> Result<(), NetworkError> {
    let mut ordered = events.to_vec();
    let view: &Network = network;
    ordered.sort_by(|&a, &b| compare_events(view, repo, a, b));

    for pair in ordered.windows(2) {
        let (leading, following) = (pair[0], pair[1]);
        let value = headway.min_headway(
            segment,
            network.event(leading),
            network.event(following),
        );
        if value < 0 {
            return Err(NetworkError::InvalidHeadway {
                segment: segment.id.clone(),
                value,
            });
        }
        network.add_activity(ActivityKind::Headway, leading, following, value)?;
    }
    Ok(())
}

fn compare_events(network: &Network, repo: &Repository, a: EventId, b: EventId) -> Ordering {
    network
        .event(a)
        .original_time()
        .cmp(&network.event(b).original_time())
        .then_with(|| train_of(network, repo, a).cmp(&train_of(network, repo, b)))
        .then_with(|| a.cmp(&b))
}

fn train_of<'r>(network: &Network, repo: &'r Repository, id: EventId) -> Option<&'r TrainId> {
    network
        .event(id)
        .train()
        .and_then(|t| repo.train(t))
        .map(|t| t.id())
}
