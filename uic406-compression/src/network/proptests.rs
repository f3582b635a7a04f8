//! Property tests over randomly generated line networks.
//!
//! Stations `S0..Sn` lie on a line with one directed segment between each
//! neighbouring pair. Every generated train runs a contiguous stretch of the
//! line with strictly positive running times, which keeps the network
//! acyclic. Now and then a train has no departure at an intermediate station,
//! leaving the next segment without events.

use proptest::prelude::*;

use super::*;
use crate::domain::{
    Operation, Repository, SegmentId, SegmentTrack, Station, StationId, StopTimes, TrainId,
};

const STATIONS: usize = 5;

#[derive(Debug, Clone)]
struct LegSpec {
    running: i64,
    dwell: i64,
    stops: bool,
    /// No departure at the station this leg ends at
    drops_departure: bool,
}

#[derive(Debug, Clone)]
struct TrainSpec {
    start: usize,
    departure: i64,
    legs: Vec<LegSpec>,
}

fn leg_spec() -> impl Strategy<Value = LegSpec> {
    (1i64..20, 0i64..10, any::<bool>(), prop::bool::weighted(0.2)).prop_map(
        |(running, dwell, stops, drops_departure)| LegSpec {
            running,
            dwell,
            stops,
            drops_departure,
        },
    )
}

fn train_spec() -> impl Strategy<Value = TrainSpec> {
    (
        0..STATIONS - 1,
        0i64..120,
        prop::collection::vec(leg_spec(), 1..STATIONS),
    )
        .prop_map(|(start, departure, legs)| TrainSpec {
            start,
            departure,
            legs,
        })
}

fn station_id(i: usize) -> StationId {
    StationId::new(format!("S{i}")).unwrap()
}

fn segment_id(i: usize) -> SegmentId {
    SegmentId::new(format!("S{i}-S{}", i + 1)).unwrap()
}

fn build_repo(specs: &[TrainSpec]) -> Repository {
    let mut repo = Repository::new();
    for i in 0..STATIONS {
        repo.add_station(Station::new(station_id(i), format!("Station {i}")))
            .unwrap();
    }
    for i in 0..STATIONS - 1 {
        repo.add_segment(SegmentTrack::new(segment_id(i), station_id(i), station_id(i + 1)))
            .unwrap();
    }

    for (n, spec) in specs.iter().enumerate() {
        let legs = spec.legs.len().min(STATIONS - 1 - spec.start);
        let route: Vec<SegmentId> = (spec.start..spec.start + legs).map(segment_id).collect();
        let index = repo
            .add_train(TrainId::new(format!("T{n:02}")).unwrap(), &route)
            .unwrap();
        let train = repo.train_mut(index).unwrap();

        let mut clock = spec.departure;
        train.set_times(station_id(spec.start), StopTimes::new(None, Some(clock)));
        for (k, leg) in spec.legs.iter().take(legs).enumerate() {
            let station = station_id(spec.start + k + 1);
            let arrival = clock + leg.running;
            clock = arrival + leg.dwell;
            let is_last = k + 1 == legs;
            let departure = (!is_last && !leg.drops_departure).then_some(clock);
            train.set_times(station.clone(), StopTimes::new(Some(arrival), departure));
            if leg.stops && !is_last {
                train.set_min_stopping_time(station, leg.dwell / 2).unwrap();
            }
        }
    }
    repo
}

/// Present times of one train in route order, arrival before departure.
fn times_in_route_order(repo: &Repository, train: &crate::domain::Train) -> Vec<i64> {
    repo.route_stations(train)
        .into_iter()
        .filter_map(|station| train.times_at(station))
        .flat_map(|times| {
            [Operation::Arrival, Operation::Departure]
                .into_iter()
                .filter_map(|op| times.get(op))
        })
        .collect()
}

fn solved(specs: &[TrainSpec], headway: i64, strategy: SolveStrategy) -> Network {
    let repo = build_repo(specs);
    let mut network = build_network(&repo, &FixedHeadway(headway)).unwrap();
    solve(&mut network, strategy).unwrap();
    network
}

proptest! {
    /// No cycle in any built network
    #[test]
    fn built_networks_are_acyclic(specs in prop::collection::vec(train_spec(), 1..6)) {
        let repo = build_repo(&specs);
        let network = build_network(&repo, &FixedHeadway(6)).unwrap();
        prop_assert_eq!(network.find_cycle(), None);
    }

    /// Every event hangs off the origin
    #[test]
    fn every_event_reachable(specs in prop::collection::vec(train_spec(), 1..6)) {
        let repo = build_repo(&specs);
        let network = build_network(&repo, &FixedHeadway(6)).unwrap();
        prop_assert!(network.reachable_from_origin().iter().all(|r| *r));
        for (id, event) in network.indexed_events() {
            if !event.is_origin() {
                prop_assert!(!event.incoming().is_empty(), "{} has no predecessor", id);
            }
        }
    }

    /// Every activity holds after solving
    #[test]
    fn constraints_satisfied(
        specs in prop::collection::vec(train_spec(), 1..6),
        headway in 0i64..15,
    ) {
        let network = solved(&specs, headway, SolveStrategy::Topological);
        prop_assert!(network.constraint_violations().is_empty());
    }

    /// Each event's time is pinned by some incoming activity
    #[test]
    fn times_are_tight(
        specs in prop::collection::vec(train_spec(), 1..6),
        headway in 0i64..15,
    ) {
        let network = solved(&specs, headway, SolveStrategy::Topological);
        prop_assert!(network.slack_events().is_empty());
    }

    /// Written times run forward along each route, gaps included
    #[test]
    fn written_times_are_monotone(
        specs in prop::collection::vec(train_spec(), 1..6),
        headway in 0i64..15,
    ) {
        let mut repo = build_repo(&specs);
        let mut network = build_network(&repo, &FixedHeadway(headway)).unwrap();
        solve(&mut network, SolveStrategy::Topological).unwrap();
        apply_compressed_times(&network, &mut repo).unwrap();

        for train in repo.trains() {
            let times = times_in_route_order(&repo, train);
            prop_assert!(
                times.windows(2).all(|w| w[0] <= w[1]),
                "{} goes backwards: {:?}", train.id(), times
            );
            for (_, stop) in train.timetable() {
                if let (Some(arrival), Some(departure)) = (stop.arrival, stop.departure) {
                    prop_assert!(arrival <= departure);
                }
            }
        }
    }

    /// A second solve changes nothing
    #[test]
    fn solve_is_idempotent(specs in prop::collection::vec(train_spec(), 1..6)) {
        let mut network = solved(&specs, 6, SolveStrategy::Topological);
        let before: Vec<i64> = network.events().iter().map(|e| e.compressed_time()).collect();
        let stats = solve(&mut network, SolveStrategy::LabelCorrecting).unwrap();
        let after: Vec<i64> = network.events().iter().map(|e| e.compressed_time()).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(stats.improvements, 0);
    }

    /// Both strategies agree
    #[test]
    fn strategies_agree(
        specs in prop::collection::vec(train_spec(), 1..6),
        headway in 0i64..15,
    ) {
        let a = solved(&specs, headway, SolveStrategy::Topological);
        let b = solved(&specs, headway, SolveStrategy::LabelCorrecting);
        let ta: Vec<i64> = a.events().iter().map(|e| e.compressed_time()).collect();
        let tb: Vec<i64> = b.events().iter().map(|e| e.compressed_time()).collect();
        prop_assert_eq!(ta, tb);
    }

    /// Headway activities never point backwards in original time
    #[test]
    fn headways_keep_original_order(specs in prop::collection::vec(train_spec(), 1..6)) {
        let repo = build_repo(&specs);
        let network = build_network(&repo, &FixedHeadway(6)).unwrap();
        for activity in network.activities() {
            if activity.kind() != ActivityKind::Headway {
                continue;
            }
            let from = network.event(activity.from());
            let to = network.event(activity.to());
            prop_assert_eq!(from.kind(), to.kind());
            prop_assert_eq!(from.segment(), to.segment());
            prop_assert!(from.original_time() <= to.original_time());
        }
    }
}
