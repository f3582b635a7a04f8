//! Longest-path computation from the network origin.
//!
//! Each event reachable from the origin ends with the length of the longest
//! path to it under `min_duration` weights: the earliest time at which all
//! of its preceding constraints can be met. Both strategies produce the same
//! times on an acyclic network.

use std::collections::VecDeque;

use serde::Deserialize;
use tracing::{debug, warn};

use super::{EventId, Network, NetworkError};

/// Order in which events are relaxed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SolveStrategy {
    /// Kahn's topological order; every event is expanded exactly once.
    #[default]
    Topological,
    /// Depth-first work list; an event is expanded again whenever its time
    /// increases.
    LabelCorrecting,
}

/// Counters from one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveStats {
    pub strategy: SolveStrategy,
    /// Events taken off the work list.
    pub expansions: usize,
    /// Activities examined.
    pub relaxations: usize,
    /// Relaxations that raised an event's time.
    pub improvements: usize,
    /// Events not reachable from the origin; their times are untouched.
    pub unreachable: usize,
    /// Largest compressed time among reachable events.
    pub makespan: i64,
}

/// Assign every reachable event its longest-path time from the origin.
///
/// Times only ever increase, so solving an already-solved network leaves it
/// unchanged. Fails with [`NetworkError::Cycle`] if a cycle is reachable.
pub fn solve(network: &mut Network, strategy: SolveStrategy) -> Result<SolveStats, NetworkError> {
    let origin = network.origin();
    network.set_compressed_time(origin, 0);

    let reachable = network.reachable_from_origin();
    let mut stats = match strategy {
        SolveStrategy::Topological => solve_topological(network, &reachable)?,
        SolveStrategy::LabelCorrecting => solve_label_correcting(network)?,
    };

    stats.unreachable = reachable.iter().filter(|r| !**r).count();
    stats.makespan = network
        .indexed_events()
        .filter(|(id, _)| reachable[id.0])
        .map(|(_, e)| e.compressed_time())
        .max()
        .unwrap_or(0);

    if stats.unreachable > 0 {
        warn!(
            unreachable = stats.unreachable,
            "events not reachable from the origin were left uncompressed"
        );
    }
    debug!(
        ?strategy,
        expansions = stats.expansions,
        relaxations = stats.relaxations,
        improvements = stats.improvements,
        makespan = stats.makespan,
        "longest paths computed"
    );

    Ok(stats)
}

fn empty_stats(strategy: SolveStrategy) -> SolveStats {
    SolveStats {
        strategy,
        expansions: 0,
        relaxations: 0,
        improvements: 0,
        unreachable: 0,
        makespan: 0,
    }
}

/// Relax the outgoing activities of one event, calling `on_target` with each
/// target and whether its time was raised.
fn relax_from(
    network: &mut Network,
    id: EventId,
    stats: &mut SolveStats,
    mut on_target: impl FnMut(EventId, bool),
) {
    let base = network.event(id).compressed_time();
    for i in 0..network.event(id).outgoing().len() {
        let activity = *network.activity(network.event(id).outgoing()[i]);
        let to = activity.to();
        let candidate = base + activity.min_duration();
        stats.relaxations += 1;

        let improved = candidate > network.event(to).compressed_time();
        if improved {
            network.set_compressed_time(to, candidate);
            stats.improvements += 1;
        }
        on_target(to, improved);
    }
}

fn solve_topological(network: &mut Network, reachable: &[bool]) -> Result<SolveStats, NetworkError> {
    let mut stats = empty_stats(SolveStrategy::Topological);

    // In-degrees restricted to the part of the graph the origin reaches
    let mut pending = vec![0usize; network.event_count()];
    for activity in network.activities() {
        if reachable[activity.from().0] {
            pending[activity.to().0] += 1;
        }
    }

    let origin = network.origin();
    if pending[origin.0] > 0 {
        return Err(NetworkError::Cycle { event: origin });
    }

    let mut queue = VecDeque::from([origin]);
    while let Some(id) = queue.pop_front() {
        stats.expansions += 1;
        relax_from(network, id, &mut stats, |to, _| {
            pending[to.0] -= 1;
            if pending[to.0] == 0 {
                queue.push_back(to);
            }
        });
    }

    let reachable_count = reachable.iter().filter(|r| **r).count();
    if stats.expansions < reachable_count {
        let stuck = pending
            .iter()
            .position(|&p| p > 0)
            .map(EventId)
            .unwrap_or(origin);
        return Err(NetworkError::Cycle { event: stuck });
    }

    Ok(stats)
}

fn solve_label_correcting(network: &mut Network) -> Result<SolveStats, NetworkError> {
    if let Some(event) = network.find_cycle() {
        return Err(NetworkError::Cycle { event });
    }

    let mut stats = empty_stats(SolveStrategy::LabelCorrecting);
    let mut seen = vec![false; network.event_count()];
    let origin = network.origin();
    let mut stack = vec![origin];
    seen[origin.0] = true;

    while let Some(id) = stack.pop() {
        stats.expansions += 1;
        relax_from(network, id, &mut stats, |to, improved| {
            if improved || !seen[to.0] {
                seen[to.0] = true;
                stack.push(to);
            }
        });
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SegmentIndex, TrainIndex};
    use crate::network::{ActivityKind, Boundary, EventKind, FixedHeadway, build_network};
    use crate::testing::RepoBuilder;

    const STRATEGIES: [SolveStrategy; 2] =
        [SolveStrategy::Topological, SolveStrategy::LabelCorrecting];

    fn times(network: &Network) -> Vec<i64> {
        network.events().iter().map(|e| e.compressed_time()).collect()
    }

    #[test]
    fn running_and_dwelling_chain() {
        // Running 10, dwell 3, running 7: 0 -> 10 -> 13 -> 20
        let repo = RepoBuilder::stations(&["A", "B", "C"])
            .segment("AB", "A", "B")
            .segment("BC", "B", "C")
            .train(
                "T1",
                &["AB", "BC"],
                &[
                    ("A", None, Some(100)),
                    ("B", Some(110), Some(120)),
                    ("C", Some(127), None),
                ],
                &[("B", 3)],
            )
            .build();

        for strategy in STRATEGIES {
            let mut net = build_network(&repo, &FixedHeadway(6)).unwrap();
            let stats = solve(&mut net, strategy).unwrap();
            assert_eq!(times(&net), vec![0, 0, 10, 13, 20]);
            assert_eq!(stats.makespan, 20);
            assert_eq!(stats.unreachable, 0);
        }
    }

    #[test]
    fn headway_pushes_second_train() {
        // A enters at 0, B at 2; headway of 6 forces B to 6
        let repo = RepoBuilder::stations(&["X", "Y"])
            .segment("XY", "X", "Y")
            .train("A", &["XY"], &[("X", None, Some(0)), ("Y", Some(10), None)], &[])
            .train("B", &["XY"], &[("X", None, Some(2)), ("Y", Some(12), None)], &[])
            .build();

        for strategy in STRATEGIES {
            let mut net = build_network(&repo, &FixedHeadway(6)).unwrap();
            solve(&mut net, strategy).unwrap();

            let find = |train: usize, kind: EventKind| {
                net.events()
                    .iter()
                    .find(|e| e.train() == Some(TrainIndex(train)) && e.kind() == kind)
                    .unwrap()
                    .compressed_time()
            };
            assert_eq!(find(0, EventKind::Entering), 0);
            assert_eq!(find(0, EventKind::Leaving), 10);
            assert!(find(1, EventKind::Entering) >= find(0, EventKind::Entering) + 6);
            assert_eq!(find(1, EventKind::Entering), 6);
            assert_eq!(find(1, EventKind::Leaving), 16);
            assert!(net.constraint_violations().is_empty());
        }
    }

    #[test]
    fn solving_twice_is_idempotent() {
        let repo = RepoBuilder::stations(&["X", "Y"])
            .segment("XY", "X", "Y")
            .train("A", &["XY"], &[("X", None, Some(0)), ("Y", Some(10), None)], &[])
            .train("B", &["XY"], &[("X", None, Some(2)), ("Y", Some(12), None)], &[])
            .build();
        let mut net = build_network(&repo, &FixedHeadway(6)).unwrap();
        solve(&mut net, SolveStrategy::Topological).unwrap();
        let first = times(&net);

        for strategy in STRATEGIES {
            let stats = solve(&mut net, strategy).unwrap();
            assert_eq!(times(&net), first);
            assert_eq!(stats.improvements, 0);
        }
    }

    #[test]
    fn cycle_reported() {
        let mut net = Network::new();
        let a = net.add_event(Boundary::Entering, TrainIndex(0), SegmentIndex(0), 0);
        let b = net.add_event(Boundary::Leaving, TrainIndex(0), SegmentIndex(0), 1);
        net.add_activity(ActivityKind::Origin, net.origin(), a, 0).unwrap();
        net.add_activity(ActivityKind::Running, a, b, 1).unwrap();
        net.add_activity(ActivityKind::Headway, b, a, 1).unwrap();

        for strategy in STRATEGIES {
            let mut net = net.clone();
            let err = solve(&mut net, strategy).unwrap_err();
            assert!(matches!(err, NetworkError::Cycle { .. }));
        }
    }

    #[test]
    fn unreachable_events_untouched() {
        let mut net = Network::new();
        let a = net.add_event(Boundary::Entering, TrainIndex(0), SegmentIndex(0), 0);
        let b = net.add_event(Boundary::Leaving, TrainIndex(0), SegmentIndex(0), 5);
        net.add_activity(ActivityKind::Running, a, b, 5).unwrap();

        let stats = solve(&mut net, SolveStrategy::Topological).unwrap();
        assert_eq!(stats.unreachable, 2);
        assert_eq!(net.event(b).compressed_time(), 0);
        assert_eq!(stats.makespan, 0);
    }

    #[test]
    fn label_correcting_reexpands_improved_events() {
        // Two paths into `c`: a short one found first, a long one later
        let mut net = Network::new();
        let a = net.add_event(Boundary::Entering, TrainIndex(0), SegmentIndex(0), 0);
        let b = net.add_event(Boundary::Leaving, TrainIndex(0), SegmentIndex(0), 0);
        let c = net.add_event(Boundary::Entering, TrainIndex(1), SegmentIndex(0), 0);
        let d = net.add_event(Boundary::Leaving, TrainIndex(1), SegmentIndex(0), 0);
        let o = net.origin();
        net.add_activity(ActivityKind::Origin, o, a, 0).unwrap();
        net.add_activity(ActivityKind::Origin, o, c, 0).unwrap();
        net.add_activity(ActivityKind::Running, a, b, 9).unwrap();
        net.add_activity(ActivityKind::Headway, b, c, 1).unwrap();
        net.add_activity(ActivityKind::Running, c, d, 2).unwrap();

        for strategy in STRATEGIES {
            let mut net = net.clone();
            solve(&mut net, strategy).unwrap();
            assert_eq!(net.event(c).compressed_time(), 10);
            assert_eq!(net.event(d).compressed_time(), 12);
            assert!(net.slack_events().is_empty());
        }
    }
}
