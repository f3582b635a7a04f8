//! Compression by longest paths on the event-activity network.

use tracing::debug;

use crate::domain::Repository;
use crate::network::{
    HeadwayPolicy, Network, SolveStrategy, apply_compressed_times, build_network, solve,
};

use super::report::span;
use super::{
    CompressionError, CompressionMethod, CompressionReport, CompressionTrace, TimetableCompressor,
};

/// Builds the network, solves it, and writes the times back.
#[derive(Debug, Clone)]
pub struct EanCompressor<H> {
    headway: H,
    strategy: SolveStrategy,
}

impl<H: HeadwayPolicy> EanCompressor<H> {
    pub fn new(headway: H, strategy: SolveStrategy) -> Self {
        Self { headway, strategy }
    }
}

impl<H: HeadwayPolicy> TimetableCompressor for EanCompressor<H> {
    fn method(&self) -> CompressionMethod {
        CompressionMethod::EventActivityNetwork
    }

    fn compress(
        &self,
        repo: &mut Repository,
        trace: &mut dyn CompressionTrace,
    ) -> Result<CompressionReport, CompressionError> {
        let mut network = build_network(repo, &self.headway)?;
        for (kind, count) in network.activity_counts() {
            debug!(%kind, count, "activities");
        }
        trace.network_built(&network, repo)?;

        let stats = solve(&mut network, self.strategy)?;
        debug_assert!(network.constraint_violations().is_empty());

        apply_compressed_times(&network, repo)?;
        trace.network_solved(&network, repo)?;

        let report = CompressionReport {
            method: self.method(),
            trains: repo.trains().len(),
            events: network.event_count(),
            activities: network.activity_count(),
            solve: stats,
            original_span: span(train_events(&network).map(|e| e.original_time())),
            compressed_span: span(train_events(&network).map(|e| e.compressed_time())),
        };
        debug!(
            original_span = report.original_span,
            compressed_span = report.compressed_span,
            "timetable compressed"
        );
        Ok(report)
    }
}

fn train_events(network: &Network) -> impl Iterator<Item = &crate::network::Event> {
    network.events().iter().filter(|e| !e.is_origin())
}
