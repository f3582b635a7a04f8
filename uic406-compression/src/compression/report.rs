//! Summary of a compression run.

use crate::network::SolveStats;

use super::CompressionMethod;

/// What a compression run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub method: CompressionMethod,
    pub trains: usize,
    pub events: usize,
    pub activities: usize,
    pub solve: SolveStats,
    /// Latest minus earliest original time over all train events.
    pub original_span: i64,
    /// Latest minus earliest compressed time over all train events.
    pub compressed_span: i64,
}

impl CompressionReport {
    /// UIC 406 occupancy: compressed span over original span.
    ///
    /// `None` when the original timetable has no extent.
    pub fn occupancy(&self) -> Option<f64> {
        if self.original_span <= 0 {
            return None;
        }
        Some(self.compressed_span as f64 / self.original_span as f64)
    }
}

/// Extent of a set of times: `max - min`, or zero when empty.
pub(crate) fn span(times: impl Iterator<Item = i64>) -> i64 {
    let mut bounds: Option<(i64, i64)> = None;
    for t in times {
        bounds = Some(match bounds {
            None => (t, t),
            Some((lo, hi)) => (lo.min(t), hi.max(t)),
        });
    }
    bounds.map(|(lo, hi)| hi - lo).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::SolveStrategy;

    fn report(original_span: i64, compressed_span: i64) -> CompressionReport {
        CompressionReport {
            method: CompressionMethod::EventActivityNetwork,
            trains: 1,
            events: 3,
            activities: 2,
            solve: SolveStats {
                strategy: SolveStrategy::Topological,
                expansions: 3,
                relaxations: 2,
                improvements: 2,
                unreachable: 0,
                makespan: compressed_span,
            },
            original_span,
            compressed_span,
        }
    }

    #[test]
    fn occupancy_ratio() {
        assert_eq!(report(100, 40).occupancy(), Some(0.4));
        assert_eq!(report(0, 0).occupancy(), None);
    }

    #[test]
    fn span_of_times() {
        assert_eq!(span([5, 1, 9].into_iter()), 8);
        assert_eq!(span([4].into_iter()), 0);
        assert_eq!(span(std::iter::empty()), 0);
    }
}
