//! Timetable compression methods.
//!
//! A [`TimetableCompressor`] rewrites every train's times in a
//! [`Repository`] to the earliest schedule that keeps the original train
//! order and all minimum durations. [`execute`] wraps a compressor run with
//! the progress logging the command line shows.

mod ean;
mod error;
mod report;

use std::fmt;
use std::io;

use serde::Deserialize;
use tracing::info;

use crate::domain::Repository;
use crate::network::{Network, SegmentHeadways, SolveStrategy};

pub use ean::EanCompressor;
pub use error::CompressionError;
pub use report::CompressionReport;

/// The compression approaches UIC 406 tooling knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum CompressionMethod {
    IntegerProgramming,
    #[default]
    EventActivityNetwork,
    MaxPlusAutomata,
}

impl CompressionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            CompressionMethod::IntegerProgramming => "IntegerProgramming",
            CompressionMethod::EventActivityNetwork => "EventActivityNetwork",
            CompressionMethod::MaxPlusAutomata => "MaxPlusAutomata",
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observes the intermediate network of a compression run.
///
/// Both hooks default to doing nothing.
pub trait CompressionTrace {
    /// Called once the network is built, before any times are solved.
    fn network_built(&mut self, _network: &Network, _repo: &Repository) -> io::Result<()> {
        Ok(())
    }

    /// Called after the solved times have been written back to the repository.
    fn network_solved(&mut self, _network: &Network, _repo: &Repository) -> io::Result<()> {
        Ok(())
    }
}

/// A trace that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl CompressionTrace for NoTrace {}

pub trait TimetableCompressor {
    fn method(&self) -> CompressionMethod;

    /// Compress every train in `repo` in place.
    ///
    /// Times no network event covers are blanked. If the network cannot be
    /// built, solved or mapped back, the repository's times are left as they
    /// were.
    fn compress(
        &self,
        repo: &mut Repository,
        trace: &mut dyn CompressionTrace,
    ) -> Result<CompressionReport, CompressionError>;
}

/// Pick the compressor for `method`.
pub fn compressor_for(
    method: CompressionMethod,
    headways: SegmentHeadways,
    strategy: SolveStrategy,
) -> Result<Box<dyn TimetableCompressor>, CompressionError> {
    match method {
        CompressionMethod::EventActivityNetwork => {
            Ok(Box::new(EanCompressor::new(headways, strategy)))
        }
        other => Err(CompressionError::Unsupported(other)),
    }
}

/// Run `compressor` over `repo`, logging start and finish.
pub fn execute(
    compressor: &dyn TimetableCompressor,
    repo: &mut Repository,
    trace: &mut dyn CompressionTrace,
) -> Result<CompressionReport, CompressionError> {
    let method = compressor.method();
    info!(%method, trains = repo.trains().len(), "Compressing timetable");
    let report = compressor.compress(repo, trace)?;
    info!(
        %method,
        events = report.events,
        activities = report.activities,
        original_span = report.original_span,
        compressed_span = report.compressed_span,
        "Compression finished"
    );
    Ok(report)
}
