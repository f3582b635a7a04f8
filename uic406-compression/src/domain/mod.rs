//! Domain types for timetable compression.
//!
//! This module contains the validated infrastructure and service model:
//! stations, directed track segments, trains with their timetables, and the
//! repository that holds them. Identifiers enforce their invariants at
//! construction time.

mod error;
mod repository;
mod segment;
mod station;
mod time;
mod train;

pub use error::DomainError;
pub use repository::Repository;
pub use segment::{SegmentId, SegmentIndex, SegmentTrack};
pub use station::{Station, StationId};
pub use time::{DayRollover, SECONDS_PER_DAY, TimeError, TimeFormat};
pub use train::{Operation, StopTimes, Train, TrainId, TrainIndex};
