//! Event-activity network (EAN) for timetable compression.
//!
//! The network turns a timetable into a directed acyclic graph: events are
//! the moments trains enter and leave track segments, activities are the
//! minimum durations that must separate them (running, dwelling, headway).
//! The longest path from the single origin event to each event is that
//! event's time in the compressed timetable.

mod activity;
mod builder;
mod check;
mod error;
mod event;
mod graph;
mod headway;
mod mapping;
mod solver;

#[cfg(test)]
mod proptests;

pub use activity::{Activity, ActivityId, ActivityKind};
pub use builder::build_network;
pub use error::NetworkError;
pub use event::{Boundary, Event, EventId, EventKind};
pub use graph::Network;
pub use headway::{FixedHeadway, HeadwayPolicy, SegmentHeadways};
pub use mapping::apply_compressed_times;
pub use solver::{SolveStats, SolveStrategy, solve};
