//! UIC 406 timetable compression.
//!
//! Reads an infrastructure and a timetable, pushes every train as early as
//! its running times, stops and headways allow while keeping the original
//! train order, and writes the compressed timetable. The compressed span
//! over the original span is the capacity occupancy of the line.

pub mod compression;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod network;
pub mod writer;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
