//! Writing the compressed timetable and network debug files.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::compression::CompressionTrace;
use crate::domain::{Repository, TimeFormat};
use crate::network::Network;

pub const TIMETABLE_FILE: &str = "CompressedTimetable.csv";
pub const EVENT_FILE: &str = "debug_event.csv";
pub const ACTIVITY_FILE: &str = "debug_activity.csv";
pub const EVENT_TIME_FILE: &str = "debug_compressedEventTime.csv";

/// Placeholder for the origin event's missing train and segment.
const NULL: &str = "null";

/// Errors from writing solution files.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The solution directory could not be created
    #[error("failed to create {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// A CSV file could not be written
    #[error("{file}: {source}")]
    Csv {
        file: &'static str,
        source: csv::Error,
    },
}

/// Write `CompressedTimetable.csv` into `dir`, creating it if needed.
///
/// Trains appear in load order, their stations in route order.
pub fn write_timetable(
    dir: &Path,
    repo: &Repository,
    format: TimeFormat,
) -> Result<PathBuf, WriteError> {
    create_dir(dir)?;
    let path = dir.join(TIMETABLE_FILE);
    let csv_err = |source: csv::Error| WriteError::Csv {
        file: TIMETABLE_FILE,
        source,
    };

    let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;
    writer
        .write_record(["TrainID", "StationID", "Arrival", "Departure"])
        .map_err(csv_err)?;

    let mut rows = 0usize;
    for train in repo.trains() {
        for station in repo.route_stations(train) {
            let times = train.times_at(station).copied().unwrap_or_default();
            let arrival = format.format_optional(times.arrival);
            let departure = format.format_optional(times.departure);
            writer
                .write_record([
                    train.id().as_str(),
                    station.as_str(),
                    arrival.as_str(),
                    departure.as_str(),
                ])
                .map_err(csv_err)?;
            rows += 1;
        }
    }
    writer.flush().map_err(|e| csv_err(e.into()))?;

    debug!(path = %path.display(), rows, "compressed timetable written");
    Ok(path)
}

fn create_dir(dir: &Path) -> Result<(), WriteError> {
    std::fs::create_dir_all(dir).map_err(|source| WriteError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Dumps the network to CSV as compression proceeds.
///
/// Events and activities are written once the network is built; the
/// original and compressed time of every event once it is solved.
#[derive(Debug, Clone)]
pub struct CsvTrace {
    dir: PathBuf,
    format: TimeFormat,
}

impl CsvTrace {
    pub fn new(dir: impl Into<PathBuf>, format: TimeFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    fn writer(&self, file: &str) -> io::Result<csv::Writer<std::fs::File>> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(csv::Writer::from_path(self.dir.join(file))?)
    }
}

impl CompressionTrace for CsvTrace {
    fn network_built(&mut self, network: &Network, repo: &Repository) -> io::Result<()> {
        let mut events = self.writer(EVENT_FILE)?;
        events.write_record([
            "EventID",
            "TrainID",
            "SegmentID",
            "EventType",
            "OriginalTime",
        ])?;
        for (id, event) in network.indexed_events() {
            let train = event.train().and_then(|t| repo.train(t)).map(|t| t.id().as_str());
            let segment = event
                .segment()
                .and_then(|s| repo.get_segment(s))
                .map(|s| s.id.as_str());
            let index = id.0.to_string();
            let original = self.format.format(event.original_time());
            events.write_record([
                index.as_str(),
                train.unwrap_or(NULL),
                segment.unwrap_or(NULL),
                event.kind().as_str(),
                original.as_str(),
            ])?;
        }
        events.flush()?;

        let mut activities = self.writer(ACTIVITY_FILE)?;
        activities.write_record(["FromEvent", "ToEvent", "ActivityType", "MinDuration"])?;
        for activity in network.activities() {
            activities.write_record([
                network.label(activity.from(), repo),
                network.label(activity.to(), repo),
                activity.kind().to_string(),
                activity.min_duration().to_string(),
            ])?;
        }
        activities.flush()?;

        debug!(
            dir = %self.dir.display(),
            events = network.event_count(),
            activities = network.activity_count(),
            "network trace written"
        );
        Ok(())
    }

    fn network_solved(&mut self, network: &Network, repo: &Repository) -> io::Result<()> {
        let mut times = self.writer(EVENT_TIME_FILE)?;
        times.write_record(["Event", "OriginalTime", "CompressedTime"])?;
        for (id, event) in network.indexed_events() {
            times.write_record([
                network.label(id, repo),
                self.format.format(event.original_time()),
                self.format.format(event.compressed_time()),
            ])?;
        }
        times.flush()?;
        Ok(())
    }
}
