//! Loading the data directory into a [`Repository`].
//!
//! Every file is a headed CSV table. Stations and segments are read first so
//! that trains, stops and timetable rows can be checked against them.

mod error;

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{
    DayRollover, DomainError, Operation, Repository, SegmentId, SegmentTrack, Station, StationId,
    StopTimes, TimeFormat, TrainId, TrainIndex,
};

pub use error::LoadError;

pub const STATION_FILE: &str = "Station.csv";
pub const SEGMENT_FILE: &str = "SegmentTrack.csv";
pub const SEGMENT_PARA_FILE: &str = "SegmentTrackPara.csv";
pub const TRAIN_FILE: &str = "Train.csv";
pub const OPERATION_FILE: &str = "TrainOperation.csv";
pub const TIMETABLE_FILE: &str = "OrgTimetable.csv";

/// Separator between segment identifiers in a train's route.
const ROUTE_SEPARATOR: char = ';';

#[derive(Debug, Deserialize)]
struct StationRecord {
    #[serde(rename = "StationID")]
    id: String,
    #[serde(rename = "Name", default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct SegmentRecord {
    #[serde(rename = "SegmentID")]
    id: String,
    #[serde(rename = "FromStation")]
    from: String,
    #[serde(rename = "ToStation")]
    to: String,
}

#[derive(Debug, Deserialize)]
struct SegmentParaRecord {
    #[serde(rename = "SegmentID")]
    id: String,
    #[serde(rename = "MinHeadway")]
    min_headway: i64,
}

#[derive(Debug, Deserialize)]
struct TrainRecord {
    #[serde(rename = "TrainID")]
    id: String,
    #[serde(rename = "Route")]
    route: String,
}

#[derive(Debug, Deserialize)]
struct OperationRecord {
    #[serde(rename = "TrainID")]
    train: String,
    #[serde(rename = "StationID")]
    station: String,
    #[serde(rename = "MinStoppingTime")]
    min_stopping_time: i64,
}

#[derive(Debug, Deserialize)]
struct TimetableRecord {
    #[serde(rename = "TrainID")]
    train: String,
    #[serde(rename = "StationID")]
    station: String,
    #[serde(rename = "Arrival", default)]
    arrival: String,
    #[serde(rename = "Departure", default)]
    departure: String,
}

/// Everything read from the data directory.
#[derive(Debug)]
pub struct LoadedData {
    pub repository: Repository,
    /// Per-segment headways from `SegmentTrackPara.csv`, in file order.
    pub headway_overrides: Vec<(SegmentId, i64)>,
}

/// Read all data files from `dir`.
///
/// `SegmentTrackPara.csv` is optional; the other files must exist.
pub fn load_repository(dir: &Path, format: TimeFormat) -> Result<LoadedData, LoadError> {
    let mut repo = Repository::new();

    for (line, record) in read_records::<StationRecord>(dir, STATION_FILE)? {
        let id = domain(STATION_FILE, line, StationId::new(&record.id))?;
        domain(STATION_FILE, line, repo.add_station(Station::new(id, record.name)))?;
    }

    for (line, record) in read_records::<SegmentRecord>(dir, SEGMENT_FILE)? {
        let segment = domain(SEGMENT_FILE, line, segment_track(&record))?;
        domain(SEGMENT_FILE, line, repo.add_segment(segment))?;
    }

    let headway_overrides = if dir.join(SEGMENT_PARA_FILE).exists() {
        load_headways(dir, &repo)?
    } else {
        debug!("no {SEGMENT_PARA_FILE}, using the default headway everywhere");
        Vec::new()
    };

    for (line, record) in read_records::<TrainRecord>(dir, TRAIN_FILE)? {
        let id = domain(TRAIN_FILE, line, TrainId::new(&record.id))?;
        let route = domain(TRAIN_FILE, line, parse_route(&record.route))?;
        domain(TRAIN_FILE, line, repo.add_train(id, &route))?;
    }

    for (line, record) in read_records::<OperationRecord>(dir, OPERATION_FILE)? {
        let (train, station) =
            resolve_stop(&repo, OPERATION_FILE, line, &record.train, &record.station)?;
        let train_mut = domain(OPERATION_FILE, line, repo.train_by_id_mut(&train))?;
        if train_mut.stops_at(&station) {
            return Err(duplicate(OPERATION_FILE, line, "stop", &train, &station));
        }
        domain(
            OPERATION_FILE,
            line,
            train_mut.set_min_stopping_time(station, record.min_stopping_time),
        )?;
    }

    for (line, record) in read_records::<TimetableRecord>(dir, TIMETABLE_FILE)? {
        let (train, station) =
            resolve_stop(&repo, TIMETABLE_FILE, line, &record.train, &record.station)?;
        let times = StopTimes::new(
            time(line, format, &record.arrival)?,
            time(line, format, &record.departure)?,
        );
        let train_mut = domain(TIMETABLE_FILE, line, repo.train_by_id_mut(&train))?;
        if train_mut.times_at(&station).is_some() {
            return Err(duplicate(TIMETABLE_FILE, line, "timetable entry", &train, &station));
        }
        train_mut.set_times(station, times);
    }

    if format == TimeFormat::Clock {
        let rolled = roll_over_midnight(&mut repo);
        if rolled > 0 {
            debug!(trains = rolled, "clock times continued past midnight");
        }
    }

    debug!(
        stations = repo.stations().len(),
        segments = repo.segments().len(),
        trains = repo.trains().len(),
        headway_overrides = headway_overrides.len(),
        "data loaded"
    );
    Ok(LoadedData {
        repository: repo,
        headway_overrides,
    })
}

fn load_headways(dir: &Path, repo: &Repository) -> Result<Vec<(SegmentId, i64)>, LoadError> {
    let mut overrides = Vec::new();
    for (line, record) in read_records::<SegmentParaRecord>(dir, SEGMENT_PARA_FILE)? {
        let id = domain(SEGMENT_PARA_FILE, line, SegmentId::new(&record.id))?;
        if repo.segment_index(&id).is_none() {
            return Err(LoadError::Domain {
                file: SEGMENT_PARA_FILE,
                line,
                source: DomainError::UnknownSegment(id),
            });
        }
        if record.min_headway < 0 {
            return Err(LoadError::Invalid {
                file: SEGMENT_PARA_FILE,
                line,
                message: format!("negative headway {}", record.min_headway),
            });
        }
        overrides.push((id, record.min_headway));
    }
    Ok(overrides)
}

/// Deserialize every row of `file`, paired with its line number.
fn read_records<T: DeserializeOwned>(
    dir: &Path,
    file: &'static str,
) -> Result<Vec<(u64, T)>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(dir.join(file))
        .map_err(|source| LoadError::Csv { file, source })?;

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv { file, source })?
        .clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|source| LoadError::Csv { file, source })?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let record: T = row
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::Csv { file, source })?;
        records.push((line, record));
    }
    debug!(file, rows = records.len(), "read");
    Ok(records)
}

/// Shift clock times that run past midnight onto the following day.
///
/// Returns the number of trains that crossed midnight.
fn roll_over_midnight(repo: &mut Repository) -> usize {
    let mut rolled = 0;
    for index in (0..repo.trains().len()).map(TrainIndex) {
        let Some(train) = repo.train(index) else {
            continue;
        };
        let stations: Vec<StationId> = repo.route_stations(train).into_iter().cloned().collect();
        let Some(train) = repo.train_mut(index) else {
            continue;
        };

        let mut seen = BTreeSet::new();
        let mut clock = DayRollover::default();
        for station in stations {
            if !seen.insert(station.clone()) {
                continue;
            }
            let Some(times) = train.times_at_mut(&station) else {
                continue;
            };
            for op in [Operation::Arrival, Operation::Departure] {
                if let Some(time) = times.get(op) {
                    times.set(op, clock.next(time));
                }
            }
        }
        if clock.days() > 0 {
            rolled += 1;
        }
    }
    rolled
}

fn segment_track(record: &SegmentRecord) -> Result<SegmentTrack, DomainError> {
    Ok(SegmentTrack::new(
        SegmentId::new(&record.id)?,
        StationId::new(&record.from)?,
        StationId::new(&record.to)?,
    ))
}

fn parse_route(route: &str) -> Result<Vec<SegmentId>, DomainError> {
    route
        .split(ROUTE_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(SegmentId::new)
        .collect()
}

/// Check that `station` lies on the route of `train`.
fn resolve_stop(
    repo: &Repository,
    file: &'static str,
    line: u64,
    train: &str,
    station: &str,
) -> Result<(TrainId, StationId), LoadError> {
    let train_id = domain(file, line, TrainId::new(train))?;
    let station_id = domain(file, line, StationId::new(station))?;

    let index = repo.train_index(&train_id).ok_or_else(|| LoadError::Domain {
        file,
        line,
        source: DomainError::UnknownTrain(train_id.clone()),
    })?;
    if repo.station(&station_id).is_none() {
        return Err(LoadError::Domain {
            file,
            line,
            source: DomainError::UnknownStation(station_id),
        });
    }

    let on_route = repo
        .train(index)
        .map(|t| repo.route_stations(t).contains(&&station_id))
        .unwrap_or(false);
    if !on_route {
        return Err(LoadError::Invalid {
            file,
            line,
            message: format!("station {station_id} is not on the route of train {train_id}"),
        });
    }
    Ok((train_id, station_id))
}

fn duplicate(
    file: &'static str,
    line: u64,
    kind: &'static str,
    train: &TrainId,
    station: &StationId,
) -> LoadError {
    LoadError::Domain {
        file,
        line,
        source: DomainError::DuplicateId {
            kind,
            id: format!("{train}/{station}"),
        },
    }
}

fn domain<T>(
    file: &'static str,
    line: u64,
    result: Result<T, DomainError>,
) -> Result<T, LoadError> {
    result.map_err(|source| LoadError::Domain { file, line, source })
}

fn time(line: u64, format: TimeFormat, text: &str) -> Result<Option<i64>, LoadError> {
    format.parse_optional(text).map_err(|source| LoadError::Time {
        file: TIMETABLE_FILE,
        line,
        source,
    })
}
