//! Train service types.
//!
//! A `Train` carries its route as an ordered list of segment indices, its
//! per-station timetable and the stations where it must stop for a minimum
//! dwell. Times are plain integers in the unit of the input data.

use std::collections::BTreeMap;
use std::fmt;

use super::{DomainError, SegmentIndex, StationId};

/// A non-empty train identifier.
///
/// # Examples
///
/// ```
/// use uic406_compression::domain::TrainId;
///
/// let id = TrainId::new("G101").unwrap();
/// assert_eq!(id.as_str(), "G101");
/// assert!(TrainId::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainId(String);

impl TrainId {
    /// Create a train identifier, rejecting empty input.
    pub fn new(s: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyId("train"));
        }
        Ok(TrainId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a train within the [`Repository`](super::Repository).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainIndex(pub usize);

impl fmt::Display for TrainIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which timetable slot of a station an event corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Arrival,
    Departure,
}

/// Arrival and departure times of a train at one station.
///
/// - For the origin station only `departure` is meaningful
/// - For the terminus only `arrival` is meaningful
/// - Intermediate stations normally carry both
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopTimes {
    pub arrival: Option<i64>,
    pub departure: Option<i64>,
}

impl StopTimes {
    pub fn new(arrival: Option<i64>, departure: Option<i64>) -> Self {
        Self { arrival, departure }
    }

    /// Returns the time stored for an operation.
    pub fn get(&self, op: Operation) -> Option<i64> {
        match op {
            Operation::Arrival => self.arrival,
            Operation::Departure => self.departure,
        }
    }

    /// Overwrites the time stored for an operation.
    pub fn set(&mut self, op: Operation, time: i64) {
        match op {
            Operation::Arrival => self.arrival = Some(time),
            Operation::Departure => self.departure = Some(time),
        }
    }
}

/// A train service with its route and timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    id: TrainId,
    route: Vec<SegmentIndex>,
    timetable: BTreeMap<StationId, StopTimes>,
    min_stopping_times: BTreeMap<StationId, i64>,
}

impl Train {
    /// Create a train with an already-resolved route and an empty timetable.
    ///
    /// Route validation (known segments, continuity) happens in
    /// [`Repository::add_train`](super::Repository::add_train).
    pub fn new(id: TrainId, route: Vec<SegmentIndex>) -> Self {
        Self {
            id,
            route,
            timetable: BTreeMap::new(),
            min_stopping_times: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &TrainId {
        &self.id
    }

    /// Segments in travel order.
    pub fn route(&self) -> &[SegmentIndex] {
        &self.route
    }

    /// Set the timetable entry for a station, replacing any previous one.
    pub fn set_times(&mut self, station: StationId, times: StopTimes) {
        self.timetable.insert(station, times);
    }

    /// Blank every arrival and departure, keeping the stations.
    ///
    /// Returns how many times were set before.
    pub fn clear_times(&mut self) -> usize {
        let mut cleared = 0;
        for times in self.timetable.values_mut() {
            cleared += usize::from(times.arrival.is_some()) + usize::from(times.departure.is_some());
            *times = StopTimes::default();
        }
        cleared
    }

    pub fn times_at(&self, station: &StationId) -> Option<&StopTimes> {
        self.timetable.get(station)
    }

    pub fn times_at_mut(&mut self, station: &StationId) -> Option<&mut StopTimes> {
        self.timetable.get_mut(station)
    }

    /// Iterate the timetable in station identifier order.
    pub fn timetable(&self) -> impl Iterator<Item = (&StationId, &StopTimes)> {
        self.timetable.iter()
    }

    /// Register a scheduled stop with its minimum dwell.
    pub fn set_min_stopping_time(
        &mut self,
        station: StationId,
        value: i64,
    ) -> Result<(), DomainError> {
        if value < 0 {
            return Err(DomainError::NegativeStoppingTime {
                train: self.id.clone(),
                station,
                value,
            });
        }
        self.min_stopping_times.insert(station, value);
        Ok(())
    }

    /// Minimum dwell at a station, or `None` if the train does not stop there.
    pub fn min_stopping_time(&self, station: &StationId) -> Option<i64> {
        self.min_stopping_times.get(station).copied()
    }

    pub fn stops_at(&self, station: &StationId) -> bool {
        self.min_stopping_times.contains_key(station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(s: &str) -> StationId {
        StationId::new(s).unwrap()
    }

    #[test]
    fn clear_times_keeps_stations() {
        let mut train = Train::new(TrainId::new("T1").unwrap(), Vec::new());
        train.set_times(station("A"), StopTimes::new(None, Some(3)));
        train.set_times(station("B"), StopTimes::new(Some(9), Some(11)));

        assert_eq!(train.clear_times(), 3);
        assert_eq!(train.times_at(&station("B")), Some(&StopTimes::default()));
        assert_eq!(train.timetable().count(), 2);
    }

    #[test]
    fn stop_times_get_set() {
        let mut times = StopTimes::new(None, Some(10));
        assert_eq!(times.get(Operation::Arrival), None);
        assert_eq!(times.get(Operation::Departure), Some(10));

        times.set(Operation::Arrival, 4);
        assert_eq!(times.arrival, Some(4));
    }

    #[test]
    fn timetable_lookup() {
        let mut train = Train::new(TrainId::new("T1").unwrap(), vec![SegmentIndex(0)]);
        train.set_times(station("A"), StopTimes::new(None, Some(0)));

        assert_eq!(train.times_at(&station("A")).unwrap().departure, Some(0));
        assert!(train.times_at(&station("B")).is_none());

        train.times_at_mut(&station("A")).unwrap().departure = Some(3);
        assert_eq!(train.times_at(&station("A")).unwrap().departure, Some(3));
    }

    #[test]
    fn min_stopping_time() {
        let mut train = Train::new(TrainId::new("T1").unwrap(), vec![]);
        train.set_min_stopping_time(station("B"), 3).unwrap();

        assert!(train.stops_at(&station("B")));
        assert!(!train.stops_at(&station("C")));
        assert_eq!(train.min_stopping_time(&station("B")), Some(3));
    }

    #[test]
    fn negative_stopping_time_rejected() {
        let mut train = Train::new(TrainId::new("T1").unwrap(), vec![]);
        let err = train.set_min_stopping_time(station("B"), -1).unwrap_err();
        assert!(matches!(err, DomainError::NegativeStoppingTime { value: -1, .. }));
        assert!(!train.stops_at(&station("B")));
    }
}
