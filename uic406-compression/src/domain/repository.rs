//! In-memory infrastructure and service repository.
//!
//! The repository is the hand-off point between the loader and the
//! compression core: stations, directed track segments and trains, each
//! addressable both by identifier and by a stable index.

use std::collections::HashMap;

use super::{
    DomainError, SegmentId, SegmentIndex, SegmentTrack, Station, StationId, Train, TrainId,
    TrainIndex,
};

/// Stations, segments and trains of one compression run.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    stations: Vec<Station>,
    segments: Vec<SegmentTrack>,
    trains: Vec<Train>,

    station_lookup: HashMap<StationId, usize>,
    segment_lookup: HashMap<SegmentId, SegmentIndex>,
    train_lookup: HashMap<TrainId, TrainIndex>,
}

impl Repository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station.
    pub fn add_station(&mut self, station: Station) -> Result<(), DomainError> {
        if self.station_lookup.contains_key(&station.id) {
            return Err(DomainError::DuplicateId {
                kind: "station",
                id: station.id.to_string(),
            });
        }
        self.station_lookup
            .insert(station.id.clone(), self.stations.len());
        self.stations.push(station);
        Ok(())
    }

    /// Register a segment. Both end stations must already be known.
    pub fn add_segment(&mut self, segment: SegmentTrack) -> Result<SegmentIndex, DomainError> {
        if self.segment_lookup.contains_key(&segment.id) {
            return Err(DomainError::DuplicateId {
                kind: "segment",
                id: segment.id.to_string(),
            });
        }
        for station in [&segment.from, &segment.to] {
            if !self.station_lookup.contains_key(station) {
                return Err(DomainError::UnknownStation(station.clone()));
            }
        }

        let index = SegmentIndex(self.segments.len());
        self.segment_lookup.insert(segment.id.clone(), index);
        self.segments.push(segment);
        Ok(index)
    }

    /// Register a train with its route given as segment identifiers.
    ///
    /// Every segment must be known, and each segment must start at the
    /// station where the previous one ends.
    pub fn add_train(&mut self, id: TrainId, route: &[SegmentId]) -> Result<TrainIndex, DomainError> {
        if self.train_lookup.contains_key(&id) {
            return Err(DomainError::DuplicateId {
                kind: "train",
                id: id.to_string(),
            });
        }

        let mut resolved = Vec::with_capacity(route.len());
        for seg_id in route {
            let index = self
                .segment_index(seg_id)
                .ok_or_else(|| DomainError::UnknownSegment(seg_id.clone()))?;
            resolved.push(index);
        }

        for pair in resolved.windows(2) {
            let previous = self.segment(pair[0]);
            let next = self.segment(pair[1]);
            if previous.to != next.from {
                return Err(DomainError::DiscontinuousRoute {
                    train: id,
                    previous: previous.id.clone(),
                    next: next.id.clone(),
                });
            }
        }

        let index = TrainIndex(self.trains.len());
        self.train_lookup.insert(id.clone(), index);
        self.trains.push(Train::new(id, resolved));
        Ok(index)
    }

    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.station_lookup.get(id).map(|&i| &self.stations[i])
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn segment_index(&self, id: &SegmentId) -> Option<SegmentIndex> {
        self.segment_lookup.get(id).copied()
    }

    /// Segment at an index handed out by this repository.
    ///
    /// # Panics
    ///
    /// Panics if the index did not come from this repository.
    pub fn segment(&self, index: SegmentIndex) -> &SegmentTrack {
        &self.segments[index.0]
    }

    pub fn get_segment(&self, index: SegmentIndex) -> Option<&SegmentTrack> {
        self.segments.get(index.0)
    }

    pub fn segments(&self) -> &[SegmentTrack] {
        &self.segments
    }

    /// Iterate segments together with their indices, in registration order.
    pub fn indexed_segments(&self) -> impl Iterator<Item = (SegmentIndex, &SegmentTrack)> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| (SegmentIndex(i), s))
    }

    pub fn train_index(&self, id: &TrainId) -> Option<TrainIndex> {
        self.train_lookup.get(id).copied()
    }

    pub fn train(&self, index: TrainIndex) -> Option<&Train> {
        self.trains.get(index.0)
    }

    pub fn train_mut(&mut self, index: TrainIndex) -> Option<&mut Train> {
        self.trains.get_mut(index.0)
    }

    /// Look up a train by identifier for modification.
    pub fn train_by_id_mut(&mut self, id: &TrainId) -> Result<&mut Train, DomainError> {
        let index = self
            .train_index(id)
            .ok_or_else(|| DomainError::UnknownTrain(id.clone()))?;
        Ok(&mut self.trains[index.0])
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Iterate trains together with their indices, in registration order.
    pub fn indexed_trains(&self) -> impl Iterator<Item = (TrainIndex, &Train)> {
        self.trains
            .iter()
            .enumerate()
            .map(|(i, t)| (TrainIndex(i), t))
    }

    /// Stations visited by a train, in travel order.
    pub fn route_stations(&self, train: &Train) -> Vec<&StationId> {
        let mut stations = Vec::with_capacity(train.route().len() + 1);
        if let Some(&first) = train.route().first() {
            stations.push(&self.segment(first).from);
        }
        for &seg in train.route() {
            stations.push(&self.segment(seg).to);
        }
        stations
    }
}
