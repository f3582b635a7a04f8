//! Fixture helpers for unit tests.

use crate::domain::{
    Repository, SegmentId, SegmentTrack, Station, StationId, StopTimes, TrainId, TrainIndex,
};

pub(crate) fn station(s: &str) -> StationId {
    StationId::new(s).unwrap()
}

pub(crate) fn seg(s: &str) -> SegmentId {
    SegmentId::new(s).unwrap()
}

pub(crate) fn train_id(s: &str) -> TrainId {
    TrainId::new(s).unwrap()
}

/// Builds a repository from terse literals.
pub(crate) struct RepoBuilder {
    repo: Repository,
}

impl RepoBuilder {
    /// Start from a set of stations.
    pub(crate) fn stations(ids: &[&str]) -> Self {
        let mut repo = Repository::new();
        for id in ids {
            repo.add_station(Station::new(station(id), *id)).unwrap();
        }
        Self { repo }
    }

    pub(crate) fn segment(mut self, id: &str, from: &str, to: &str) -> Self {
        self.repo
            .add_segment(SegmentTrack::new(seg(id), station(from), station(to)))
            .unwrap();
        self
    }

    /// Add a train.
    ///
    /// `times` holds `(station, arrival, departure)`; `stops` holds
    /// `(station, min_stopping_time)`.
    pub(crate) fn train(
        mut self,
        id: &str,
        route: &[&str],
        times: &[(&str, Option<i64>, Option<i64>)],
        stops: &[(&str, i64)],
    ) -> Self {
        let route: Vec<SegmentId> = route.iter().map(|s| seg(s)).collect();
        let index = self.repo.add_train(train_id(id), &route).unwrap();
        let train = self.repo.train_mut(index).unwrap();
        for (st, arr, dep) in times {
            train.set_times(station(st), StopTimes::new(*arr, *dep));
        }
        for (st, dwell) in stops {
            train.set_min_stopping_time(station(st), *dwell).unwrap();
        }
        self
    }

    pub(crate) fn build(self) -> Repository {
        self.repo
    }
}

/// Times of a train at a station after compression.
pub(crate) fn times_of(repo: &Repository, train: &str, st: &str) -> StopTimes {
    let index: TrainIndex = repo.train_index(&train_id(train)).unwrap();
    *repo
        .train(index)
        .unwrap()
        .times_at(&station(st))
        .unwrap()
}
