//! Writing solved event times back into train timetables.

use tracing::{debug, warn};

use crate::domain::{Operation, Repository, StationId, TrainIndex};

use super::{Network, NetworkError};

/// Replace every train's timetable with the solved event times.
///
/// Each entering/leaving event's compressed time goes into the departure or
/// arrival slot of its train at the event's station. Slots no event covers,
/// such as both ends of a skipped segment, are blanked so no original time
/// survives next to compressed ones.
///
/// Returns the number of slots written. A missing train, segment or
/// timetable entry means the network and repository disagree and is
/// reported as an error; the repository is then left untouched.
pub fn apply_compressed_times(
    network: &Network,
    repo: &mut Repository,
) -> Result<usize, NetworkError> {
    let mut writes: Vec<(TrainIndex, StationId, Operation, i64)> = Vec::new();

    for (id, event) in network.indexed_events() {
        let Some(operation) = event.kind().operation() else {
            continue;
        };
        let (Some(train_index), Some(segment_index)) = (event.train(), event.segment()) else {
            return Err(NetworkError::UnboundEvent(id));
        };

        let station = event
            .station(repo)
            .ok_or(NetworkError::UnknownSegment(segment_index))?
            .clone();
        let train = repo
            .train(train_index)
            .ok_or(NetworkError::UnknownTrain(train_index))?;
        if train.times_at(&station).is_none() {
            return Err(NetworkError::MissingTimetableEntry {
                train: train.id().clone(),
                station,
            });
        }
        writes.push((train_index, station, operation, event.compressed_time()));
    }

    let mut previous = 0;
    for index in 0..repo.trains().len() {
        if let Some(train) = repo.train_mut(TrainIndex(index)) {
            previous += train.clear_times();
        }
    }

    for (train_index, station, operation, time) in &writes {
        if let Some(times) = repo
            .train_mut(*train_index)
            .and_then(|t| t.times_at_mut(station))
        {
            times.set(*operation, *time);
        }
    }

    let written = writes.len();
    let blanked = previous.saturating_sub(written);
    if blanked > 0 {
        warn!(blanked, "timetable times without a network event were blanked");
    }
    debug!(written, "compressed times written back");
    Ok(written)
}
