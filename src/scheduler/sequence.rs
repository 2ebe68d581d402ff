use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::util::to_iteration;

use super::{check_iteration, Iteration, Schedule};

/// Runs schedules one after another.
///
/// Each `(schedule, length)` segment covers `length` consecutive iterations and
/// sees its own local index starting at 1. The first iteration of a segment
/// belongs to that segment. Past the end of the last segment the sequence keeps
/// delegating to the last schedule, whose local index keeps growing.
///
/// Segments of different concrete types can be mixed through
/// [`BoxedSchedule`](super::BoxedSchedule).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "Vec<(S, usize)>", into = "Vec<(S, usize)>")]
#[serde(bound(serialize = "S: Serialize + Clone", deserialize = "S: Deserialize<'de>"))]
pub struct Sequence<S> {
    schedules: Vec<S>,
    lengths: Vec<usize>,
    // Exclusive end index (1-based) of each segment
    ends: Vec<Iteration>,
}

impl<S> Sequence<S> {
    pub fn new(segments: Vec<(S, usize)>) -> Result<Self, ScheduleError> {
        if segments.is_empty() {
            return Err(ScheduleError::ConfigError(
                "Sequence must contain at least one segment".to_string(),
            ));
        }

        let mut schedules = Vec::with_capacity(segments.len());
        let mut lengths = Vec::with_capacity(segments.len());
        let mut ends = Vec::with_capacity(segments.len());
        let mut end: Iteration = 1;
        for (i, (schedule, length)) in segments.into_iter().enumerate() {
            if length == 0 {
                return Err(ScheduleError::ConfigError(format!(
                    "Length of Sequence segment {} must be greater than 0, but was {}",
                    i, length
                )));
            }
            end = end.checked_add(to_iteration(length, "Segment length")?).ok_or_else(|| {
                ScheduleError::ConfigError("Total length of Sequence segments is too large".to_string())
            })?;
            schedules.push(schedule);
            lengths.push(length);
            ends.push(end);
        }

        debug!("Built Sequence: segments:{}, total_length:{}", schedules.len(), end - 1);
        Ok(Self {
            schedules,
            lengths,
            ends,
        })
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Number of iterations covered before the sequence saturates.
    pub fn total_length(&self) -> Iteration {
        self.ends.last().map_or(0, |end| end - 1)
    }

    /// Maps a global iteration to `(segment, local iteration)`.
    fn locate(&self, t: Iteration) -> (usize, Iteration) {
        let last = self.schedules.len() - 1;
        let segment = self.ends.partition_point(|&end| end <= t).min(last);
        let start = if segment == 0 { 1 } else { self.ends[segment - 1] };
        (segment, t - start + 1)
    }
}

impl<S: Schedule> Schedule for Sequence<S> {
    type Value = S::Value;

    fn value_at(&self, t: Iteration) -> Result<S::Value, ScheduleError> {
        check_iteration(t)?;
        let (segment, local) = self.locate(t);
        self.schedules[segment].value_at(local)
    }
}

impl<S> TryFrom<Vec<(S, usize)>> for Sequence<S> {
    type Error = ScheduleError;

    fn try_from(segments: Vec<(S, usize)>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl<S> From<Sequence<S>> for Vec<(S, usize)> {
    fn from(sequence: Sequence<S>) -> Self {
        sequence.schedules.into_iter().zip(sequence.lengths).collect()
    }
}
