use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::util::{to_iteration, to_period};

use super::{Iteration, Schedule};

/// Replays iterations `1..=period` of the inner schedule over and over:
/// `value_at(t) = inner.value_at(((t - 1) mod period) + 1)`.
///
/// The inner index always lands in `[1, period]`, so any `t` is accepted
/// (indices before the start map onto the preceding cycle). The inner
/// schedule's own period, if it has one, plays no part.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Loop<S> {
    inner: S,
    period: usize,
}

impl<S> Loop<S> {
    pub fn new(inner: S, period: usize) -> Result<Self, ScheduleError> {
        if period == 0 {
            return Err(ScheduleError::ConfigError(format!(
                "Period for Loop must be greater than 0, but was {}",
                period
            )));
        }
        to_iteration(period, "Period")?;
        debug!("Built Loop: period:{}", period);
        Ok(Self { inner, period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Schedule> Schedule for Loop<S> {
    type Value = S::Value;

    fn value_at(&self, t: Iteration) -> Result<S::Value, ScheduleError> {
        let period = to_period(self.period, "Period")?;
        // ((t - 1) mod period) + 1, without the subtraction overflowing at i64::MIN
        let local = match t.rem_euclid(period) {
            0 => period,
            r => r,
        };
        self.inner.value_at(local)
    }
}
