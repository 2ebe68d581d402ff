use std::collections::HashMap;
use std::hash::Hash;

use log::trace;

use crate::error::ScheduleError;

use super::{Iteration, Schedule};

/// Drives one schedule for many parameters, keeping a separate 1-based
/// iteration counter per parameter key.
///
/// This is the only stateful piece: the schedule stays pure and the counters
/// live here, owned by whoever integrates the schedule with a training loop.
/// A counter advances only when its key is stepped.
pub struct ScheduleTracker<K, S> {
    schedule: S,
    iterations: HashMap<K, Iteration>,
}

impl<K, S> ScheduleTracker<K, S>
where
    K: Eq + Hash,
    S: Schedule,
{
    pub fn new(schedule: S) -> Self {
        Self {
            schedule,
            iterations: HashMap::new(),
        }
    }

    pub fn schedule(&self) -> &S {
        &self.schedule
    }

    /// Advances the counter of `key` and returns the value for that iteration.
    /// The first call for a key evaluates iteration 1.
    ///
    /// If the schedule fails, the counter is left where it was.
    pub fn next(&mut self, key: K) -> Result<S::Value, ScheduleError> {
        let t = self
            .iterations
            .get(&key)
            .copied()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| ScheduleError::DomainError("Iteration counter overflowed".to_string()))?;
        let value = self.schedule.value_at(t)?;
        self.iterations.insert(key, t);
        trace!("Schedule stepped: iteration:{}", t);
        Ok(value)
    }

    /// Last iteration evaluated for `key`, or 0 if it was never stepped.
    pub fn iteration(&self, key: &K) -> Iteration {
        self.iterations.get(key).copied().unwrap_or(0)
    }

    /// Number of keys that have been stepped at least once.
    pub fn tracked(&self) -> usize {
        self.iterations.len()
    }

    /// Forgets the counter of `key`, so its next step starts again at iteration 1.
    pub fn reset(&mut self, key: &K) {
        self.iterations.remove(key);
    }

    pub fn reset_all(&mut self) {
        self.iterations.clear();
    }
}
