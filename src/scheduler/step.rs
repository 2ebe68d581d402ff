use log::debug;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::util::{constant, count, to_iteration, to_period};

use super::{check_iteration, Iteration, Schedule};

/// StepSchedule implements a step decay schedule which periodically
/// reduces the value by a fixed factor.
/// Iterations are split into blocks of `step_size`; every iteration in block `k`
/// (0-based) gets `base_value * decay_rate^k`, so the first `step_size` calls
/// return `base_value` unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StepSchedule<V> {
    base_value: V,    // Value of the first block
    decay_rate: V,    // Factor applied once per completed block
    step_size: usize, // Number of iterations per block
}

impl<V: Float> StepSchedule<V> {
    /// Creates a new StepSchedule, rejecting a zero `step_size`.
    pub fn new(base_value: V, decay_rate: V, step_size: usize) -> Result<Self, ScheduleError> {
        validate_step_size(step_size, "Step")?;
        Ok(Self {
            base_value,
            decay_rate,
            step_size,
        })
    }
}

impl<V: Float> Schedule for StepSchedule<V> {
    type Value = V;

    fn value_at(&self, t: Iteration) -> Result<V, ScheduleError> {
        check_iteration(t)?;
        let block = (t - 1) / to_period(self.step_size, "Step size")?;
        Ok(self.base_value * self.decay_rate.powf(count(block)))
    }
}

/// Builder for StepSchedule to allow step-by-step construction.
/// StepSchedule implements a step decay schedule which periodically
/// reduces the value by a fixed factor.
/// The decay occurs every `step_size` iterations,
/// and the amount by which the value decreases is controlled by `decay_rate`.
pub struct Step<V> {
    base_value: V,
    decay_rate: V,
    step_size: usize,
}

impl<V: Float> Step<V> {
    /// Creates a new builder instance.
    /// Default values:
    /// - `base_value`: 0.01
    /// - `decay_rate`: 0.9
    /// - `step_size`: 10
    pub fn new() -> Self {
        Self {
            base_value: constant(0.01),
            decay_rate: constant(0.9),
            step_size: 10,
        }
    }

    /// Sets the value used for the first block of iterations.
    pub fn base_value(mut self, base_value: V) -> Self {
        self.base_value = base_value;
        self
    }

    /// Sets the decay rate applied once per block.
    pub fn decay_rate(mut self, decay_rate: V) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    /// Sets the number of iterations per block.
    pub fn step_size(mut self, step_size: usize) -> Self {
        self.step_size = step_size;
        self
    }

    /// Builds the StepSchedule, returning an error if the step size is zero.
    pub fn build(self) -> Result<StepSchedule<V>, ScheduleError> {
        let schedule = StepSchedule::new(self.base_value, self.decay_rate, self.step_size)?;
        debug!("Built Step schedule: step_size:{}", self.step_size);
        Ok(schedule)
    }
}

impl<V: Float> Default for Step<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// MultiStepSchedule looks up the value of each block of `step_size` iterations
/// in an ordered table. Once the block index runs past the table the last entry
/// is returned for every later iteration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MultiStepSchedule<V> {
    values: Vec<V>,
    step_size: usize,
}

impl<V: Float> MultiStepSchedule<V> {
    pub fn new(values: Vec<V>, step_size: usize) -> Result<Self, ScheduleError> {
        if values.is_empty() {
            return Err(ScheduleError::ConfigError(
                "Value table for MultiStep must contain at least one value".to_string(),
            ));
        }
        validate_step_size(step_size, "MultiStep")?;
        Ok(Self { values, step_size })
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }
}

impl<V: Float> Schedule for MultiStepSchedule<V> {
    type Value = V;

    fn value_at(&self, t: Iteration) -> Result<V, ScheduleError> {
        check_iteration(t)?;
        let block = (t - 1) / to_period(self.step_size, "Step size")?;
        let last = self.values.len().checked_sub(1).ok_or_else(|| {
            ScheduleError::ConfigError("Value table for MultiStep must contain at least one value".to_string())
        })?;
        let index = usize::try_from(block).map_or(last, |block| block.min(last));
        Ok(self.values[index])
    }
}

/// Builder for MultiStepSchedule.
/// Default values:
/// - `values`: empty (must be set)
/// - `step_size`: 10
pub struct MultiStep<V> {
    values: Vec<V>,
    step_size: usize,
}

impl<V: Float> MultiStep<V> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            step_size: 10,
        }
    }

    /// Sets the table of per-block values, in order.
    pub fn values(mut self, values: Vec<V>) -> Self {
        self.values = values;
        self
    }

    /// Sets the number of iterations each table entry covers.
    pub fn step_size(mut self, step_size: usize) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn build(self) -> Result<MultiStepSchedule<V>, ScheduleError> {
        let stages = self.values.len();
        let schedule = MultiStepSchedule::new(self.values, self.step_size)?;
        debug!("Built MultiStep schedule: stages:{}, step_size:{}", stages, self.step_size);
        Ok(schedule)
    }
}

impl<V: Float> Default for MultiStep<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_step_size(step_size: usize, name: &str) -> Result<(), ScheduleError> {
    if step_size == 0 {
        return Err(ScheduleError::ConfigError(format!(
            "Step size for {} must be greater than 0, but was {}",
            name, step_size
        )));
    }
    to_iteration(step_size, "Step size")?;
    Ok(())
}
