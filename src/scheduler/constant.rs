use log::debug;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::util::constant;

use super::{check_iteration, Iteration, Schedule};

/// Returns the same value at every iteration. Mostly useful as a hold or
/// warm-up segment inside a [`Sequence`](super::Sequence).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConstantSchedule<V> {
    value: V,
}

impl<V> ConstantSchedule<V> {
    pub fn new(value: V) -> Self {
        Self { value }
    }
}

impl<V: Clone> Schedule for ConstantSchedule<V> {
    type Value = V;

    fn value_at(&self, t: Iteration) -> Result<V, ScheduleError> {
        check_iteration(t)?;
        Ok(self.value.clone())
    }
}

/// Builder for ConstantSchedule. Default value: 0.01
pub struct Constant<V> {
    value: V,
}

impl<V: Float> Constant<V> {
    pub fn new() -> Self {
        Self { value: constant(0.01) }
    }

    pub fn value(mut self, value: V) -> Self {
        self.value = value;
        self
    }

    pub fn build(self) -> ConstantSchedule<V> {
        debug!("Built Constant schedule: value:{}", self.value.to_f64().unwrap_or(f64::NAN));
        ConstantSchedule::new(self.value)
    }
}

impl<V: Float> Default for Constant<V> {
    fn default() -> Self {
        Self::new()
    }
}
