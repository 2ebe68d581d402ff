use log::debug;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::util::{constant, count};

use super::{check_iteration, Iteration, Schedule};

// ExpSchedule implements an exponential decay schedule which continuously
// decreases the value on every iteration. The value at iteration `t` is
// `base_value * decay_rate^(t-1)`, so the first call returns `base_value`.
// A `decay_rate` in (0, 1) decays geometrically; the range is not checked here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExpSchedule<V> {
    base_value: V, // Value at the first iteration
    decay_rate: V, // Base for the exponential decay
}

impl<V: Float> ExpSchedule<V> {
    pub fn new(base_value: V, decay_rate: V) -> Self {
        Self { base_value, decay_rate }
    }
}

impl<V: Float> Schedule for ExpSchedule<V> {
    type Value = V;

    fn value_at(&self, t: Iteration) -> Result<V, ScheduleError> {
        check_iteration(t)?;
        Ok(self.base_value * self.decay_rate.powf(count(t - 1)))
    }
}

/// Exp is a builder for the exponential decay schedule which allows for more flexible and readable construction.
///
/// The built schedule returns `base_value * decay_rate^(t-1)` at iteration `t`.
pub struct Exp<V> {
    base_value: V,
    decay_rate: V,
}

impl<V: Float> Exp<V> {
    // Creates a new `Exp` builder.
    // Default values:
    // - `base_value`: 0.01
    // - `decay_rate`: 0.95
    pub fn new() -> Self {
        Self {
            base_value: constant(0.01),
            decay_rate: constant(0.95),
        }
    }

    /// Sets the base value.
    /// This is the value returned at the first iteration, before any decay is applied.
    /// # Parameters
    /// - `base_value`: The initial value.
    pub fn base_value(mut self, base_value: V) -> Self {
        self.base_value = base_value;
        self
    }

    /// Sets the decay rate.
    /// This is the base for the exponential decay.
    /// # Parameters
    /// - `decay_rate`: The decay rate.
    pub fn decay_rate(mut self, decay_rate: V) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        if !self.base_value.is_finite() {
            return Err(ScheduleError::ConfigError(format!(
                "Base value for Exp must be finite, but was {}",
                self.base_value.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if !self.decay_rate.is_finite() {
            return Err(ScheduleError::ConfigError(format!(
                "Decay rate for Exp must be finite, but was {}",
                self.decay_rate.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Builds the `ExpSchedule` if all fields are valid.
    pub fn build(self) -> Result<ExpSchedule<V>, ScheduleError> {
        self.validate()?;
        debug!(
            "Built Exp schedule: base_value:{}, decay_rate:{}",
            self.base_value.to_f64().unwrap_or(f64::NAN),
            self.decay_rate.to_f64().unwrap_or(f64::NAN)
        );
        Ok(ExpSchedule::new(self.base_value, self.decay_rate))
    }
}

impl<V: Float> Default for Exp<V> {
    /// Creates a new `Exp` builder with default values.
    /// Default values:
    /// - `base_value`: 0.01
    /// - `decay_rate`: 0.95
    fn default() -> Self {
        Self::new()
    }
}
