use log::debug;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::util::{constant, count};

use super::{check_iteration, Iteration, Schedule};

// InvSchedule implements inverse decay:
// value = base_value / (1 + decay_rate * (t - 1))^power
// With the default power of 1 this is plain inverse-time decay.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InvSchedule<V> {
    base_value: V,
    decay_rate: V,
    power: V,
}

impl<V: Float> InvSchedule<V> {
    pub fn new(base_value: V, decay_rate: V) -> Self {
        Self::with_power(base_value, decay_rate, V::one())
    }

    pub fn with_power(base_value: V, decay_rate: V, power: V) -> Self {
        Self {
            base_value,
            decay_rate,
            power,
        }
    }
}

impl<V: Float> Schedule for InvSchedule<V> {
    type Value = V;

    fn value_at(&self, t: Iteration) -> Result<V, ScheduleError> {
        check_iteration(t)?;
        let denominator = V::one() + self.decay_rate * count(t - 1);
        if denominator == V::zero() {
            return Err(ScheduleError::DomainError(format!(
                "Inv denominator vanishes at iteration {}",
                t
            )));
        }
        Ok(self.base_value / denominator.powf(self.power))
    }
}

/// Builder for InvSchedule.
///
/// Default values:
/// - `base_value`: 0.01
/// - `decay_rate`: 0.1
/// - `power`: 1.0
pub struct Inv<V> {
    base_value: V,
    decay_rate: V,
    power: V,
}

impl<V: Float> Inv<V> {
    pub fn new() -> Self {
        Self {
            base_value: constant(0.01),
            decay_rate: constant(0.1),
            power: V::one(),
        }
    }

    pub fn base_value(mut self, base_value: V) -> Self {
        self.base_value = base_value;
        self
    }

    pub fn decay_rate(mut self, decay_rate: V) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    pub fn power(mut self, power: V) -> Self {
        self.power = power;
        self
    }

    pub fn build(self) -> Result<InvSchedule<V>, ScheduleError> {
        if !self.decay_rate.is_finite() || !self.power.is_finite() {
            return Err(ScheduleError::ConfigError(format!(
                "Decay rate and power for Inv must be finite, but were {} and {}",
                self.decay_rate.to_f64().unwrap_or(f64::NAN),
                self.power.to_f64().unwrap_or(f64::NAN)
            )));
        }
        debug!(
            "Built Inv schedule: decay_rate:{}, power:{}",
            self.decay_rate.to_f64().unwrap_or(f64::NAN),
            self.power.to_f64().unwrap_or(f64::NAN)
        );
        Ok(InvSchedule::with_power(self.base_value, self.decay_rate, self.power))
    }
}

impl<V: Float> Default for Inv<V> {
    fn default() -> Self {
        Self::new()
    }
}
