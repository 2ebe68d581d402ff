use log::debug;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::util::{constant, count};

use super::{check_iteration, Iteration, Schedule};

/// PolySchedule implements polynomial decay: `base_value * t^(-power)`.
///
/// A positive `power` decays the value, a negative one grows it and zero keeps it
/// constant. The first iteration always returns `base_value`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PolySchedule<V> {
    base_value: V,
    power: V,
}

impl<V: Float> PolySchedule<V> {
    pub fn new(base_value: V, power: V) -> Self {
        Self { base_value, power }
    }
}

impl<V: Float> Schedule for PolySchedule<V> {
    type Value = V;

    fn value_at(&self, t: Iteration) -> Result<V, ScheduleError> {
        check_iteration(t)?;
        // 1 + (t - 1) == t
        Ok(self.base_value * count::<V>(t).powf(-self.power))
    }
}

/// Builder for PolySchedule.
pub struct Poly<V> {
    base_value: V,
    power: V,
}

impl<V: Float> Poly<V> {
    /// Default values:
    /// - `base_value`: 0.01
    /// - `power`: 1.0
    pub fn new() -> Self {
        Self {
            base_value: constant(0.01),
            power: V::one(),
        }
    }

    /// Sets the value returned at the first iteration.
    pub fn base_value(mut self, base_value: V) -> Self {
        self.base_value = base_value;
        self
    }

    /// Sets the exponent of the decay.
    pub fn power(mut self, power: V) -> Self {
        self.power = power;
        self
    }

    pub fn build(self) -> Result<PolySchedule<V>, ScheduleError> {
        if !self.power.is_finite() {
            return Err(ScheduleError::ConfigError(format!(
                "Power for Poly must be finite, but was {}",
                self.power.to_f64().unwrap_or(f64::NAN)
            )));
        }
        debug!("Built Poly schedule: power:{}", self.power.to_f64().unwrap_or(f64::NAN));
        Ok(PolySchedule::new(self.base_value, self.power))
    }
}

impl<V: Float> Default for Poly<V> {
    fn default() -> Self {
        Self::new()
    }
}
