use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

use super::{Iteration, Schedule};

/// Blends two endpoint values with a weight schedule:
/// `value_at(t) = a + (b - a) * weight.value_at(t)`.
///
/// The result stays within `[a, b]` only while the weight stays within `[0, 1]`;
/// that is up to the weight schedule and is not checked here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Interpolator<W, V> {
    weight: W,
    a: V,
    b: V,
}

impl<W, V> Interpolator<W, V> {
    pub fn new(weight: W, a: V, b: V) -> Self {
        Self { weight, a, b }
    }

    pub fn weight(&self) -> &W {
        &self.weight
    }
}

impl<W, V> Schedule for Interpolator<W, V>
where
    W: Schedule<Value = V>,
    V: Float,
{
    type Value = V;

    fn value_at(&self, t: Iteration) -> Result<V, ScheduleError> {
        let w = self.weight.value_at(t)?;
        Ok(self.a + (self.b - self.a) * w)
    }
}
