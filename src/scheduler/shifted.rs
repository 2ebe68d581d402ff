use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

use super::{Iteration, Schedule};

/// Delays a schedule by `offset` iterations: `value_at(t) = inner.value_at(t - offset)`.
///
/// A negative offset advances the schedule instead. Indices that land outside
/// the inner schedule's domain are reported by the inner schedule itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Shifted<S> {
    inner: S,
    offset: Iteration,
}

impl<S> Shifted<S> {
    pub fn new(inner: S, offset: Iteration) -> Self {
        Self { inner, offset }
    }

    pub fn offset(&self) -> Iteration {
        self.offset
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Schedule> Schedule for Shifted<S> {
    type Value = S::Value;

    fn value_at(&self, t: Iteration) -> Result<S::Value, ScheduleError> {
        let shifted = t.checked_sub(self.offset).ok_or_else(|| {
            ScheduleError::DomainError(format!("Shifting iteration {} by {} overflows", t, self.offset))
        })?;
        self.inner.value_at(shifted)
    }
}

#[cfg(test)]
mod tests {
    use crate::scheduler::{ExpSchedule, PeriodicSchedule};

    use super::*;

    #[test]
    fn test_shifted_delays_inner_schedule() {
        let scheduler = Shifted::new(ExpSchedule::new(1.0_f64, 0.5), 3);
        assert_eq!(scheduler.value_at(4).unwrap(), 1.0);
        assert_eq!(scheduler.value_at(5).unwrap(), 0.5);
    }

    #[test]
    fn test_shifted_propagates_domain_error() {
        let inner = ExpSchedule::new(1.0_f64, 0.5);
        let scheduler = Shifted::new(inner.clone(), 3);
        assert_eq!(scheduler.value_at(3), inner.value_at(0));
        assert!(matches!(scheduler.value_at(1), Err(ScheduleError::DomainError(_))));
    }

    #[test]
    fn test_negative_offset_advances() {
        let inner = PeriodicSchedule::cos_anneal(0.0_f64, 1.0, 10).unwrap();
        let scheduler = Shifted::new(inner.clone(), -5);
        assert_eq!(scheduler.value_at(1).unwrap(), inner.value_at(6).unwrap());
    }

    #[test]
    fn test_shift_overflow_is_domain_error() {
        let scheduler = Shifted::new(ExpSchedule::new(1.0_f64, 0.5), -1);
        let err = scheduler.value_at(i64::MAX).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Domain error: Shifting iteration {} by -1 overflows", i64::MAX)
        );
    }
}
