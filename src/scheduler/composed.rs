use crate::error::ScheduleError;

use super::{Iteration, Schedule};

/// Applies a transform to every value of the inner schedule:
/// `value_at(t) = f(inner.value_at(t))`.
///
/// Timing is untouched; only the output changes. The transform may change the
/// value type, e.g. to fan a scalar out into per-group values.
#[derive(Clone)]
pub struct ComposedSchedule<S, F> {
    inner: S,
    transform: F,
}

impl<S, F> ComposedSchedule<S, F> {
    pub fn new(inner: S, transform: F) -> Self {
        Self { inner, transform }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S, F, U> Schedule for ComposedSchedule<S, F>
where
    S: Schedule,
    F: Fn(S::Value) -> U,
{
    type Value = U;

    fn value_at(&self, t: Iteration) -> Result<U, ScheduleError> {
        self.inner.value_at(t).map(&self.transform)
    }
}
