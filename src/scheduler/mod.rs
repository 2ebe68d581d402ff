pub mod composed;
pub mod constant;
pub mod exponential;
pub mod interpolator;
pub mod inverse;
pub mod iter;
pub mod looped;
pub mod periodic;
pub mod polynomial;
pub mod sequence;
pub mod shifted;
pub mod step;
pub mod tracker;

pub use composed::ComposedSchedule;
pub use constant::{Constant, ConstantSchedule};
pub use exponential::{Exp, ExpSchedule};
pub use interpolator::Interpolator;
pub use inverse::{Inv, InvSchedule};
pub use iter::ScheduleIter;
pub use looped::Loop;
pub use periodic::{Envelope, Periodic, PeriodicSchedule, Waveform};
pub use polynomial::{Poly, PolySchedule};
pub use sequence::Sequence;
pub use shifted::Shifted;
pub use step::{MultiStep, MultiStepSchedule, Step, StepSchedule};
pub use tracker::ScheduleTracker;

use crate::error::ScheduleError;

/// 1-based iteration index. Signed so that time-shifted schedules can express
/// (and reject) indices before the start of training.
pub type Iteration = i64;

/// A schedule maps an iteration index to the value to apply at that iteration.
///
/// Implementations are pure: the same index always yields the same value, and
/// no call changes the schedule. Callers may therefore evaluate indices in any
/// order, repeatedly, and from several threads at once.
pub trait Schedule {
    type Value;

    /// Returns the value for iteration `t` (1-based).
    fn value_at(&self, t: Iteration) -> Result<Self::Value, ScheduleError>;

    /// Lazy view of the schedule as the sequence `value_at(1), value_at(2), ...`.
    /// Calling it again restarts from `t = 1`.
    fn iter(&self) -> ScheduleIter<'_, Self>
    where
        Self: Sized,
    {
        ScheduleIter::new(self)
    }
}

/// Type-erased schedule, used where children of different concrete types are
/// combined (e.g. the segments of a [`Sequence`]).
pub type BoxedSchedule<V> = Box<dyn Schedule<Value = V> + Send + Sync>;

impl<S> Schedule for &S
where
    S: Schedule + ?Sized,
{
    type Value = S::Value;

    fn value_at(&self, t: Iteration) -> Result<Self::Value, ScheduleError> {
        (**self).value_at(t)
    }
}

impl<S> Schedule for Box<S>
where
    S: Schedule + ?Sized,
{
    type Value = S::Value;

    fn value_at(&self, t: Iteration) -> Result<Self::Value, ScheduleError> {
        (**self).value_at(t)
    }
}

/// Combinator shorthands available on every schedule.
pub trait ScheduleExt: Schedule + Sized {
    /// Delays the schedule by `offset` iterations. See [`Shifted`].
    fn shifted(self, offset: Iteration) -> Shifted<Self> {
        Shifted::new(self, offset)
    }

    /// Replays iterations `1..=period` of the schedule forever. See [`Loop`].
    fn looped(self, period: usize) -> Result<Loop<Self>, ScheduleError> {
        Loop::new(self, period)
    }

    /// Post-processes every value with `f`. See [`ComposedSchedule`].
    fn map<F, U>(self, f: F) -> ComposedSchedule<Self, F>
    where
        F: Fn(Self::Value) -> U,
    {
        ComposedSchedule::new(self, f)
    }

    /// Erases the concrete type, e.g. to mix schedules in one [`Sequence`].
    fn boxed(self) -> BoxedSchedule<Self::Value>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<T> ScheduleExt for T where T: Schedule + Sized {}

/// Rejects indices outside the closed forms' domain `t >= 1`.
pub(crate) fn check_iteration(t: Iteration) -> Result<(), ScheduleError> {
    if t < 1 {
        return Err(ScheduleError::DomainError(format!(
            "Iteration index must be greater than or equal to 1, but was {}",
            t
        )));
    }
    Ok(())
}
