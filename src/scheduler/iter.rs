use std::iter::FusedIterator;

use crate::error::ScheduleError;

use super::{Iteration, Schedule};

/// Lazy, unbounded sequence of a schedule's values for `t = 1, 2, 3, ...`.
///
/// Nothing is cached: every `next` evaluates the closed form again, so two
/// iterators over the same schedule always produce the same values. The last
/// index produced is `Iteration::MAX`.
pub struct ScheduleIter<'a, S: ?Sized> {
    schedule: &'a S,
    // None once Iteration::MAX has been produced
    t: Option<Iteration>,
}

impl<'a, S: Schedule + ?Sized> ScheduleIter<'a, S> {
    pub fn new(schedule: &'a S) -> Self {
        Self::starting_at(schedule, 1)
    }

    /// Starts the sequence at iteration `t`, e.g. to resume from a saved counter.
    pub fn starting_at(schedule: &'a S, t: Iteration) -> Self {
        Self { schedule, t: Some(t) }
    }

    /// Index that the next call to `next` will evaluate, or `None` when exhausted.
    pub fn iteration(&self) -> Option<Iteration> {
        self.t
    }
}

impl<S: ?Sized> Clone for ScheduleIter<'_, S> {
    fn clone(&self) -> Self {
        Self {
            schedule: self.schedule,
            t: self.t,
        }
    }
}

impl<S: Schedule + ?Sized> Iterator for ScheduleIter<'_, S> {
    type Item = Result<S::Value, ScheduleError>;

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.t?;
        self.t = t.checked_add(1);
        Some(self.schedule.value_at(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.t {
            Some(_) => (usize::MAX, None),
            None => (0, Some(0)),
        }
    }
}

impl<S: Schedule + ?Sized> FusedIterator for ScheduleIter<'_, S> {}
