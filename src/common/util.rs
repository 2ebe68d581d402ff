use num_traits::Float;

use super::error::ScheduleError;

/// Converts an `f64` constant into the schedule's value type.
/// Every `Float` implementor can represent an `f64` (possibly rounded), so the
/// NaN fallback is never hit for the primitive float types.
pub(crate) fn constant<V: Float>(x: f64) -> V {
    V::from(x).unwrap_or_else(V::nan)
}

/// Converts an integer count (iterations, block indices) into the value type.
pub(crate) fn count<V: Float>(n: i64) -> V {
    V::from(n).unwrap_or_else(V::nan)
}

/// Converts a configured period or step size into the iteration index type.
pub(crate) fn to_iteration(n: usize, what: &str) -> Result<i64, ScheduleError> {
    i64::try_from(n).map_err(|_| ScheduleError::ConfigError(format!("{} is too large: {}", what, n)))
}

/// Like [`to_iteration`], but also rejects zero. Used at evaluation time so that
/// configurations restored through serde cannot divide by zero.
pub(crate) fn to_period(n: usize, what: &str) -> Result<i64, ScheduleError> {
    if n == 0 {
        return Err(ScheduleError::ConfigError(format!("{} must be greater than 0, but was 0", what)));
    }
    to_iteration(n, what)
}
