use std::f64::consts::{FRAC_PI_2, PI};

use log::debug;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::util::{constant, count, to_iteration, to_period};

use super::{check_iteration, Iteration, Schedule};

/// Normalized shape of a periodic schedule. Every waveform produces values in
/// `[0, 1]` and starts its first period at the phase given in its description.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    /// Piecewise-linear ramp `0 -> 1 -> 0` over each period.
    Triangle,
    /// Rectified sine `|sin(pi * (t-1) / period)|`, also `0 -> 1 -> 0` over each period.
    Sine,
    /// Cosine annealing `1 -> 0` over a period. With `restart` the phase wraps
    /// back to the peak every `period` iterations, otherwise the value stays at
    /// the trough once the first period is over.
    Cosine { restart: bool },
}

impl Waveform {
    /// Samples the waveform at zero-based phase `x = t - 1`.
    fn sample<V: Float>(self, x: Iteration, period: Iteration) -> V {
        let p = count::<V>(period);
        let w = match self {
            // Both shapes repeat every `period`, so reduce the phase first to keep
            // the trigonometric argument small.
            Waveform::Triangle => {
                let theta = constant::<V>(PI) * count(x.rem_euclid(period)) / p;
                theta.sin().asin().abs() / constant(FRAC_PI_2)
            }
            Waveform::Sine => {
                let theta = constant::<V>(PI) * count(x.rem_euclid(period)) / p;
                theta.sin().abs()
            }
            Waveform::Cosine { restart } => {
                let phase = if restart { x.rem_euclid(period) } else { x.min(period) };
                let theta = constant::<V>(PI) * count(phase) / p;
                (V::one() + theta.cos()) / constant(2.0)
            }
        };
        w.max(V::zero()).min(V::one())
    }
}

/// Amplitude envelope applied to the waveform before it is mapped into the range.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum Envelope<V> {
    /// Full amplitude on every period.
    Constant,
    /// Amplitude halves once per completed period.
    Decay2,
    /// Amplitude scaled by `decay_rate^(t-1)`.
    Exp(V),
}

impl<V: Float> Envelope<V> {
    fn factor(&self, x: Iteration, period: Iteration) -> V {
        match self {
            Envelope::Constant => V::one(),
            Envelope::Decay2 => constant::<V>(0.5).powf(count(x.div_euclid(period))),
            Envelope::Exp(decay_rate) => decay_rate.powf(count(x)),
        }
    }
}

/// A periodic schedule oscillating between two range endpoints.
///
/// The endpoints may be given in either order; they are normalized to
/// `low = min(lambda0, lambda1)` and `amplitude = |lambda0 - lambda1|`, and the
/// value at iteration `t` is `amplitude * w(t) * envelope(t) + low`.
///
/// The nine classic shapes (`triangle`, `sine`, `cos_anneal`, each plain, with
/// per-period halving and with exponential amplitude decay) are constructors of
/// this one type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PeriodicSchedule<V> {
    low: V,
    amplitude: V,
    period: usize,
    waveform: Waveform,
    envelope: Envelope<V>,
}

impl<V: Float> PeriodicSchedule<V> {
    pub fn new(
        lambda0: V, lambda1: V, period: usize, waveform: Waveform, envelope: Envelope<V>,
    ) -> Result<Self, ScheduleError> {
        if period == 0 {
            return Err(ScheduleError::ConfigError(format!(
                "Period for {:?} must be greater than 0, but was {}",
                waveform, period
            )));
        }
        to_iteration(period, "Period")?;
        Ok(Self {
            low: lambda0.min(lambda1),
            amplitude: (lambda0 - lambda1).abs(),
            period,
            waveform,
            envelope,
        })
    }

    pub fn triangle(lambda0: V, lambda1: V, period: usize) -> Result<Self, ScheduleError> {
        Self::new(lambda0, lambda1, period, Waveform::Triangle, Envelope::Constant)
    }

    pub fn triangle_decay2(lambda0: V, lambda1: V, period: usize) -> Result<Self, ScheduleError> {
        Self::new(lambda0, lambda1, period, Waveform::Triangle, Envelope::Decay2)
    }

    pub fn triangle_exp(lambda0: V, lambda1: V, period: usize, decay_rate: V) -> Result<Self, ScheduleError> {
        Self::new(lambda0, lambda1, period, Waveform::Triangle, Envelope::Exp(decay_rate))
    }

    pub fn sine(lambda0: V, lambda1: V, period: usize) -> Result<Self, ScheduleError> {
        Self::new(lambda0, lambda1, period, Waveform::Sine, Envelope::Constant)
    }

    pub fn sine_decay2(lambda0: V, lambda1: V, period: usize) -> Result<Self, ScheduleError> {
        Self::new(lambda0, lambda1, period, Waveform::Sine, Envelope::Decay2)
    }

    pub fn sine_exp(lambda0: V, lambda1: V, period: usize, decay_rate: V) -> Result<Self, ScheduleError> {
        Self::new(lambda0, lambda1, period, Waveform::Sine, Envelope::Exp(decay_rate))
    }

    /// Cosine annealing with warm restarts every `period` iterations.
    pub fn cos_anneal(lambda0: V, lambda1: V, period: usize) -> Result<Self, ScheduleError> {
        Self::new(lambda0, lambda1, period, Waveform::Cosine { restart: true }, Envelope::Constant)
    }

    pub fn cos_anneal_decay2(lambda0: V, lambda1: V, period: usize) -> Result<Self, ScheduleError> {
        Self::new(lambda0, lambda1, period, Waveform::Cosine { restart: true }, Envelope::Decay2)
    }

    pub fn cos_anneal_exp(lambda0: V, lambda1: V, period: usize, decay_rate: V) -> Result<Self, ScheduleError> {
        Self::new(lambda0, lambda1, period, Waveform::Cosine { restart: true }, Envelope::Exp(decay_rate))
    }

    #[deprecated(note = "use `PeriodicSchedule::cos_anneal` instead")]
    pub fn cos(lambda0: V, lambda1: V, period: usize) -> Result<Self, ScheduleError> {
        Self::cos_anneal(lambda0, lambda1, period)
    }

    /// Lower end of the output range.
    pub fn low(&self) -> V {
        self.low
    }

    pub fn amplitude(&self) -> V {
        self.amplitude
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn envelope(&self) -> Envelope<V> {
        self.envelope
    }
}

impl<V: Float> Schedule for PeriodicSchedule<V> {
    type Value = V;

    fn value_at(&self, t: Iteration) -> Result<V, ScheduleError> {
        check_iteration(t)?;
        let period = to_period(self.period, "Period")?;
        let x = t - 1;
        let shape = self.waveform.sample::<V>(x, period) * self.envelope.factor(x, period);
        Ok(self.amplitude * shape + self.low)
    }
}

/// Builder for PeriodicSchedule with named parameters.
///
/// Start from one of the waveform families and refine:
/// ```ignore
/// let schedule = Periodic::cos_anneal().lambda0(0.1).lambda1(0.8).period(10).decay2().build()?;
/// ```
/// Default values:
/// - `lambda0`: 0.0
/// - `lambda1`: 1.0
/// - `period`: 10
/// - `restart`: true (cosine annealing only)
/// - envelope: constant amplitude
pub struct Periodic<V> {
    lambda0: V,
    lambda1: V,
    period: usize,
    waveform: Waveform,
    envelope: Envelope<V>,
}

impl<V: Float> Periodic<V> {
    fn with_waveform(waveform: Waveform) -> Self {
        Self {
            lambda0: V::zero(),
            lambda1: V::one(),
            period: 10,
            waveform,
            envelope: Envelope::Constant,
        }
    }

    pub fn triangle() -> Self {
        Self::with_waveform(Waveform::Triangle)
    }

    pub fn sine() -> Self {
        Self::with_waveform(Waveform::Sine)
    }

    pub fn cos_anneal() -> Self {
        Self::with_waveform(Waveform::Cosine { restart: true })
    }

    /// Sets the first range endpoint.
    pub fn lambda0(mut self, lambda0: V) -> Self {
        self.lambda0 = lambda0;
        self
    }

    /// Sets the second range endpoint.
    pub fn lambda1(mut self, lambda1: V) -> Self {
        self.lambda1 = lambda1;
        self
    }

    /// Sets the cycle length in iterations.
    pub fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Enables or disables warm restarts. Only meaningful for cosine annealing;
    /// the other waveforms repeat every period regardless.
    pub fn restart(mut self, restart: bool) -> Self {
        if let Waveform::Cosine { .. } = self.waveform {
            self.waveform = Waveform::Cosine { restart };
        }
        self
    }

    /// Halves the amplitude once per completed period.
    pub fn decay2(mut self) -> Self {
        self.envelope = Envelope::Decay2;
        self
    }

    /// Scales the amplitude by `decay_rate^(t-1)`.
    pub fn exp(mut self, decay_rate: V) -> Self {
        self.envelope = Envelope::Exp(decay_rate);
        self
    }

    pub fn build(self) -> Result<PeriodicSchedule<V>, ScheduleError> {
        let schedule = PeriodicSchedule::new(self.lambda0, self.lambda1, self.period, self.waveform, self.envelope)?;
        debug!(
            "Built Periodic schedule: waveform:{:?}, period:{}, low:{}, amplitude:{}",
            schedule.waveform,
            schedule.period,
            schedule.low.to_f64().unwrap_or(f64::NAN),
            schedule.amplitude.to_f64().unwrap_or(f64::NAN)
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    fn all_variants(lambda0: f64, lambda1: f64, period: usize, decay_rate: f64) -> Vec<PeriodicSchedule<f64>> {
        vec![
            PeriodicSchedule::triangle(lambda0, lambda1, period).unwrap(),
            PeriodicSchedule::triangle_decay2(lambda0, lambda1, period).unwrap(),
            PeriodicSchedule::triangle_exp(lambda0, lambda1, period, decay_rate).unwrap(),
            PeriodicSchedule::sine(lambda0, lambda1, period).unwrap(),
            PeriodicSchedule::sine_decay2(lambda0, lambda1, period).unwrap(),
            PeriodicSchedule::sine_exp(lambda0, lambda1, period, decay_rate).unwrap(),
            PeriodicSchedule::cos_anneal(lambda0, lambda1, period).unwrap(),
            PeriodicSchedule::cos_anneal_decay2(lambda0, lambda1, period).unwrap(),
            PeriodicSchedule::cos_anneal_exp(lambda0, lambda1, period, decay_rate).unwrap(),
            Periodic::cos_anneal().lambda0(lambda0).lambda1(lambda1).period(period).restart(false).build().unwrap(),
        ]
    }

    #[test]
    fn test_endpoints_are_normalized() {
        let forward = PeriodicSchedule::triangle(0.1_f64, 0.8, 10).unwrap();
        let backward = PeriodicSchedule::triangle(0.8_f64, 0.1, 10).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.low(), 0.1);
        assert_relative_eq!(forward.amplitude(), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_trough_and_peak() {
        let scheduler = PeriodicSchedule::triangle(0.0_f64, 2.0, 10).unwrap();
        assert_eq!(scheduler.value_at(1).unwrap(), 0.0);
        assert_relative_eq!(scheduler.value_at(6).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(scheduler.value_at(3).unwrap(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(scheduler.value_at(9).unwrap(), 0.8, epsilon = 1e-12);
        assert_eq!(scheduler.value_at(11).unwrap(), 0.0);
    }

    #[test]
    fn test_sine_trough_and_peak() {
        let scheduler = PeriodicSchedule::sine(1.0_f64, 3.0, 8).unwrap();
        assert_eq!(scheduler.value_at(1).unwrap(), 1.0);
        assert_relative_eq!(scheduler.value_at(5).unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(scheduler.value_at(3).unwrap(), 1.0 + 2.0 * (PI / 4.0).sin(), epsilon = 1e-12);
        assert_eq!(scheduler.value_at(9).unwrap(), 1.0);
    }

    #[test]
    fn test_cos_anneal_restart_recurs_to_peak() {
        let scheduler = PeriodicSchedule::cos_anneal(0.1_f64, 0.8, 10).unwrap();
        let peak = scheduler.value_at(1).unwrap();
        assert_relative_eq!(peak, 0.8, epsilon = 1e-12);
        assert_eq!(scheduler.value_at(11).unwrap(), peak);
        assert_eq!(scheduler.value_at(21).unwrap(), peak);
        assert_relative_eq!(scheduler.value_at(6).unwrap(), 0.45, epsilon = 1e-12);
    }

    #[test]
    fn test_cos_anneal_without_restart_never_recurs() {
        let scheduler = Periodic::cos_anneal().lambda0(0.1_f64).lambda1(0.8).period(10).restart(false).build().unwrap();
        let values: Vec<f64> = scheduler.iter().take(40).collect::<Result<_, _>>().unwrap();

        assert!(values[..11].windows(2).all(|w| w[1] < w[0]));
        assert_relative_eq!(values[10], 0.1, epsilon = 1e-12);
        assert!(values[11..].iter().all(|&v| v == values[10]));
        assert!(values[1..].iter().all(|&v| v < values[0]));
    }

    #[test]
    fn test_decay2_halves_each_period() {
        let period = 6;
        let scheduler = PeriodicSchedule::cos_anneal_decay2(0.2_f64, 1.0, period).unwrap();
        let low = scheduler.low();
        for k in 0..5_i64 {
            let start = scheduler.value_at(1 + k * period as i64).unwrap();
            let next = scheduler.value_at(1 + (k + 1) * period as i64).unwrap();
            assert_relative_eq!(next - low, (start - low) / 2.0, epsilon = 1e-12);
        }

        let triangle = PeriodicSchedule::triangle_decay2(0.0_f64, 1.0, 4).unwrap();
        assert_relative_eq!(triangle.value_at(3).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(triangle.value_at(7).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(triangle.value_at(11).unwrap(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_exp_envelope() {
        let scheduler = Periodic::sine().lambda0(0.0_f64).lambda1(1.0).period(2).exp(0.5).build().unwrap();
        assert_relative_eq!(scheduler.value_at(2).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(scheduler.value_at(4).unwrap(), 0.125, epsilon = 1e-12);
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_cos_alias() {
        let legacy = PeriodicSchedule::cos(0.1_f32, 0.8, 10).unwrap();
        let current = PeriodicSchedule::cos_anneal(0.1_f32, 0.8, 10).unwrap();
        assert_eq!(legacy, current);
    }

    #[test]
    fn test_restart_ignored_for_other_waveforms() {
        let scheduler = Periodic::<f64>::triangle().restart(false).build().unwrap();
        assert_eq!(scheduler.waveform(), Waveform::Triangle);
    }

    #[test]
    fn test_invalid_period() {
        let scheduler = PeriodicSchedule::sine(0.0_f64, 1.0, 0);
        assert_eq!(
            scheduler.unwrap_err().to_string(),
            "Configuration error: Period for Sine must be greater than 0, but was 0"
        );
        assert!(Periodic::<f32>::cos_anneal().period(0).build().is_err());
    }

    #[test]
    fn test_rejects_non_positive_iteration() {
        let scheduler = PeriodicSchedule::triangle(0.0_f64, 1.0, 4).unwrap();
        assert!(matches!(scheduler.value_at(0), Err(ScheduleError::DomainError(_))));
    }

    #[test]
    fn test_configuration_serializes() {
        let scheduler = PeriodicSchedule::cos_anneal_exp(0.1_f64, 0.8, 10, 0.99).unwrap();
        let json = serde_json::to_string(&scheduler).unwrap();
        let restored: PeriodicSchedule<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scheduler);
        assert_eq!(restored.value_at(17).unwrap(), scheduler.value_at(17).unwrap());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_range_law(
            lambda0 in -10.0_f64..10.0,
            lambda1 in -10.0_f64..10.0,
            period in 1_usize..50,
            decay_rate in 0.5_f64..1.0,
            t in 1_i64..10_000
        ) {
            for scheduler in all_variants(lambda0, lambda1, period, decay_rate) {
                let value = scheduler.value_at(t).unwrap();
                prop_assert!(value >= scheduler.low());
                prop_assert!(value <= scheduler.low() + scheduler.amplitude());
            }
        }

        #[test]
        fn test_purity(
            lambda0 in -10.0_f64..10.0,
            lambda1 in -10.0_f64..10.0,
            period in 1_usize..50,
            t in 1_i64..1_000_000
        ) {
            for scheduler in all_variants(lambda0, lambda1, period, 0.9) {
                prop_assert_eq!(scheduler.value_at(t).unwrap().to_bits(), scheduler.value_at(t).unwrap().to_bits());
            }
        }

        #[test]
        fn test_periodicity(
            lambda0 in -10.0_f64..10.0,
            lambda1 in -10.0_f64..10.0,
            period in 1_usize..50,
            t in 1_i64..100_000
        ) {
            let p = period as i64;
            let triangle = PeriodicSchedule::triangle(lambda0, lambda1, period).unwrap();
            let sine = PeriodicSchedule::sine(lambda0, lambda1, period).unwrap();
            let cosine = PeriodicSchedule::cos_anneal(lambda0, lambda1, period).unwrap();
            prop_assert_eq!(triangle.value_at(t).unwrap(), triangle.value_at(t + p).unwrap());
            prop_assert_eq!(sine.value_at(t).unwrap(), sine.value_at(t + p).unwrap());
            prop_assert_eq!(cosine.value_at(t).unwrap(), cosine.value_at(t + p).unwrap());
        }
    }
}
