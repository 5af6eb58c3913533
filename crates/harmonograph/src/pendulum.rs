//! Damped pendulum term - one oscillator of the harmonograph.
//!
//! Each term contributes `A*sin(f*t + p)*e^(-d*t)` to one axis of the
//! signal. The decay envelope pulls the trace toward the origin over
//! time, which is what gives harmonograph drawings their spiraling,
//! converging look.

use serde::{Deserialize, Serialize};

/// Fixed display scaling applied to every term. Amplitudes are authored
/// in small slider units; the screen wants pixels.
pub const SIGNAL_SCALE: f64 = 100.0;

/// One damped sinusoid term.
///
/// The pendulum trusts its inputs: parameter ranges are clamped at the
/// slider boundary (see [`Param::range`]), never re-validated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pendulum {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub damping: f64,
}

impl Pendulum {
    pub fn new(amplitude: f64, frequency: f64, phase: f64, damping: f64) -> Self {
        Self { amplitude, frequency, phase, damping }
    }

    /// Default x-axis term (3:2 frequency ratio against [`Pendulum::default_y`],
    /// quarter-turn phase lead).
    pub fn default_x() -> Self {
        Self::new(1.0, 3.0, std::f64::consts::FRAC_PI_2, 0.0)
    }

    /// Default y-axis term.
    pub fn default_y() -> Self {
        Self::new(1.0, 2.0, 0.0, 0.0)
    }

    /// Pendulum value at time `t`.
    ///
    /// Numerically stable for arbitrarily large `t`: the exponential
    /// drives the envelope toward zero, and the platform `sin` handles
    /// large-angle reduction. Double precision degrades gracefully past
    /// t ~ 1e7, far beyond any real-time run length.
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        self.amplitude
            * SIGNAL_SCALE
            * (t * self.frequency + self.phase).sin()
            * (-self.damping * t).exp()
    }

    /// Read one parameter by name.
    pub fn get(&self, param: Param) -> f64 {
        match param {
            Param::Amplitude => self.amplitude,
            Param::Frequency => self.frequency,
            Param::Phase => self.phase,
            Param::Damping => self.damping,
        }
    }

    /// Set one parameter, clamped to its configured slider range.
    pub fn set(&mut self, param: Param, value: f64) {
        let value = param.range().clamp(value);
        match param {
            Param::Amplitude => self.amplitude = value,
            Param::Frequency => self.frequency = value,
            Param::Phase => self.phase = value,
            Param::Damping => self.damping = value,
        }
    }
}

/// Which axis of the signal a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// The four adjustable pendulum parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Amplitude,
    Frequency,
    Phase,
    Damping,
}

impl Param {
    /// All parameters in slider order.
    pub fn all() -> &'static [Param] {
        &[Param::Amplitude, Param::Frequency, Param::Phase, Param::Damping]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Param::Amplitude => "amplitude",
            Param::Frequency => "frequency",
            Param::Phase => "phase",
            Param::Damping => "damping",
        }
    }

    /// Configured slider range for this parameter.
    pub fn range(&self) -> ParamRange {
        match self {
            Param::Amplitude => ParamRange { min: 0.1, max: 5.0, default: 1.0 },
            Param::Frequency => ParamRange { min: 1.0, max: 10.0, default: 2.0 },
            Param::Phase => ParamRange { min: 0.0, max: 2.0 * std::f64::consts::PI, default: 0.0 },
            Param::Damping => ParamRange { min: 0.0, max: 2.0, default: 0.0 },
        }
    }
}

/// Slider configuration for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ParamRange {
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Span of the range, used by hosts to size slider steps.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn evaluates_scaled_sine() {
        // A=1, f=3, p=pi/2, d=0 at t=0: 100*sin(pi/2) = 100
        let pend = Pendulum::new(1.0, 3.0, FRAC_PI_2, 0.0);
        assert!((pend.evaluate(0.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn zero_phase_starts_at_origin() {
        let pend = Pendulum::new(1.0, 2.0, 0.0, 0.0);
        assert_eq!(pend.evaluate(0.0), 0.0);
    }

    #[test]
    fn damping_shrinks_envelope() {
        // d=1, t=5: envelope is e^-5 ~ 0.0067 of the undamped value.
        let damped = Pendulum::new(1.0, 3.0, FRAC_PI_2, 1.0);
        let undamped = Pendulum::new(1.0, 3.0, FRAC_PI_2, 0.0);
        let ratio = damped.evaluate(5.0) / undamped.evaluate(5.0);
        assert!((ratio - (-5.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn undamped_term_does_not_decay() {
        let pend = Pendulum::new(2.0, 5.0, 0.3, 0.0);
        // Same argument modulo 2*pi gives the same value.
        let period = 2.0 * PI / pend.frequency;
        assert!((pend.evaluate(1.0) - pend.evaluate(1.0 + period)).abs() < 1e-9);
    }

    #[test]
    fn large_t_stays_finite() {
        let pend = Pendulum::new(5.0, 10.0, 0.0, 0.0);
        let v = pend.evaluate(1e7);
        assert!(v.is_finite());
        assert!(v.abs() <= 5.0 * SIGNAL_SCALE + 1e-6);
    }

    #[test]
    fn set_clamps_to_range() {
        let mut pend = Pendulum::default_x();
        pend.set(Param::Amplitude, 99.0);
        assert_eq!(pend.amplitude, 5.0);
        pend.set(Param::Amplitude, -1.0);
        assert_eq!(pend.amplitude, 0.1);
        pend.set(Param::Damping, 0.5);
        assert_eq!(pend.damping, 0.5);
    }

    #[test]
    fn defaults_match_slider_config() {
        let x = Pendulum::default_x();
        assert_eq!(x.amplitude, 1.0);
        assert_eq!(x.frequency, 3.0);
        assert_eq!(x.phase, FRAC_PI_2);
        assert_eq!(x.damping, 0.0);

        let y = Pendulum::default_y();
        assert_eq!(y.frequency, 2.0);
        assert_eq!(y.phase, 0.0);
    }
}
