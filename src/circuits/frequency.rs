//! Steady-state current of a series RLC loop driven by a sinusoid.

use tracing::{debug, info_span};

use crate::constants::{angular_frequency, MILLI_PER_UNIT};
use crate::errors::{Result, RlcError};
use crate::math::{argmax_first, finite_bounds, CScalar, Scalar};

use super::component::Component;
use super::parameters::CircuitParameters;

/// Series impedance `R + j(ωL − 1/ωC)` at linear frequency `frequency_hz`.
#[must_use]
pub fn series_impedance(params: &CircuitParameters, frequency_hz: Scalar) -> CScalar {
    let omega = angular_frequency(frequency_hz);
    params.resistor().impedance(omega)
        + params.inductor().impedance(omega)
        + params.capacitor().impedance(omega)
}

/// Current amplitude in milliamps, `1000·V/√(R² + (Xl − Xc)²)`.
///
/// At 0 Hz the capacitive reactance is infinite and the amplitude is 0 mA.
#[must_use]
pub fn series_amplitude(params: &CircuitParameters, frequency_hz: Scalar) -> Scalar {
    let z = series_impedance(params, frequency_hz);
    MILLI_PER_UNIT * params.source_voltage() / z.re.hypot(z.im)
}

/// A single evaluated point of a frequency sweep.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySample {
    /// Driving frequency in hertz.
    pub frequency_hz: Scalar,
    /// Current amplitude in milliamps.
    pub amplitude_ma: Scalar,
    /// Phase of the current relative to the source, in degrees.
    pub phase_deg: Scalar,
}

/// Current amplitude over an ordered set of driving frequencies.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySweep {
    samples: Vec<FrequencySample>,
    peak_index: usize,
}

/// Evaluates [`series_amplitude`] at each frequency, in the order given.
///
/// The peak is found by grid search (first maximum on ties). An empty
/// `frequencies` slice fails with [`RlcError::DegenerateSweep`].
pub fn frequency_sweep(
    params: &CircuitParameters,
    frequencies: &[Scalar],
) -> Result<FrequencySweep> {
    let _span = info_span!("frequency_sweep", points = frequencies.len()).entered();

    let samples: Vec<FrequencySample> = frequencies
        .iter()
        .map(|&frequency_hz| {
            let z = series_impedance(params, frequency_hz);
            FrequencySample {
                frequency_hz,
                amplitude_ma: MILLI_PER_UNIT * params.source_voltage() / z.re.hypot(z.im),
                phase_deg: -z.arg().to_degrees(),
            }
        })
        .collect();

    let amplitudes: Vec<Scalar> = samples.iter().map(|s| s.amplitude_ma).collect();
    let peak_index = argmax_first(&amplitudes).ok_or_else(|| {
        RlcError::DegenerateSweep(format!(
            "no finite amplitude among {} frequency samples",
            frequencies.len()
        ))
    })?;

    debug!(
        peak_hz = samples[peak_index].frequency_hz,
        peak_ma = samples[peak_index].amplitude_ma,
        "located sweep peak"
    );

    Ok(FrequencySweep {
        samples,
        peak_index,
    })
}

impl FrequencySweep {
    /// Samples in evaluation order.
    #[must_use]
    pub fn samples(&self) -> &[FrequencySample] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: empty sweeps are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the first maximum amplitude.
    #[must_use]
    pub fn peak_index(&self) -> usize {
        self.peak_index
    }

    /// Sample with the largest amplitude.
    #[must_use]
    pub fn peak(&self) -> &FrequencySample {
        &self.samples[self.peak_index]
    }

    /// Grid-search estimate of the resonant frequency (Hz).
    ///
    /// Differs slightly from the analytic
    /// [`CircuitParameters::resonant_frequency_hz`] depending on the grid.
    #[must_use]
    pub fn resonant_frequency(&self) -> Scalar {
        self.peak().frequency_hz
    }

    /// Largest amplitude (mA).
    #[must_use]
    pub fn peak_amplitude(&self) -> Scalar {
        self.peak().amplitude_ma
    }

    /// Amplitudes in evaluation order.
    #[must_use]
    pub fn amplitudes(&self) -> Vec<Scalar> {
        self.samples.iter().map(|s| s.amplitude_ma).collect()
    }

    /// `(frequency, amplitude)` pairs sorted by ascending frequency.
    #[must_use]
    pub fn sorted_points(&self) -> Vec<(Scalar, Scalar)> {
        let mut points: Vec<(Scalar, Scalar)> = self
            .samples
            .iter()
            .map(|s| (s.frequency_hz, s.amplitude_ma))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    }

    /// Minimum and maximum sampled frequency.
    #[must_use]
    pub fn frequency_bounds(&self) -> (Scalar, Scalar) {
        finite_bounds(self.samples.iter().map(|s| s.frequency_hz))
            .unwrap_or((self.resonant_frequency(), self.resonant_frequency()))
    }

    /// Minimum and maximum finite amplitude.
    #[must_use]
    pub fn amplitude_bounds(&self) -> (Scalar, Scalar) {
        finite_bounds(self.samples.iter().map(|s| s.amplitude_ma))
            .unwrap_or((self.peak_amplitude(), self.peak_amplitude()))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::sweep::linspace_exclusive;

    fn series_tank() -> CircuitParameters {
        CircuitParameters::new(1.0, 0.1, 10.0e-6, 1.0).unwrap()
    }

    #[test]
    fn reactances_cancel_at_natural_frequency() {
        let p = CircuitParameters::new(1.0, 1.0, 1.0, 1.0).unwrap();
        assert_relative_eq!(series_amplitude(&p, 1.0 / (2.0 * PI)), 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn amplitude_matches_reactance_formula() {
        let p = series_tank();
        let f = 50.0;
        let xl = 2.0 * PI * f * 0.1;
        let xc = 1.0 / (2.0 * PI * f * 10.0e-6);
        let expected = 1000.0 / (1.0 + (xl - xc).powi(2)).sqrt();
        assert_relative_eq!(series_amplitude(&p, f), expected, max_relative = 1e-12);
    }

    #[test]
    fn dc_drive_gives_no_current() {
        assert_eq!(series_amplitude(&series_tank(), 0.0), 0.0);
    }

    #[test]
    fn empty_sweep_is_degenerate() {
        let err = frequency_sweep(&series_tank(), &[]).unwrap_err();
        assert!(matches!(err, RlcError::DegenerateSweep(_)));
    }

    #[test]
    fn grid_peak_differs_from_analytic_resonance() {
        let p = series_tank();
        let grid = linspace_exclusive(200.0, 0.0, 399);
        let sweep = frequency_sweep(&p, &grid).unwrap();
        let analytic = p.resonant_frequency_hz();
        let step = 200.0 / 399.0;
        assert!((sweep.resonant_frequency() - analytic).abs() <= step);
        assert!(sweep.resonant_frequency() != analytic);
        assert_eq!(sweep.len(), 399);
    }

    #[test]
    fn series_impedance_sums_element_reactances() {
        let p = series_tank();
        let f = 120.0;
        let omega = 2.0 * PI * f;
        let z = series_impedance(&p, f);
        assert_relative_eq!(z.re, 1.0);
        assert_relative_eq!(z.im, omega * 0.1 - 1.0 / (omega * 10.0e-6), max_relative = 1e-12);
    }

    #[test]
    fn ties_resolve_to_first_sample() {
        let p = series_tank();
        let f0 = p.resonant_frequency_hz();
        let sweep = frequency_sweep(&p, &[f0 + 10.0, 50.0, f0 + 10.0]).unwrap();
        let amps = sweep.amplitudes();
        assert_eq!(amps[0], amps[2]);
        assert!(amps[0] > amps[1]);
        assert_eq!(sweep.peak_index(), 0);
    }

    #[test]
    fn sorted_points_ascend() {
        let sweep = frequency_sweep(&series_tank(), &[150.0, 10.0, 90.0]).unwrap();
        let xs: Vec<f64> = sweep.sorted_points().iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![10.0, 90.0, 150.0]);
        assert_eq!(sweep.frequency_bounds(), (10.0, 150.0));
    }

    #[test]
    fn current_leads_below_resonance() {
        let sweep = frequency_sweep(&series_tank(), &[20.0, 1000.0]).unwrap();
        assert!(sweep.samples()[0].phase_deg > 0.0);
        assert!(sweep.samples()[1].phase_deg < 0.0);
    }
}
