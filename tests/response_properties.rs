use std::f64::consts::PI;

use approx::assert_relative_eq;
use rlc_tank::prelude::*;

fn unit_tank(xi: f64) -> StepResponse {
    let params = CircuitParameters::with_damping_ratio(1.0, 1.0, xi, 1.0).expect("valid circuit");
    StepResponse::new(&params)
}

#[test]
fn underdamped_starts_at_rest_and_changes_sign() {
    for xi in [0.1, 0.4, 0.8, 0.95] {
        let response = unit_tank(xi);
        assert_eq!(response.damping(), Damping::Underdamped);
        assert_eq!(response.current(0.0), 0.0);

        let wd = response.damped_frequency().expect("underdamped");
        let first_peak = (wd / (xi * response.natural_frequency())).atan() / wd;
        let times = linspace(first_peak, first_peak + 2.0 * PI / wd, 2000);
        let currents = response.sample(&times);
        assert!(currents[0] > 0.0);
        assert!(
            currents.iter().any(|&i| i < 0.0),
            "no sign change for ξ = {xi}"
        );
    }
}

#[test]
fn regimes_agree_across_critical_boundary() {
    let below = unit_tank(0.999);
    let critical = unit_tank(1.0);
    let above = unit_tank(1.001);
    assert_eq!(below.damping(), Damping::Underdamped);
    assert_eq!(critical.damping(), Damping::CriticallyDamped);
    assert_eq!(above.damping(), Damping::Overdamped);

    for t in [0.25, 0.5, 1.0] {
        let reference = critical.current(t);
        assert_relative_eq!(below.current(t), reference, max_relative = 1e-3);
        assert_relative_eq!(above.current(t), reference, max_relative = 1e-3);
    }
}

#[test]
fn element_voltages_sum_to_source() {
    let params = CircuitParameters::new(2.0, 3.0, 1.0, 2.0).expect("valid circuit");
    let voltages = ComponentVoltages::new(&params);
    for t in linspace(0.0, 50.0, 41) {
        let total = voltages.resistor(t) + voltages.inductor(t) + voltages.capacitor(t);
        assert_relative_eq!(total, 2.0, epsilon = 1e-12);
    }
}

#[test]
fn sweep_peak_lands_next_to_analytic_resonance() {
    let params = CircuitParameters::new(1.0, 0.1, 10.0e-6, 1.0).expect("valid circuit");
    let grid = linspace_exclusive(200.0, 0.0, 399);
    let step = 200.0 / 399.0;
    let sweep = frequency_sweep(&params, &grid).expect("non-empty grid");

    assert_relative_eq!(params.resonant_frequency_hz(), 159.15, epsilon = 5e-3);
    assert!((sweep.resonant_frequency() - params.resonant_frequency_hz()).abs() <= step);
    assert_eq!(sweep.peak_amplitude(), sweep.amplitudes()[sweep.peak_index()]);
}

#[test]
fn overdamped_current_decays_monotonically() {
    let response = unit_tank(3.0);
    assert_eq!(response.damping(), Damping::Overdamped);
    let magnitudes: Vec<f64> = response
        .sample(&linspace(10.0, 100.0, 901))
        .into_iter()
        .map(f64::abs)
        .collect();
    assert!(magnitudes.windows(2).all(|w| w[1] < w[0]));
    assert!(*magnitudes.last().unwrap() < 1e-6);
}

#[test]
fn amplitude_is_exact_when_reactances_cancel() {
    let params = CircuitParameters::new(1.0, 1.0, 1.0, 1.0).expect("valid circuit");
    assert_relative_eq!(
        series_amplitude(&params, 1.0 / (2.0 * PI)),
        1000.0,
        max_relative = 1e-12
    );
}

#[test]
fn invalid_circuits_fail_fast() {
    assert!(matches!(
        step_response(1.0, 0.0, 1.0, 1.0),
        Err(RlcError::InvalidParameter { .. })
    ));
    assert!(matches!(
        CircuitParameters::new(1.0, 1.0, 0.0, 1.0),
        Err(RlcError::InvalidParameter { .. })
    ));
    let params = CircuitParameters::new(1.0, 1.0, 1.0, 1.0).expect("valid circuit");
    assert!(matches!(
        frequency_sweep(&params, &[]),
        Err(RlcError::DegenerateSweep(_))
    ));
}
