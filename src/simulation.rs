//! High-level orchestration: sweeps, transient families and the report.
//!
//! [`run`] reproduces the full experiment: the series resonance curve, the
//! family of step responses over several damping ratios, the voltage
//! decomposition of one underdamped circuit, and the two report sections.
//! Every path, grid and circuit comes from [`SimulationConfig`].

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::circuits::{
    frequency_sweep, CircuitParameters, ComponentVoltages, Damping, FrequencySweep, StepResponse,
    VoltageSample,
};
use crate::constants::MILLI_PER_UNIT;
use crate::errors::{Result, RlcError};
use crate::math::Scalar;
use crate::render::{Chart, Marker, Renderer, Series};
use crate::report::{Prefix, ReportEntry, ReportFormat, ReportWriter};
use crate::sweep::{linspace, linspace_exclusive, sweep_map};
use crate::units::{Farad, Henry, Hertz, Ohm, Volt};

/// Frequency grid for the resonance curve.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    /// First sampled frequency (Hz).
    pub start_hz: Scalar,
    /// Excluded end of the grid (Hz).
    pub stop_hz: Scalar,
    /// Number of samples.
    pub points: usize,
}

impl SweepConfig {
    /// Sample frequencies, from `start_hz` towards (but excluding) `stop_hz`.
    #[must_use]
    pub fn frequencies(&self) -> Vec<Scalar> {
        linspace_exclusive(self.start_hz, self.stop_hz, self.points)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_hz: 200.0,
            stop_hz: 0.0,
            points: 399,
        }
    }
}

/// Family of step responses sharing L, C and V, one per damping ratio.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TransientConfig {
    /// Inductance (H).
    pub inductance: Scalar,
    /// Capacitance (F).
    pub capacitance: Scalar,
    /// Step height (V).
    pub source_voltage: Scalar,
    /// Damping ratios to plot.
    pub damping_ratios: Vec<Scalar>,
    /// Time span (s) starting at 0.
    pub duration: Scalar,
    /// Number of time samples (end point included).
    pub points: usize,
    /// Fixed current axis (mA).
    pub current_range_ma: (Scalar, Scalar),
}

impl Default for TransientConfig {
    fn default() -> Self {
        Self {
            inductance: 1.0,
            capacitance: 1.0,
            source_voltage: 1.0,
            damping_ratios: vec![0.4, 0.6, 0.8, 1.0, 1.5, 2.0, 3.0],
            duration: 20.0,
            points: 500,
            current_range_ma: (-300.0, 600.0),
        }
    }
}

/// Circuit whose element voltages are plotted.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecompositionConfig {
    /// Circuit under test.
    pub parameters: CircuitParameters,
    /// Time span (s) starting at 0.
    pub duration: Scalar,
    /// Number of time samples (end point included).
    pub points: usize,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            parameters: CircuitParameters::from_trusted(2.0, 3.0, 1.0, 2.0),
            duration: 50.0,
            points: 500,
        }
    }
}

/// Output locations and every experiment parameter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Directory receiving images and the report.
    pub output_dir: PathBuf,
    /// Report file name inside `output_dir`.
    pub report_file: String,
    /// Report line format.
    pub report_format: ReportFormat,
    /// Prefix of every chart title.
    pub title_prefix: String,
    /// Series circuit for the resonance curve.
    pub series: CircuitParameters,
    /// Resonance curve grid.
    pub sweep: SweepConfig,
    /// Damping-ratio family.
    pub transient: TransientConfig,
    /// Element-voltage plot.
    pub decomposition: DecompositionConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            report_file: String::from("params.sty"),
            report_format: ReportFormat::Latex,
            title_prefix: String::from("Series RLC"),
            series: CircuitParameters::from_trusted(1.0, 100.0e-3, 10.0e-6, 1.0),
            sweep: SweepConfig::default(),
            transient: TransientConfig::default(),
            decomposition: DecompositionConfig::default(),
        }
    }
}

impl SimulationConfig {
    fn title(&self, subject: &str) -> String {
        if self.title_prefix.is_empty() {
            subject.to_owned()
        } else {
            format!("{}: {}", self.title_prefix, subject)
        }
    }
}

/// What a [`run`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    /// Analytic resonance ω₀/2π of the series circuit (Hz).
    pub analytic_resonance_hz: Scalar,
    /// Grid-search peak of the resonance curve (Hz).
    pub peak_frequency_hz: Scalar,
    /// Images written, in order.
    pub charts: Vec<PathBuf>,
    /// Report file.
    pub report: PathBuf,
}

/// Resonance curve chart with its peak marker.
#[must_use]
pub fn resonance_chart(title: impl Into<String>, sweep: &FrequencySweep) -> Chart {
    let (_, f_max) = sweep.frequency_bounds();
    let (a_min, a_max) = sweep.amplitude_bounds();
    let peak = sweep.peak();
    Chart::new(title, "Frequency (Hz)", "Current (mA)")
        .with_series(Series::new("", sweep.sorted_points(), 1).emphasized(true))
        .with_marker(Marker {
            x: peak.frequency_hz,
            y: peak.amplitude_ma,
            annotation: format!("Resonating frequency ≈ {:.2}", peak.frequency_hz),
        })
        .x_limits(0.0, f_max)
        .y_limits(a_min, a_max)
}

/// Step-response family over `config.damping_ratios`, current in mA.
pub fn transient_chart(title: impl Into<String>, config: &TransientConfig) -> Result<Chart> {
    let times = linspace(0.0, config.duration, config.points);
    let mut chart = Chart::new(title, "Time (s)", "Current I(t) (mA)");
    for (slot, &xi) in config.damping_ratios.iter().enumerate() {
        let params = CircuitParameters::with_damping_ratio(
            config.inductance,
            config.capacitance,
            xi,
            config.source_voltage,
        )?;
        let response = StepResponse::new(&params);
        let points = sweep_map(times.iter().copied(), |t| {
            (t, MILLI_PER_UNIT * response.current(t))
        });
        chart = chart.with_series(
            Series::new(format!("ξ = {xi}"), points, slot)
                .emphasized(response.damping() == Damping::CriticallyDamped),
        );
    }
    let (lo, hi) = config.current_range_ma;
    Ok(chart.x_limits(0.0, config.duration).y_limits(lo, hi))
}

/// Element-voltage chart and loop-current chart for one circuit.
#[must_use]
pub fn decomposition_charts(
    voltage_title: impl Into<String>,
    current_title: impl Into<String>,
    config: &DecompositionConfig,
) -> (Chart, Chart) {
    let times = linspace(0.0, config.duration, config.points);
    let samples = ComponentVoltages::new(&config.parameters).sample(&times);

    let pick = |f: fn(&VoltageSample) -> Scalar| -> Vec<(Scalar, Scalar)> {
        samples.iter().map(|s| (s.time, f(s))).collect()
    };

    let voltages = Chart::new(voltage_title, "Time (s)", "Voltage (V)")
        .with_series(Series::new("Voltage across resistor V_R", pick(|s| s.resistor), 0))
        .with_series(Series::new("Voltage across inductor V_L", pick(|s| s.inductor), 1))
        .with_series(Series::new("Voltage across capacitor V_C", pick(|s| s.capacitor), 2))
        .x_limits(0.0, config.duration)
        .auto_y_limits();

    let current = Chart::new(current_title, "Time (s)", "Current (mA)")
        .with_series(
            Series::new(
                "Current in the circuit I(t)",
                pick(|s| MILLI_PER_UNIT * s.current),
                3,
            )
            .emphasized(true),
        )
        .x_limits(0.0, config.duration)
        .auto_y_limits();

    (voltages, current)
}

fn series_report(params: &CircuitParameters, analytic: Scalar, peak: Scalar) -> Vec<ReportEntry> {
    vec![
        ReportEntry::new::<Volt>("serSource", params.source_voltage()),
        ReportEntry::new::<Ohm>("serRes", params.resistance()),
        ReportEntry::new::<Farad>("serCap", params.capacitance()).prefixed(Prefix::Micro),
        ReportEntry::new::<Henry>("serInd", params.inductance()).prefixed(Prefix::Milli),
        ReportEntry::new::<Hertz>("resonSer", analytic).precision(3),
        ReportEntry::new::<Hertz>("peakSer", peak).precision(3),
    ]
}

fn step_report(params: &CircuitParameters) -> Vec<ReportEntry> {
    vec![
        ReportEntry::new::<Volt>("Source", params.source_voltage()),
        ReportEntry::new::<Ohm>("Res", params.resistance()),
        ReportEntry::new::<Farad>("Capc", params.capacitance()),
        ReportEntry::new::<Henry>("Ind", params.inductance()),
    ]
}

/// Runs the whole experiment, drawing through `renderer`.
pub fn run(config: &SimulationConfig, renderer: &dyn Renderer) -> Result<SimulationSummary> {
    if config.sweep.points == 0 {
        return Err(RlcError::DegenerateSweep(
            "sweep must contain at least one frequency".into(),
        ));
    }
    fs::create_dir_all(&config.output_dir)?;
    let mut charts = Vec::new();
    let mut draw = |chart: &Chart, file: &str| -> Result<()> {
        let path = config.output_dir.join(file);
        renderer.render(chart, &path)?;
        charts.push(path);
        Ok(())
    };

    let sweep = frequency_sweep(&config.series, &config.sweep.frequencies())?;
    let analytic = config.series.resonant_frequency_hz();
    let peak = sweep.resonant_frequency();
    info!(analytic_hz = analytic, peak_hz = peak, "series resonance");
    draw(
        &resonance_chart(
            config.title("Variation of amplitude of current with source frequency"),
            &sweep,
        ),
        "SeriesVariation.png",
    )?;

    let report_path = config.output_dir.join(&config.report_file);
    let mut report = ReportWriter::new(&report_path, config.report_format);
    report.write_section(&series_report(&config.series, analytic, peak))?;

    draw(
        &transient_chart(
            config.title("Transient response of LC tank for unit voltage"),
            &config.transient,
        )?,
        "Transients.png",
    )?;

    let (voltages, current) = decomposition_charts(
        config.title("Evolution of voltage in components in step response"),
        config.title("Current in the circuit"),
        &config.decomposition,
    );
    draw(&voltages, "Voltage_Variation.png")?;
    draw(&current, "Current_Variation.png")?;

    report.write_section(&step_report(&config.decomposition.parameters))?;

    Ok(SimulationSummary {
        analytic_resonance_hz: analytic,
        peak_frequency_hz: peak,
        charts,
        report: report_path,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;

    use approx::assert_relative_eq;

    use super::*;
    use crate::math::finite_bounds;

    #[derive(Default)]
    struct RecordingRenderer {
        charts: RefCell<Vec<(PathBuf, Chart)>>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, chart: &Chart, path: &Path) -> Result<()> {
            self.charts
                .borrow_mut()
                .push((path.to_path_buf(), chart.clone()));
            Ok(())
        }
    }

    fn temp_config(name: &str) -> SimulationConfig {
        SimulationConfig {
            output_dir: std::env::temp_dir()
                .join(format!("rlc_tank_sim_{}_{}", std::process::id(), name)),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn run_produces_four_charts_and_two_report_sections() {
        let config = temp_config("full");
        let renderer = RecordingRenderer::default();
        let summary = run(&config, &renderer).unwrap();

        let names: Vec<String> = renderer
            .charts
            .borrow()
            .iter()
            .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "SeriesVariation.png",
                "Transients.png",
                "Voltage_Variation.png",
                "Current_Variation.png"
            ]
        );
        assert_eq!(summary.charts.len(), 4);

        let report = fs::read_to_string(&summary.report).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], r"\newcommand{\serSource}{$1.00 \ $V}");
        assert!(lines[4].starts_with(r"\newcommand{\resonSer}{$159.155 "));
        assert!(lines[9].starts_with(r"\newcommand{\Ind}{$3.00 "));

        assert_relative_eq!(summary.analytic_resonance_hz, 159.154_943, max_relative = 1e-8);
        assert!((summary.peak_frequency_hz - summary.analytic_resonance_hz).abs() < 200.0 / 399.0);

        fs::remove_dir_all(&config.output_dir).ok();
    }

    #[test]
    fn rerun_truncates_report() {
        let config = temp_config("rerun");
        let renderer = RecordingRenderer::default();
        run(&config, &renderer).unwrap();
        let summary = run(&config, &renderer).unwrap();
        let report = fs::read_to_string(&summary.report).unwrap();
        assert_eq!(report.lines().count(), 10);
        fs::remove_dir_all(&config.output_dir).ok();
    }

    #[test]
    fn empty_sweep_is_rejected_before_output() {
        let mut config = temp_config("empty");
        config.sweep.points = 0;
        let err = run(&config, &RecordingRenderer::default()).unwrap_err();
        assert!(matches!(err, RlcError::DegenerateSweep(_)));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn transient_family_emphasizes_critical_curve() {
        let chart = transient_chart("t", &TransientConfig::default()).unwrap();
        assert_eq!(chart.series.len(), 7);
        let emphasized: Vec<&str> = chart
            .series
            .iter()
            .filter(|s| s.emphasis)
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(emphasized, ["ξ = 1"]);
        assert_relative_eq!(chart.y_range.0, -330.0);
        assert_relative_eq!(chart.y_range.1, 660.0);
        assert_eq!(chart.series[0].points.len(), 500);
    }

    #[test]
    fn resonance_chart_is_sorted_and_marked() {
        let config = SimulationConfig::default();
        let sweep = frequency_sweep(&config.series, &config.sweep.frequencies()).unwrap();
        let chart = resonance_chart("r", &sweep);
        let xs: Vec<Scalar> = chart.series[0].points.iter().map(|p| p.0).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(chart.markers[0].x, sweep.resonant_frequency());
        assert_eq!(chart.x_range, (0.0, 200.0));
        let (_, hi) = finite_bounds(chart.series[0].points.iter().map(|p| p.1)).unwrap();
        assert_relative_eq!(chart.y_range.1, 1.1 * hi);
    }

    #[test]
    fn decomposition_voltages_sum_to_source() {
        let config = DecompositionConfig::default();
        let (voltages, current) = decomposition_charts("v", "i", &config);
        assert_eq!(voltages.series.len(), 3);
        assert_eq!(current.series.len(), 1);
        for k in [0, 137, 499] {
            let sum: Scalar = voltages.series.iter().map(|s| s.points[k].1).sum();
            assert_relative_eq!(sum, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn title_prefix_is_optional() {
        let mut config = SimulationConfig::default();
        assert_eq!(config.title("x"), "Series RLC: x");
        config.title_prefix.clear();
        assert_eq!(config.title("x"), "x");
    }
}
