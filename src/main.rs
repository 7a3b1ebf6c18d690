use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rlc_tank::circuits::CircuitParameters;
use rlc_tank::render::PlottersRenderer;
use rlc_tank::report::ReportFormat;
use rlc_tank::simulation::{self, SimulationConfig, SweepConfig};

/// Step and frequency response of a series RLC circuit
#[derive(Parser)]
#[command(name = "rlc-tank", version)]
struct Cli {
    /// Directory receiving charts and the report
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Report file name inside the output directory
    #[arg(long, default_value = "params.sty")]
    report_file: String,

    /// Report line format: latex or plain
    #[arg(long, default_value_t = ReportFormat::Latex)]
    report_format: ReportFormat,

    /// Series circuit resistance (Ω)
    #[arg(long, default_value_t = 1.0)]
    resistance: f64,

    /// Series circuit inductance (H)
    #[arg(long, default_value_t = 100.0e-3)]
    inductance: f64,

    /// Series circuit capacitance (F)
    #[arg(long, default_value_t = 10.0e-6)]
    capacitance: f64,

    /// Source amplitude (V)
    #[arg(long, default_value_t = 1.0)]
    voltage: f64,

    /// First swept frequency (Hz)
    #[arg(long, default_value_t = 200.0)]
    sweep_start: f64,

    /// Excluded end of the sweep (Hz)
    #[arg(long, default_value_t = 0.0)]
    sweep_stop: f64,

    /// Number of swept frequencies
    #[arg(long, default_value_t = 399)]
    sweep_points: usize,

    /// Prefix for chart titles
    #[arg(long, default_value = "Series RLC")]
    title: String,

    /// Image width in pixels
    #[arg(long, default_value_t = 770)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 539)]
    height: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let series = CircuitParameters::new(cli.resistance, cli.inductance, cli.capacitance, cli.voltage)
        .context("invalid series circuit")?;

    let config = SimulationConfig {
        output_dir: cli.output_dir,
        report_file: cli.report_file,
        report_format: cli.report_format,
        title_prefix: cli.title,
        series,
        sweep: SweepConfig {
            start_hz: cli.sweep_start,
            stop_hz: cli.sweep_stop,
            points: cli.sweep_points,
        },
        ..SimulationConfig::default()
    };
    let renderer = PlottersRenderer {
        width: cli.width,
        height: cli.height,
    };

    let summary = simulation::run(&config, &renderer).context("simulation failed")?;

    println!(
        "resonance: analytic {:.3} Hz, grid peak {:.3} Hz",
        summary.analytic_resonance_hz, summary.peak_frequency_hz
    );
    for chart in &summary.charts {
        println!("chart: {}", chart.display());
    }
    println!("report: {}", summary.report.display());
    Ok(())
}
