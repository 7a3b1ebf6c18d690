//! Convenience re-exports for series RLC experiments.

pub use crate::circuits::{
    component::{Capacitor, Component, Inductor, Resistor, VoltageSource},
    frequency::{frequency_sweep, series_amplitude, series_impedance, FrequencySample, FrequencySweep},
    parameters::{CircuitParameters, Damping},
    transient::{step_response, ComponentVoltages, StepResponse, VoltageSample},
};
pub use crate::constants::*;
pub use crate::errors::{Result, RlcError};
pub use crate::math::{CScalar, Scalar};
pub use crate::render::{Chart, Marker, PlottersRenderer, Renderer, Series};
pub use crate::report::{Prefix, ReportEntry, ReportFormat, ReportWriter};
pub use crate::simulation::{
    run, DecompositionConfig, SimulationConfig, SimulationSummary, SweepConfig, TransientConfig,
};
pub use crate::sweep::{linspace, linspace_exclusive, sweep_map};
pub use crate::units::{
    Farad, Henry, Hertz, Impedance, Ohm, Quantity, Unit, Volt, Voltage,
};
