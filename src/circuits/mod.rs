//! Series RLC circuit primitives and closed-form solvers.

/// Lumped component definitions and traits.
pub mod component;
/// Validated circuit parameters and damping classification.
pub mod parameters;
/// Closed-form step response and component voltage decomposition.
pub mod transient;
/// Steady-state current amplitude versus driving frequency.
pub mod frequency;

pub use component::{Capacitor, Component, Inductor, Resistor, VoltageSource};
pub use frequency::{frequency_sweep, series_amplitude, FrequencySample, FrequencySweep};
pub use parameters::{CircuitParameters, Damping};
pub use transient::{step_response, ComponentVoltages, StepResponse, VoltageSample};
