use crate::math::{CScalar, Scalar};
use crate::units::{Capacitance, Impedance, Inductance, Quantity, Voltage};

/// Trait implemented by all circuit components that can provide a frequency-domain impedance.
pub trait Component {
    /// Returns the component's impedance for an angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> CScalar;

    /// Reactive part of the impedance at `omega`.
    fn reactance(&self, omega: Scalar) -> Scalar {
        self.impedance(omega).im
    }
}

/// Lumped resistor model.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    resistance: Impedance<Scalar>,
}

impl Resistor {
    /// Creates a resistor.
    #[must_use]
    pub const fn new(resistance_ohms: Scalar) -> Self {
        Self {
            resistance: Quantity::new(resistance_ohms),
        }
    }

    /// Resistance magnitude in ohms.
    #[must_use]
    pub fn resistance(&self) -> Scalar {
        self.resistance.value()
    }

    /// Ohm's law drop for an instantaneous `current` (A).
    #[must_use]
    pub fn voltage(&self, current: Scalar) -> Scalar {
        self.resistance() * current
    }
}

impl Component for Resistor {
    fn impedance(&self, _omega: Scalar) -> CScalar {
        CScalar::new(self.resistance(), 0.0)
    }
}

/// Lumped capacitor model (ideal).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacitor {
    capacitance: Capacitance<Scalar>,
}

impl Capacitor {
    /// Creates a capacitor.
    #[must_use]
    pub const fn new(capacitance_f: Scalar) -> Self {
        Self {
            capacitance: Quantity::new(capacitance_f),
        }
    }

    /// Returns the capacitance magnitude in farads.
    #[must_use]
    pub fn capacitance(&self) -> Scalar {
        self.capacitance.value()
    }
}

impl Component for Capacitor {
    /// At DC the capacitor is an open circuit: the reactance is −∞.
    fn impedance(&self, omega: Scalar) -> CScalar {
        if omega.abs() < Scalar::EPSILON {
            CScalar::new(0.0, Scalar::NEG_INFINITY)
        } else {
            CScalar::new(0.0, -1.0 / (omega * self.capacitance()))
        }
    }
}

/// Lumped inductor model (ideal).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inductor {
    inductance: Inductance<Scalar>,
}

impl Inductor {
    /// Creates an inductor.
    #[must_use]
    pub const fn new(inductance_h: Scalar) -> Self {
        Self {
            inductance: Quantity::new(inductance_h),
        }
    }

    /// Returns the inductance magnitude in henries.
    #[must_use]
    pub fn inductance(&self) -> Scalar {
        self.inductance.value()
    }

    /// Induced voltage `L·di/dt` for a current slope in A/s.
    #[must_use]
    pub fn voltage(&self, current_slope: Scalar) -> Scalar {
        self.inductance() * current_slope
    }
}

impl Component for Inductor {
    fn impedance(&self, omega: Scalar) -> CScalar {
        CScalar::new(0.0, omega * self.inductance())
    }
}

/// Ideal voltage source driving the series loop.
///
/// For the step response `voltage` is the step height; for the frequency
/// response it is the amplitude of the sinusoid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageSource {
    /// Voltage magnitude.
    pub voltage: Voltage<Scalar>,
}

impl VoltageSource {
    /// Creates a voltage source.
    #[must_use]
    pub const fn new(voltage_v: Scalar) -> Self {
        Self {
            voltage: Quantity::new(voltage_v),
        }
    }
}
