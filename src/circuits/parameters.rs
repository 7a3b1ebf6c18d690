//! Validated parameters of a series RLC loop driven by a voltage source.

use std::fmt;

use crate::constants::{linear_frequency, CRITICAL_DAMPING_TOLERANCE};
use crate::errors::{Result, RlcError};
use crate::math::Scalar;
use crate::units::{Capacitance, Impedance, Inductance, Quantity, Voltage};

use super::component::{Capacitor, Inductor, Resistor, VoltageSource};

/// Damping regime of the second-order loop.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Damping {
    /// ξ < 1: decaying oscillation.
    Underdamped,
    /// ξ = 1 (within [`CRITICAL_DAMPING_TOLERANCE`]).
    CriticallyDamped,
    /// ξ > 1: two real decaying exponentials.
    Overdamped,
}

impl Damping {
    /// Classifies a damping ratio. `|ξ − 1| < 1e-9` counts as critical.
    #[must_use]
    pub fn classify(damping_ratio: Scalar) -> Self {
        if (damping_ratio - 1.0).abs() < CRITICAL_DAMPING_TOLERANCE {
            Self::CriticallyDamped
        } else if damping_ratio < 1.0 {
            Self::Underdamped
        } else {
            Self::Overdamped
        }
    }
}

impl fmt::Display for Damping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Underdamped => "underdamped",
            Self::CriticallyDamped => "critically damped",
            Self::Overdamped => "overdamped",
        };
        f.write_str(label)
    }
}

/// Element values of a series RLC circuit and its source.
///
/// Constructed through [`CircuitParameters::new`], which rejects
/// non-positive inductance or capacitance and negative resistance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawCircuitParameters", into = "RawCircuitParameters")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitParameters {
    resistance: Impedance<Scalar>,
    inductance: Inductance<Scalar>,
    capacitance: Capacitance<Scalar>,
    source_voltage: Voltage<Scalar>,
}

impl CircuitParameters {
    /// Validates and stores `R` (Ω), `L` (H), `C` (F) and the source voltage `V`.
    pub fn new(
        resistance: Scalar,
        inductance: Scalar,
        capacitance: Scalar,
        source_voltage: Scalar,
    ) -> Result<Self> {
        ensure_finite("resistance", resistance)?;
        if resistance < 0.0 {
            return Err(RlcError::InvalidParameter {
                name: "resistance",
                value: resistance,
                reason: "must be non-negative",
            });
        }
        ensure_positive("inductance", inductance)?;
        ensure_positive("capacitance", capacitance)?;
        ensure_finite("source_voltage", source_voltage)?;

        Ok(Self {
            resistance: Quantity::new(resistance),
            inductance: Quantity::new(inductance),
            capacitance: Quantity::new(capacitance),
            source_voltage: Quantity::new(source_voltage),
        })
    }

    /// Skips validation; only for literal values known to satisfy it.
    pub(crate) const fn from_trusted(
        resistance: Scalar,
        inductance: Scalar,
        capacitance: Scalar,
        source_voltage: Scalar,
    ) -> Self {
        Self {
            resistance: Quantity::new(resistance),
            inductance: Quantity::new(inductance),
            capacitance: Quantity::new(capacitance),
            source_voltage: Quantity::new(source_voltage),
        }
    }

    /// Builds the circuit whose resistance yields damping ratio `damping_ratio`,
    /// i.e. `R = 2·ξ·L/ω₀`.
    pub fn with_damping_ratio(
        inductance: Scalar,
        capacitance: Scalar,
        damping_ratio: Scalar,
        source_voltage: Scalar,
    ) -> Result<Self> {
        ensure_positive("inductance", inductance)?;
        ensure_positive("capacitance", capacitance)?;
        ensure_finite("damping_ratio", damping_ratio)?;
        if damping_ratio < 0.0 {
            return Err(RlcError::InvalidParameter {
                name: "damping_ratio",
                value: damping_ratio,
                reason: "must be non-negative",
            });
        }
        let omega0 = 1.0 / (inductance * capacitance).sqrt();
        Self::new(
            2.0 * damping_ratio * inductance / omega0,
            inductance,
            capacitance,
            source_voltage,
        )
    }

    /// Resistance in ohms.
    #[must_use]
    pub fn resistance(&self) -> Scalar {
        self.resistance.value()
    }

    /// Inductance in henries.
    #[must_use]
    pub fn inductance(&self) -> Scalar {
        self.inductance.value()
    }

    /// Capacitance in farads.
    #[must_use]
    pub fn capacitance(&self) -> Scalar {
        self.capacitance.value()
    }

    /// Source voltage (step height or sinusoid amplitude) in volts.
    #[must_use]
    pub fn source_voltage(&self) -> Scalar {
        self.source_voltage.value()
    }

    /// Natural angular frequency ω₀ = 1/√(LC) in rad/s.
    #[must_use]
    pub fn natural_frequency(&self) -> Scalar {
        1.0 / (self.inductance() * self.capacitance()).sqrt()
    }

    /// Analytic resonant frequency ω₀/2π in hertz.
    ///
    /// This is distinct from the grid-search peak reported by
    /// [`FrequencySweep::resonant_frequency`](super::FrequencySweep::resonant_frequency).
    #[must_use]
    pub fn resonant_frequency_hz(&self) -> Scalar {
        linear_frequency(self.natural_frequency())
    }

    /// Damping ratio ξ = R·ω₀/(2L).
    #[must_use]
    pub fn damping_ratio(&self) -> Scalar {
        self.resistance() * self.natural_frequency() / (2.0 * self.inductance())
    }

    /// Damping regime of this circuit.
    #[must_use]
    pub fn damping(&self) -> Damping {
        Damping::classify(self.damping_ratio())
    }

    /// The loop resistor as a component.
    #[must_use]
    pub fn resistor(&self) -> Resistor {
        Resistor::new(self.resistance())
    }

    /// The loop inductor as a component.
    #[must_use]
    pub fn inductor(&self) -> Inductor {
        Inductor::new(self.inductance())
    }

    /// The loop capacitor as a component.
    #[must_use]
    pub fn capacitor(&self) -> Capacitor {
        Capacitor::new(self.capacitance())
    }

    /// The driving source as a component.
    #[must_use]
    pub fn source(&self) -> VoltageSource {
        VoltageSource::new(self.source_voltage())
    }
}

fn ensure_finite(name: &'static str, value: Scalar) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RlcError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

fn ensure_positive(name: &'static str, value: Scalar) -> Result<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(RlcError::InvalidParameter {
            name,
            value,
            reason: "must be strictly positive",
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawCircuitParameters {
    resistance: Scalar,
    inductance: Scalar,
    capacitance: Scalar,
    source_voltage: Scalar,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCircuitParameters> for CircuitParameters {
    type Error = RlcError;

    fn try_from(raw: RawCircuitParameters) -> Result<Self> {
        Self::new(raw.resistance, raw.inductance, raw.capacitance, raw.source_voltage)
    }
}

#[cfg(feature = "serde")]
impl From<CircuitParameters> for RawCircuitParameters {
    fn from(params: CircuitParameters) -> Self {
        Self {
            resistance: params.resistance(),
            inductance: params.inductance(),
            capacitance: params.capacitance(),
            source_voltage: params.source_voltage(),
        }
    }
}
