//! Closed-form step response of a series RLC loop initially at rest.
//!
//! The damping regime is resolved once when a [`StepResponse`] is built and
//! the coefficients of the matching closed form are stored alongside it, so
//! evaluating the current at a time `t` is a handful of flops:
//!
//! * underdamped (ξ < 1): `i(t) = (V/ωd)·e^(−ξω₀t)·sin(ωd·t)`, `ωd = ω₀√(1−ξ²)`
//! * critically damped (ξ = 1): `i(t) = V·t·e^(−ω₀t)/(L·ω₀)`
//! * overdamped (ξ > 1): `i(t) = k·(e^(s₁t) − e^(s₂t))`, with
//!   `s₁,₂ = −ω₀(ξ ± √(ξ²−1))` and `k = V·s₁s₂/(s₁−s₂)`; `s₂` is taken as
//!   `ω₀²/s₁`, which is the same root without the cancellation at large ξ
//!
//! [`ComponentVoltages`] derives the voltage across each element from the
//! current: Ohm's law for the resistor, a central difference for the
//! inductor, and the loop closure `V − V_R − V_L` for the capacitor.

use tracing::debug;

use crate::constants::DERIVATIVE_STEP;
use crate::errors::Result;
use crate::math::{central_difference, Scalar};

use super::component::{Inductor, Resistor};
use super::parameters::{CircuitParameters, Damping};

/// Regime-specific coefficients of the closed-form current.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Regime {
    Underdamped {
        amplitude: Scalar,
        decay: Scalar,
        damped_frequency: Scalar,
    },
    Critical {
        scale: Scalar,
        decay: Scalar,
    },
    Overdamped {
        coefficient: Scalar,
        fast_root: Scalar,
        slow_root: Scalar,
    },
}

/// Current through a series RLC loop after a voltage step at `t = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResponse {
    damping: Damping,
    damping_ratio: Scalar,
    natural_frequency: Scalar,
    regime: Regime,
}

/// Builds the step response for `R` (Ω), `L` (H), `C` (F) and step height `V`.
///
/// Fails with [`RlcError::InvalidParameter`](crate::errors::RlcError::InvalidParameter)
/// when `L` or `C` is not strictly positive or `R` is negative.
pub fn step_response(
    resistance: Scalar,
    inductance: Scalar,
    capacitance: Scalar,
    source_voltage: Scalar,
) -> Result<StepResponse> {
    let params = CircuitParameters::new(resistance, inductance, capacitance, source_voltage)?;
    Ok(StepResponse::new(&params))
}

impl StepResponse {
    /// Resolves the damping regime of `params` and its coefficients.
    #[must_use]
    pub fn new(params: &CircuitParameters) -> Self {
        let omega0 = params.natural_frequency();
        let xi = params.damping_ratio();
        let v = params.source_voltage();
        let damping = Damping::classify(xi);

        let regime = match damping {
            Damping::Underdamped => {
                let damped_frequency = omega0 * (1.0 - xi * xi).sqrt();
                Regime::Underdamped {
                    amplitude: v / damped_frequency,
                    decay: xi * omega0,
                    damped_frequency,
                }
            }
            Damping::CriticallyDamped => Regime::Critical {
                scale: v / (params.inductance() * omega0),
                decay: omega0,
            },
            Damping::Overdamped => {
                let spread = (xi * xi - 1.0).sqrt();
                let fast_root = -omega0 * (xi + spread);
                // s₁·s₂ = ω₀²; avoids cancellation in ξ − √(ξ²−1) for large ξ.
                let slow_root = omega0 * omega0 / fast_root;
                Regime::Overdamped {
                    coefficient: v * fast_root * slow_root / (fast_root - slow_root),
                    fast_root,
                    slow_root,
                }
            }
        };

        debug!(%damping, xi, omega0, "resolved step response regime");

        Self {
            damping,
            damping_ratio: xi,
            natural_frequency: omega0,
            regime,
        }
    }

    /// Damping regime selected for this circuit.
    #[must_use]
    pub fn damping(&self) -> Damping {
        self.damping
    }

    /// Damping ratio ξ the regime was selected from.
    #[must_use]
    pub fn damping_ratio(&self) -> Scalar {
        self.damping_ratio
    }

    /// Natural angular frequency ω₀ (rad/s).
    #[must_use]
    pub fn natural_frequency(&self) -> Scalar {
        self.natural_frequency
    }

    /// Damped angular frequency ωd (rad/s); `None` unless underdamped.
    #[must_use]
    pub fn damped_frequency(&self) -> Option<Scalar> {
        match self.regime {
            Regime::Underdamped {
                damped_frequency, ..
            } => Some(damped_frequency),
            _ => None,
        }
    }

    /// Loop current (A) at elapsed time `t` (s).
    #[must_use]
    pub fn current(&self, t: Scalar) -> Scalar {
        match self.regime {
            Regime::Underdamped {
                amplitude,
                decay,
                damped_frequency,
            } => amplitude * (-decay * t).exp() * (damped_frequency * t).sin(),
            Regime::Critical { scale, decay } => scale * t * (-decay * t).exp(),
            Regime::Overdamped {
                coefficient,
                fast_root,
                slow_root,
            } => coefficient * ((fast_root * t).exp() - (slow_root * t).exp()),
        }
    }

    /// Evaluates the current at every entry of `times`.
    #[must_use]
    pub fn sample(&self, times: &[Scalar]) -> Vec<Scalar> {
        times.iter().map(|&t| self.current(t)).collect()
    }

    /// Borrows the response as a plain function of time.
    pub fn as_fn(&self) -> impl Fn(Scalar) -> Scalar + '_ {
        move |t| self.current(t)
    }
}

/// Voltages across each element of the loop, derived from the step current.
#[derive(Debug, Clone)]
pub struct ComponentVoltages {
    response: StepResponse,
    resistor: Resistor,
    inductor: Inductor,
    source_voltage: Scalar,
}

/// One time sample of [`ComponentVoltages`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageSample {
    /// Elapsed time (s).
    pub time: Scalar,
    /// Loop current (A).
    pub current: Scalar,
    /// Voltage across the resistor (V).
    pub resistor: Scalar,
    /// Voltage across the inductor (V).
    pub inductor: Scalar,
    /// Voltage across the capacitor (V).
    pub capacitor: Scalar,
}

impl ComponentVoltages {
    /// Builds the decomposition for `params`.
    #[must_use]
    pub fn new(params: &CircuitParameters) -> Self {
        Self {
            response: StepResponse::new(params),
            resistor: params.resistor(),
            inductor: params.inductor(),
            source_voltage: params.source().voltage.value(),
        }
    }

    /// Underlying current response.
    #[must_use]
    pub fn response(&self) -> &StepResponse {
        &self.response
    }

    /// `V_R(t) = R·i(t)`.
    #[must_use]
    pub fn resistor(&self, t: Scalar) -> Scalar {
        self.resistor.voltage(self.response.current(t))
    }

    /// `V_L(t) = L·di/dt`, with di/dt from a central difference of step 1 µs.
    #[must_use]
    pub fn inductor(&self, t: Scalar) -> Scalar {
        let slope = central_difference(self.response.as_fn(), t, DERIVATIVE_STEP);
        self.inductor.voltage(slope)
    }

    /// `V_C(t) = V − V_R(t) − V_L(t)`.
    #[must_use]
    pub fn capacitor(&self, t: Scalar) -> Scalar {
        self.source_voltage - self.resistor(t) - self.inductor(t)
    }

    /// Evaluates current and all three voltages at each time in `times`.
    #[must_use]
    pub fn sample(&self, times: &[Scalar]) -> Vec<VoltageSample> {
        times
            .iter()
            .map(|&time| {
                let resistor = self.resistor(time);
                let inductor = self.inductor(time);
                VoltageSample {
                    time,
                    current: self.response.current(time),
                    resistor,
                    inductor,
                    capacitor: self.source_voltage - resistor - inductor,
                }
            })
            .collect()
    }
}
