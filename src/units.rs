//! Strongly typed SI quantities used by circuit parameters and reports.
//!
//! A [`Quantity`] is a plain scalar tagged with a zero-sized unit marker, so
//! a resistance cannot be passed where a capacitance is expected. The marker
//! also carries the symbols used when the value is printed.

use std::fmt;
use std::marker::PhantomData;

/// Marker trait implemented by every unit tag.
pub trait Unit {
    /// Plain-text symbol (e.g. `Ω`).
    const SYMBOL: &'static str;
    /// LaTeX spelling (e.g. `\Omega`, `V`). Control sequences are typeset
    /// in math mode, plain letters as upright text.
    const LATEX: &'static str;
}

macro_rules! unit_marker {
    ($(#[$meta:meta])* $name:ident, $symbol:expr, $latex:expr) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl Unit for $name {
            const SYMBOL: &'static str = $symbol;
            const LATEX: &'static str = $latex;
        }
    };
}

unit_marker!(
    /// Ohm (Ω).
    Ohm, "Ω", r"\Omega"
);
unit_marker!(
    /// Henry (H).
    Henry, "H", "H"
);
unit_marker!(
    /// Farad (F).
    Farad, "F", "F"
);
unit_marker!(
    /// Volt (V).
    Volt, "V", "V"
);
unit_marker!(
    /// Hertz (Hz).
    Hertz, "Hz", "Hz"
);

/// Scalar value tagged with a unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Quantity<T, U> {
    value: T,
    #[cfg_attr(feature = "serde", serde(skip))]
    unit: PhantomData<U>,
}

impl<T, U> Quantity<T, U> {
    /// Wraps a raw value.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }
}

impl<T: Copy, U> Quantity<T, U> {
    /// Returns the raw value in base SI units.
    #[must_use]
    pub const fn value(&self) -> T {
        self.value
    }
}

impl<T: Copy, U> Clone for Quantity<T, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy, U> Copy for Quantity<T, U> {}

impl<T: PartialEq, U> PartialEq for Quantity<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug, U: Unit> fmt::Debug for Quantity<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.value, U::SYMBOL)
    }
}

impl<T: fmt::Display, U: Unit> fmt::Display for Quantity<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} {}", p, self.value, U::SYMBOL),
            None => write!(f, "{} {}", self.value, U::SYMBOL),
        }
    }
}

/// Resistance in ohms.
pub type Impedance<T> = Quantity<T, Ohm>;
/// Inductance in henries.
pub type Inductance<T> = Quantity<T, Henry>;
/// Capacitance in farads.
pub type Capacitance<T> = Quantity<T, Farad>;
/// Potential difference in volts.
pub type Voltage<T> = Quantity<T, Volt>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_symbol() {
        let r: Impedance<f64> = Quantity::new(4.7);
        assert_eq!(format!("{r:.2}"), "4.70 Ω");
        assert_eq!(Ohm::LATEX, r"\Omega");
    }

    #[test]
    fn quantities_compare_by_value() {
        let a: Voltage<f64> = Quantity::new(2.0);
        let b: Voltage<f64> = Quantity::new(2.0);
        assert_eq!(a, b);
        assert_eq!(a.value(), 2.0);
    }
}
