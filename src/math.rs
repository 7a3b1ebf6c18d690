//! Shared numerical primitives.

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for impedances.
pub type CScalar = num_complex::Complex<Scalar>;

/// Central finite difference `(f(x + h) − f(x − h)) / 2h`.
#[must_use]
pub fn central_difference<F>(f: F, x: Scalar, h: Scalar) -> Scalar
where
    F: Fn(Scalar) -> Scalar,
{
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Index of the first maximum in `values`, ignoring NaN entries.
///
/// Returns `None` for an empty slice or when every entry is NaN.
#[must_use]
pub fn argmax_first(values: &[Scalar]) -> Option<usize> {
    let mut best: Option<(usize, Scalar)> = None;
    for (idx, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Minimum and maximum over the finite entries of `values`.
#[must_use]
pub fn finite_bounds<I>(values: I) -> Option<(Scalar, Scalar)>
where
    I: IntoIterator<Item = Scalar>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn central_difference_of_quadratic_is_exact() {
        let d = central_difference(|x| x * x, 3.0, 1.0e-3);
        assert_relative_eq!(d, 6.0, epsilon = 1.0e-9);
    }

    #[test]
    fn argmax_picks_first_of_ties() {
        assert_eq!(argmax_first(&[1.0, 3.0, 2.0, 3.0]), Some(1));
        assert_eq!(argmax_first(&[f64::NAN, 0.5]), Some(1));
        assert_eq!(argmax_first(&[]), None);
    }

    #[test]
    fn bounds_skip_non_finite() {
        let b = finite_bounds([2.0, f64::INFINITY, -1.0, f64::NAN]);
        assert_eq!(b, Some((-1.0, 2.0)));
        assert_eq!(finite_bounds(std::iter::empty()), None);
    }
}
