//! Sample-grid builders for time and frequency sweeps.

use crate::math::Scalar;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` linearly spaced samples in [start, stop), excluding `stop`.
///
/// Works in either direction; `linspace_exclusive(200.0, 0.0, 399)` yields a
/// descending grid whose last sample is ~0.5.
#[must_use]
pub fn linspace_exclusive(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    if n == 0 {
        return Vec::new();
    }
    let step = (stop - start) / n as Scalar;
    (0..n).map(|i| start + step * i as Scalar).collect()
}

/// Applies `f` to each sample and collects results.
#[must_use]
pub fn sweep_map<I, F, T>(samples: I, f: F) -> Vec<T>
where
    I: IntoIterator<Item = Scalar>,
    F: FnMut(Scalar) -> T,
{
    samples.into_iter().map(f).collect()
}
