use super::SpinGrid;
use crate::error::{DynamicsError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Every spin `+1`.
pub fn aligned(size: usize) -> Result<SpinGrid> {
    SpinGrid::aligned(size, 1)
}

/// Every spin `+1` or every spin `-1`, chosen by one fair coin.
pub fn random_aligned<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<SpinGrid> {
    let spin = if rng.gen::<f64>() < 0.5 { -1 } else { 1 };
    SpinGrid::aligned(size, spin)
}

/// Independent spins, each `+1` iff its uniform draw exceeds one half.
pub fn random_spins<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<SpinGrid> {
    let n = size * size;
    let spins = (0..n)
        .map(|_| if rng.gen::<f64>() > 0.5 { 1 } else { -1 })
        .collect();
    SpinGrid::from_spins(size, spins)
}

/// Number of up spins realising magnetization `m` on `n_spins` sites:
/// the count of `k in 0..n_spins` with `k < n_spins * (m + 1) / 2`.
pub fn up_count(n_spins: usize, m: f64) -> Result<usize> {
    if !m.is_finite() || !(-1.0..=1.0).contains(&m) {
        return Err(DynamicsError::InvalidMagnetization(m));
    }
    let threshold = n_spins as f64 * 0.5 * (m + 1.0);
    Ok((threshold.ceil() as usize).min(n_spins))
}

/// Fully segregated configuration: the first `up_count` sites in row-major
/// order are `+1`, the rest `-1`.
pub fn polarized(size: usize, m: f64) -> Result<SpinGrid> {
    polarized_count(size, up_count(size * size, m)?)
}

/// Random configuration with an exact number of up spins: the
/// [`polarized`] layout, shuffled.
pub fn random_with_magnetization<R: Rng + ?Sized>(
    size: usize,
    m: f64,
    rng: &mut R,
) -> Result<SpinGrid> {
    shuffled_count(size, up_count(size * size, m)?, rng)
}

/// [`polarized`] with the number of up spins given directly (clamped to
/// `N²`).
pub fn polarized_count(size: usize, n_up: usize) -> Result<SpinGrid> {
    SpinGrid::from_spins(size, layout(size * size, n_up))
}

/// [`random_with_magnetization`] with the number of up spins given directly
/// (clamped to `N²`).
pub fn shuffled_count<R: Rng + ?Sized>(size: usize, n_up: usize, rng: &mut R) -> Result<SpinGrid> {
    let mut spins = layout(size * size, n_up);
    spins.shuffle(rng);
    SpinGrid::from_spins(size, spins)
}

fn layout(n: usize, n_up: usize) -> Vec<i8> {
    (0..n).map(|k| if k < n_up { 1 } else { -1 }).collect()
}
