use crate::spins::energy::flip_energy_change;
use crate::spins::SpinGrid;
use rand::Rng;

/// Acceptance factors `exp(-4β)` and `exp(-8β)` for the two positive
/// single-flip energy changes.
#[inline]
pub fn boltzmann_table(beta: f64) -> [f64; 2] {
    [(-4.0 * beta).exp(), (-8.0 * beta).exp()]
}

/// Single-spin-flip sweep: `N²` attempts at uniformly chosen sites.
///
/// Uses the Metropolis rule: a flip with `ΔE <= 0` is always accepted,
/// otherwise it is accepted with probability `exp(-ΔE β)`. Each attempt draws
/// a row, a column and, only when `ΔE > 0`, one uniform.
pub fn glauber_sweep<R: Rng + ?Sized>(grid: &mut SpinGrid, beta: f64, rng: &mut R) {
    let exponent = boltzmann_table(beta);

    for _ in 0..grid.n_spins() {
        let site = grid.lattice().random_site(rng);
        let eng_change = flip_energy_change(grid, site);
        if eng_change <= 0 || rng.gen::<f64>() < exponent[(eng_change / 4 - 1) as usize] {
            grid.flip(site);
        }
    }
}
