use crate::error::Result;
use crate::geometry::N_NEIGHBORS;
use crate::spins::{init, SpinGrid};
use rand::Rng;

/// Number of nearest-neighbour bonds joining equal spins.
///
/// Every site looks at its four neighbour slots and the total is halved, so
/// on lattices of side 1 or 2 a repeated neighbour is counted once per slot.
pub fn count_links(grid: &SpinGrid) -> usize {
    let lattice = grid.lattice();
    let mut count = 0;
    for site in 0..grid.n_spins() {
        let s = grid.get(site);
        for k in 0..N_NEIGHBORS {
            if grid.get(lattice.neighbor(site, k)) == s {
                count += 1;
            }
        }
    }
    count / 2
}

/// Segregation index of `grid` from its link count.
///
/// With `L` the links of `grid`, `P` those of the polarized configuration and
/// `R` those of a shuffled configuration (both with the same number of up
/// spins), the index is `(L - R) / (P - R)` when `L >= R` and
/// `(L - R) / L` otherwise. A zero denominator gives 0.
pub fn link_index<R: Rng + ?Sized>(grid: &SpinGrid, rng: &mut R) -> Result<f64> {
    let n_up = grid.count_up();
    let link = count_links(grid) as f64;
    let pol = count_links(&init::polarized_count(grid.size(), n_up)?) as f64;
    let ran = count_links(&init::shuffled_count(grid.size(), n_up, rng)?) as f64;

    let denom = if link >= ran { pol - ran } else { link };
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok((link - ran) / denom)
}
