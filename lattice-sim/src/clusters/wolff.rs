use super::utils::{preorder_cluster, UNVISITED, VISITED};
use crate::spins::SpinGrid;
use rand::Rng;
use tracing::trace;

/// Bond-inclusion probability `1 - exp(-2 kT)`.
///
/// `kt` enters the way the coupling-over-temperature ratio does: larger
/// values give larger clusters.
#[inline]
pub fn bond_probability(kt: f64) -> f64 {
    1.0 - (-2.0 * kt).exp()
}

/// Grow a Wolff cluster from `seed` without flipping it.
///
/// Returns the marker grid: [`VISITED`] (`-1`) on cluster sites, [`UNVISITED`]
/// (`+1`) elsewhere. A neighbour joins when it has the same spin as the site
/// it is reached from, a uniform draw falls below `p`, and it is not yet in
/// the cluster, tested in that order.
pub fn grow_cluster<R: Rng + ?Sized>(grid: &SpinGrid, seed: usize, p: f64, rng: &mut R) -> Vec<i8> {
    let mut marker = vec![UNVISITED; grid.n_spins()];
    let mut stack = Vec::new();
    preorder_cluster(grid.lattice(), seed, &mut marker, &mut stack, |site, nb| {
        grid.get(site) == grid.get(nb) && rng.gen::<f64>() < p
    });
    marker
}

/// One Wolff cluster update: pick a seed (row draw, then column draw), grow
/// its cluster with [`bond_probability`]`(kt)` and flip every site in it.
///
/// Returns the cluster size, anywhere from 1 to `N²`.
pub fn wolff_step<R: Rng + ?Sized>(grid: &mut SpinGrid, kt: f64, rng: &mut R) -> usize {
    let seed = grid.lattice().random_site(rng);
    let marker = grow_cluster(grid, seed, bond_probability(kt), rng);
    let size = marker.iter().filter(|&&m| m == VISITED).count();
    grid.apply_marker(&marker);
    trace!(seed, size, "wolff cluster flipped");
    size
}
