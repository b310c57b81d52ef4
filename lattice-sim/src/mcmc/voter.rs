use crate::geometry::Lattice;
use crate::spins::SpinGrid;
use rand::Rng;

/// Noisy voter sweep: `N²` updates of uniformly chosen sites.
///
/// With probability `prob` the site takes a fresh fair-coin value (noise),
/// otherwise it copies one of its four neighbours, picked with an axis coin
/// and a direction coin. Every update overwrites the site; there is no
/// accept/reject step.
///
/// Draw order per update: row, column, noise uniform, then either the value
/// coin or the axis and direction coins.
pub fn voter_sweep<R: Rng + ?Sized>(grid: &mut SpinGrid, prob: f64, rng: &mut R) {
    for _ in 0..grid.n_spins() {
        let site = grid.lattice().random_site(rng);

        let value = if rng.gen::<f64>() < prob {
            if rng.gen::<f64>() < 0.5 {
                1
            } else {
                -1
            }
        } else {
            grid.get(random_neighbor(grid.lattice(), site, rng))
        };
        grid.set(site, value);
    }
}

/// One of the four cardinal neighbours of `site`: the first coin picks the
/// column axis (< 0.5) or the row axis, the second picks `+1` (< 0.5) or
/// `-1`.
#[inline]
fn random_neighbor<R: Rng + ?Sized>(lattice: &Lattice, site: usize, rng: &mut R) -> usize {
    let along_cols = rng.gen::<f64>() < 0.5;
    let forward = rng.gen::<f64>() < 0.5;
    // Slots follow VON_NEUMANN: row+1, row-1, col+1, col-1.
    let k = match (along_cols, forward) {
        (true, true) => 2,
        (true, false) => 3,
        (false, true) => 0,
        (false, false) => 1,
    };
    lattice.neighbor(site, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spins::init;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_step_rng_copies_right_neighbor() {
        // Zero draws: site (0,0), imitation (0 < 0 fails), column axis, +1.
        let mut grid =
            SpinGrid::from_rows(&[vec![1, -1, 1], vec![1, 1, 1], vec![1, 1, 1]]).unwrap();
        voter_sweep(&mut grid, 0.0, &mut StepRng::new(0, 0));
        assert_eq!(grid.get(0), -1);
        assert_eq!(grid.count_up(), 7);
    }

    #[test]
    fn test_step_rng_noise_sets_up() {
        let mut grid = SpinGrid::aligned(3, -1).unwrap();
        voter_sweep(&mut grid, 1.0, &mut StepRng::new(0, 0));
        assert_eq!(grid.get(0), 1);
        assert_eq!(grid.count_up(), 1);
    }

    #[test]
    fn test_random_neighbor_directions() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);
        let lattice = Lattice::new(4).unwrap();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(random_neighbor(&lattice, 0, &mut rng));
        }
        // (0,0) on a 4x4 torus: down 4, up 12, right 1, left 3.
        assert_eq!(seen, [1, 3, 4, 12].into_iter().collect());
    }

    #[test]
    fn test_coin_to_neighbor_slot() {
        // StepRng(v, a) draws v, v + a, ...; 0 reads as a uniform of 0.0 and
        // 1 << 63 as exactly 0.5, so each pair of coins is pinned.
        const HALF: u64 = 1 << 63;
        let lattice = Lattice::new(4).unwrap();
        let cases = [
            (StepRng::new(0, 0), [6, 1]), // column axis, +1
            (StepRng::new(0, HALF), [4, 3]), // column axis, -1
            (StepRng::new(HALF, HALF), [9, 4]), // row axis, +1
            (StepRng::new(HALF, 0), [1, 12]), // row axis, -1
        ];
        for (rng, [from_5, from_0]) in cases {
            assert_eq!(random_neighbor(&lattice, 5, &mut rng.clone()), from_5);
            assert_eq!(random_neighbor(&lattice, 0, &mut rng.clone()), from_0);
        }
    }

    #[test]
    fn test_noiseless_uniform_grid_is_absorbing() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(8);
        let mut grid = SpinGrid::aligned(8, -1).unwrap();
        for _ in 0..10 {
            voter_sweep(&mut grid, 0.0, &mut rng);
        }
        assert_eq!(grid, SpinGrid::aligned(8, -1).unwrap());
    }

    #[test]
    fn test_noiseless_update_copies_a_neighbor() {
        // Replay the sweep with a cloned generator and check every update
        // against the grid as it stood at that moment.
        let mut rng = Xoshiro256StarStar::seed_from_u64(21);
        let mut grid = init::random_spins(6, &mut rng).unwrap();
        let mut replay = rng.clone();
        let before = grid.clone();
        voter_sweep(&mut grid, 0.0, &mut rng);

        let mut shadow = before;
        for _ in 0..shadow.n_spins() {
            let site = shadow.lattice().random_site(&mut replay);
            let _noise: f64 = replay.gen();
            let nb = random_neighbor(shadow.lattice(), site, &mut replay);
            assert!(shadow.lattice().neighbors(site).contains(&nb));
            let value = shadow.get(nb);
            shadow.set(site, value);
        }
        assert_eq!(shadow, grid);
    }

    #[test]
    fn test_full_noise_decorrelates() {
        // With prob = 1 a large aligned grid ends roughly half up after a few
        // sweeps (each sweep leaves a site untouched with probability ~1/e).
        let mut rng = Xoshiro256StarStar::seed_from_u64(33);
        let mut grid = SpinGrid::aligned(64, 1).unwrap();
        for _ in 0..8 {
            voter_sweep(&mut grid, 1.0, &mut rng);
        }
        let frac = grid.count_up() as f64 / grid.n_spins() as f64;
        assert!((frac - 0.5).abs() < 0.03, "fraction up = {frac}");
    }

    proptest! {
        #[test]
        fn spins_stay_binary(seed in any::<u64>(), size in 1usize..10, prob in 0.0f64..=1.0) {
            let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
            let mut grid = init::random_spins(size, &mut rng).unwrap();
            voter_sweep(&mut grid, prob, &mut rng);
            prop_assert!(grid.as_slice().iter().all(|&s| s == 1 || s == -1));
        }
    }
}
