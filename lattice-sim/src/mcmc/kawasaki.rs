use crate::error::{DynamicsError, Result};
use crate::geometry::Coord;
use crate::spins::energy::pair_local_energy;
use crate::spins::SpinGrid;
use rand::Rng;

/// Largest possible pair-exchange energy difference on the square lattice.
pub const MAX_EXCHANGE_DELTA: i32 = 16;

/// Spin grid plus the up/down occupancy lists used by conserved-order
/// (Kawasaki) dynamics.
///
/// `up` holds every site whose spin is `+1` and `down` every site whose spin
/// is `-1`; together they partition the lattice. Accepted exchanges swap one
/// entry between the lists, so the partition stays valid in O(1) per attempt
/// without rescanning the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConservedLattice {
    grid: SpinGrid,
    up: Vec<usize>,
    down: Vec<usize>,
}

impl ConservedLattice {
    /// Build the occupancy lists by scanning `grid` in row-major order.
    pub fn new(grid: SpinGrid) -> Self {
        let (up, down): (Vec<usize>, Vec<usize>) =
            (0..grid.n_spins()).partition(|&i| grid.get(i) == 1);
        Self { grid, up, down }
    }

    /// Adopt caller-supplied lists after checking they partition `grid`.
    pub fn from_parts(grid: SpinGrid, up: Vec<usize>, down: Vec<usize>) -> Result<Self> {
        let state = Self { grid, up, down };
        state.check_consistency()?;
        Ok(state)
    }

    /// Verify that `up` and `down` are disjoint, duplicate-free, cover every
    /// site and agree with the spin at each site.
    pub fn check_consistency(&self) -> Result<()> {
        let n_spins = self.grid.n_spins();
        let mut seen = vec![false; n_spins];
        for (list, expected) in [(&self.up, 1i8), (&self.down, -1i8)] {
            for &index in list.iter() {
                if index >= n_spins || seen[index] || self.grid.get(index) != expected {
                    return Err(DynamicsError::OccupancyMismatch { index });
                }
                seen[index] = true;
            }
        }
        if let Some(index) = seen.iter().position(|&s| !s) {
            return Err(DynamicsError::OccupancyMismatch { index });
        }
        Ok(())
    }

    #[inline]
    pub fn grid(&self) -> &SpinGrid {
        &self.grid
    }

    pub fn into_grid(self) -> SpinGrid {
        self.grid
    }

    /// Sites currently holding `+1`, as flat indices.
    #[inline]
    pub fn up(&self) -> &[usize] {
        &self.up
    }

    /// Sites currently holding `-1`, as flat indices.
    #[inline]
    pub fn down(&self) -> &[usize] {
        &self.down
    }

    pub fn up_coords(&self) -> Vec<Coord> {
        self.up.iter().map(|&i| self.grid.lattice().coord(i)).collect()
    }

    pub fn down_coords(&self) -> Vec<Coord> {
        self.down.iter().map(|&i| self.grid.lattice().coord(i)).collect()
    }

    /// One Kawasaki sweep of `N²` exchange attempts at inverse temperature
    /// `beta`.
    ///
    /// Each attempt draws an index into `up`, an index into `down` and, only
    /// when the exchange costs energy, one uniform. The two sites are flipped
    /// tentatively; the move is kept (and the list entries swapped) when
    /// `Δ <= 0` or the uniform falls below `exp(-Δ β)`, otherwise both flips
    /// are undone.
    pub fn sweep<R: Rng + ?Sized>(&mut self, beta: f64, rng: &mut R) -> Result<()> {
        if self.up.is_empty() || self.down.is_empty() {
            return Err(DynamicsError::OccupancyExhausted {
                n_up: self.up.len(),
                n_down: self.down.len(),
            });
        }
        let exponent = exchange_table(beta);

        for _ in 0..self.grid.n_spins() {
            let p1 = rng.gen_range(0..self.up.len());
            let p2 = rng.gen_range(0..self.down.len());
            let (a, b) = (self.up[p1], self.down[p2]);

            let delta = tentative_exchange(&mut self.grid, a, b);
            let accept = if delta <= 0 {
                true
            } else {
                match exchange_factor(&exponent, delta) {
                    Ok(factor) => rng.gen::<f64>() < factor,
                    Err(e) => {
                        self.grid.flip(a);
                        self.grid.flip(b);
                        return Err(e);
                    }
                }
            };

            if accept {
                self.up[p1] = b;
                self.down[p2] = a;
            } else {
                self.grid.flip(a);
                self.grid.flip(b);
            }
        }
        Ok(())
    }
}

/// `exp(-k β)` for `k = 1..=16`; entry `k - 1` holds the factor for `Δ = k`.
pub fn exchange_table(beta: f64) -> [f64; MAX_EXCHANGE_DELTA as usize] {
    std::array::from_fn(|k| (-((k + 1) as f64) * beta).exp())
}

/// Acceptance factor for a positive exchange energy difference `delta`.
///
/// Any `delta` outside `1..=16` means the local-energy bookkeeping is
/// broken, not that the input was unusual.
#[inline]
pub fn exchange_factor(table: &[f64; MAX_EXCHANGE_DELTA as usize], delta: i32) -> Result<f64> {
    if !(1..=MAX_EXCHANGE_DELTA).contains(&delta) {
        return Err(DynamicsError::AcceptanceOutOfRange { delta });
    }
    Ok(table[(delta - 1) as usize])
}

/// Flip both `a` and `b` and return `Δ = before - after` of their combined
/// local alignment. The flips are left in place.
fn tentative_exchange(grid: &mut SpinGrid, a: usize, b: usize) -> i32 {
    let before = pair_local_energy(grid, a, b);
    grid.flip(a);
    grid.flip(b);
    let after = pair_local_energy(grid, a, b);
    before - after
}

/// Free-function form of [`ConservedLattice::sweep`].
pub fn kawasaki_sweep<R: Rng + ?Sized>(
    state: &mut ConservedLattice,
    beta: f64,
    rng: &mut R,
) -> Result<()> {
    state.sweep(beta, rng)
}
