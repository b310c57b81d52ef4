use super::offsets::{N_NEIGHBORS, VON_NEUMANN};
use crate::error::{DynamicsError, Result};
use rand::Rng;

/// `(row, col)` coordinate on the lattice, both in `0..size`.
pub type Coord = (usize, usize);

/// Periodic `size × size` square lattice with a precomputed neighbour table.
///
/// Sites are indexed in row-major order: site `i` sits at
/// `(i / size, i % size)`. Every site has exactly four neighbours because both
/// axes wrap around (torus topology).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    /// Side length `N`.
    pub size: usize,
    /// Total number of sites (`size * size`).
    pub n_spins: usize,
    /// Neighbour table, length `n_spins * 4`. Element `i * 4 + k` is the
    /// `k`-th neighbour of site `i` in [`VON_NEUMANN`] order.
    neighbors: Vec<u32>,
}

impl Lattice {
    /// Build the torus of side `size`. Fails on `size == 0`.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(DynamicsError::EmptyLattice);
        }
        let n_spins = size * size;
        let mut neighbors = vec![0u32; n_spins * N_NEIGHBORS];

        for i in 0..n_spins {
            let (row, col) = (i / size, i % size);
            for (k, &(dr, dc)) in VON_NEUMANN.iter().enumerate() {
                let r = (row as isize + dr).rem_euclid(size as isize) as usize;
                let c = (col as isize + dc).rem_euclid(size as isize) as usize;
                neighbors[i * N_NEIGHBORS + k] = (r * size + c) as u32;
            }
        }

        Ok(Self {
            size,
            n_spins,
            neighbors,
        })
    }

    /// The `k`-th neighbour (`k < 4`) of site `site`.
    #[inline]
    pub fn neighbor(&self, site: usize, k: usize) -> usize {
        self.neighbors[site * N_NEIGHBORS + k] as usize
    }

    /// All four neighbours of `site` in canonical order.
    #[inline]
    pub fn neighbors(&self, site: usize) -> [usize; N_NEIGHBORS] {
        let base = site * N_NEIGHBORS;
        [
            self.neighbors[base] as usize,
            self.neighbors[base + 1] as usize,
            self.neighbors[base + 2] as usize,
            self.neighbors[base + 3] as usize,
        ]
    }

    /// Coordinate form of [`Lattice::neighbors`]:
    /// `(row+1, col)`, `(row-1, col)`, `(row, col+1)`, `(row, col-1)`, wrapped.
    pub fn neighbors_of(&self, pos: Coord) -> [Coord; N_NEIGHBORS] {
        self.neighbors(self.index(pos)).map(|j| self.coord(j))
    }

    #[inline]
    pub fn coord(&self, site: usize) -> Coord {
        (site / self.size, site % self.size)
    }

    #[inline]
    pub fn index(&self, (row, col): Coord) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    /// Draw a uniform site: row first, then column.
    #[inline]
    pub fn random_site<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let row = rng.gen_range(0..self.size);
        let col = rng.gen_range(0..self.size);
        row * self.size + col
    }
}
