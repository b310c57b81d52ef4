pub mod energy;
pub mod init;

use crate::error::{DynamicsError, Result};
use crate::geometry::Lattice;

/// Spin configuration on a periodic square lattice.
///
/// Owns its [`Lattice`] geometry and a row-major `Vec<i8>` of `N²` spins.
/// Every constructor checks that each cell is exactly `+1` or `-1`, and the
/// only mutators are [`SpinGrid::flip`] and [`SpinGrid::set`] (which takes a
/// sign), so the invariant holds for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinGrid {
    lattice: Lattice,
    spins: Vec<i8>,
}

impl SpinGrid {
    /// Uniformly aligned grid with every spin equal to `sign(spin)`.
    pub fn aligned(size: usize, spin: i8) -> Result<Self> {
        let lattice = Lattice::new(size)?;
        let value = if spin < 0 { -1 } else { 1 };
        let spins = vec![value; lattice.n_spins];
        Ok(Self { lattice, spins })
    }

    /// Wrap an existing row-major buffer of `size * size` spins.
    pub fn from_spins(size: usize, spins: Vec<i8>) -> Result<Self> {
        let lattice = Lattice::new(size)?;
        if spins.len() != lattice.n_spins {
            return Err(DynamicsError::ShapeMismatch {
                expected: lattice.n_spins,
                actual: spins.len(),
            });
        }
        if let Some((index, &value)) = spins.iter().enumerate().find(|(_, &s)| s != 1 && s != -1)
        {
            return Err(DynamicsError::InvalidSpin { index, value });
        }
        Ok(Self { lattice, spins })
    }

    /// Build from nested rows. All rows must have the same length as there
    /// are rows.
    pub fn from_rows(rows: &[Vec<i8>]) -> Result<Self> {
        let size = rows.len();
        let spins: Vec<i8> = rows.iter().flatten().copied().collect();
        if let Some(row) = rows.iter().find(|r| r.len() != size) {
            return Err(DynamicsError::ShapeMismatch {
                expected: size * size,
                actual: row.len() * size,
            });
        }
        Self::from_spins(size, spins)
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Side length `N`.
    #[inline]
    pub fn size(&self) -> usize {
        self.lattice.size
    }

    #[inline]
    pub fn n_spins(&self) -> usize {
        self.lattice.n_spins
    }

    #[inline]
    pub fn get(&self, site: usize) -> i8 {
        self.spins[site]
    }

    #[inline]
    pub fn flip(&mut self, site: usize) {
        self.spins[site] = -self.spins[site];
    }

    /// Set `site` to `+1` when `spin >= 0`, `-1` otherwise.
    #[inline]
    pub fn set(&mut self, site: usize, spin: i8) {
        self.spins[site] = if spin < 0 { -1 } else { 1 };
    }

    #[inline]
    pub fn as_slice(&self) -> &[i8] {
        &self.spins
    }

    /// Total magnetization: (#up) - (#down).
    pub fn magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    pub fn count_up(&self) -> usize {
        self.spins.iter().filter(|&&s| s == 1).count()
    }

    /// Spins mapped to occupation fractions `(s + 1) / 2` in `{0, 1}`.
    pub fn occupancy_field(&self) -> Vec<f64> {
        self.spins.iter().map(|&s| (s as f64 + 1.0) * 0.5).collect()
    }

    /// Flip every site where `marker` is `-1`.
    pub(crate) fn apply_marker(&mut self, marker: &[i8]) {
        for (s, &m) in self.spins.iter_mut().zip(marker.iter()) {
            *s *= m;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spins_validates() {
        assert_eq!(
            SpinGrid::from_spins(2, vec![1, -1, 1]),
            Err(DynamicsError::ShapeMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            SpinGrid::from_spins(2, vec![1, -1, 0, 1]),
            Err(DynamicsError::InvalidSpin { index: 2, value: 0 })
        );
        assert_eq!(
            SpinGrid::from_spins(0, vec![]),
            Err(DynamicsError::EmptyLattice)
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![1, 1], vec![1]];
        assert!(matches!(
            SpinGrid::from_rows(&rows),
            Err(DynamicsError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_magnetization_and_field() {
        let grid = SpinGrid::from_rows(&[vec![1, -1], vec![1, 1]]).unwrap();
        assert_eq!(grid.magnetization(), 2);
        assert_eq!(grid.count_up(), 3);
        assert_eq!(grid.occupancy_field(), vec![1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_set_and_flip_keep_signs() {
        let mut grid = SpinGrid::aligned(2, 1).unwrap();
        grid.set(0, -5);
        grid.flip(1);
        grid.set(2, 0);
        assert_eq!(grid.as_slice(), &[-1, -1, 1, 1]);
    }
}
