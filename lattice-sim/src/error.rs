//! Typed errors for lattice construction, dynamics and analysis.

use thiserror::Error;

/// Errors raised by lattice constructors, the Kawasaki engine, the
/// measurement loop and the analysis helpers.
///
/// Monte Carlo rejection is never an error; every variant here is either a
/// precondition violation or a broken internal invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DynamicsError {
    /// Lattice side length of zero.
    #[error("lattice size must be >= 1")]
    EmptyLattice,

    /// Flat spin buffer does not hold exactly N² cells.
    #[error("expected {expected} spins for a square lattice, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A cell holds something other than +1 or -1.
    #[error("spin at site {index} is {value}, expected +1 or -1")]
    InvalidSpin { index: usize, value: i8 },

    /// Conserved exchange needs at least one site of each sign.
    #[error("conserved exchange needs both spin species (up: {n_up}, down: {n_down})")]
    OccupancyExhausted { n_up: usize, n_down: usize },

    /// Supplied occupancy lists do not partition the lattice.
    #[error("occupancy lists disagree with the lattice at site {index}")]
    OccupancyMismatch { index: usize },

    /// Pair-exchange energy difference outside the precomputed table.
    #[error("exchange energy difference {delta} outside acceptance table 1..=16")]
    AcceptanceOutOfRange { delta: i32 },

    /// Target magnetization outside [-1, 1].
    #[error("magnetization must lie in [-1, 1], got {0}")]
    InvalidMagnetization(f64),

    /// Field too small to compare at least two block scales.
    #[error("field of {rows}x{cols} cells is too small for scaling analysis")]
    FieldTooSmall { rows: usize, cols: usize },

    /// Scaling index evaluated on fewer than two scales, or on mismatched
    /// unit-size and value slices.
    #[error("scaling index needs at least two matching scales, got {units} unit sizes and {values} values")]
    TooFewScales { units: usize, values: usize },

    /// `SimConfig` failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The caller raised the interrupt flag.
    #[error("interrupted")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, DynamicsError>;
