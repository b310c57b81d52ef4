/// Number of nearest neighbours on the square lattice.
pub const N_NEIGHBORS: usize = 4;

/// Von Neumann neighbourhood offsets `(d_row, d_col)` in canonical order:
/// row+1, row-1, col+1, col-1.
///
/// Every algorithm that consumes random numbers while iterating over
/// neighbours (Wolff growth in particular) walks them in this order, so
/// changing it changes trajectories for a fixed seed.
pub const VON_NEUMANN: [(isize, isize); N_NEIGHBORS] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
