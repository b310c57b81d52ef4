pub mod lattice;
pub mod offsets;

pub use lattice::{Coord, Lattice};
pub use offsets::{N_NEIGHBORS, VON_NEUMANN};
