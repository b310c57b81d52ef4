mod utils;
pub mod wolff;

pub use utils::{UNVISITED, VISITED};
pub use wolff::{bond_probability, grow_cluster, wolff_step};
