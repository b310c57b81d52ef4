pub mod analysis;
pub mod clusters;
pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod parallel;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use config::{Dynamics, SimConfig};
pub use error::{DynamicsError, Result};
pub use geometry::{Coord, Lattice};
pub use mcmc::ConservedLattice;
pub use simulation::{run_sweep_loop, run_sweep_parallel, Replica, ReplicaState};
pub use spins::SpinGrid;
pub use statistics::SweepResult;
