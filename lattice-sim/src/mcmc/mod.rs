pub mod glauber;
pub mod kawasaki;
pub mod voter;

pub use glauber::glauber_sweep;
pub use kawasaki::{kawasaki_sweep, ConservedLattice};
pub use voter::voter_sweep;
