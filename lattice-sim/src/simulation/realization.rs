use crate::config::{Dynamics, SimConfig};
use crate::error::Result;
use crate::mcmc::ConservedLattice;
use crate::spins::{init, SpinGrid};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Lattice state evolved by one dynamics.
#[derive(Debug, Clone)]
pub enum ReplicaState {
    /// Plain spin grid (Glauber, Wolff, voter).
    Free(SpinGrid),
    /// Grid with up/down occupancy lists (Kawasaki).
    Conserved(ConservedLattice),
}

/// One independent Markov chain: its lattice state and its own PRNG.
#[derive(Debug, Clone)]
pub struct Replica {
    pub state: ReplicaState,
    pub rng: Xoshiro256StarStar,
}

impl Replica {
    /// Build the starting configuration for `config.dynamics`, seeding the
    /// replica's generator with `seed`.
    ///
    /// With `config.magnetization` set, the start is a shuffled configuration
    /// of exactly that magnetization. Otherwise Glauber starts aligned up,
    /// Wolff from independent random spins, the voter model from a coin-chosen
    /// aligned state and Kawasaki from a shuffled zero-magnetization state.
    pub fn new(config: &SimConfig, seed: u64) -> Result<Self> {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let size = config.size;

        let grid = match (config.magnetization, config.dynamics) {
            (Some(m), _) => init::random_with_magnetization(size, m, &mut rng)?,
            (None, Dynamics::Glauber) => init::aligned(size)?,
            (None, Dynamics::Wolff) => init::random_spins(size, &mut rng)?,
            (None, Dynamics::Voter) => init::random_aligned(size, &mut rng)?,
            (None, Dynamics::Kawasaki) => init::random_with_magnetization(size, 0.0, &mut rng)?,
        };

        let state = match config.dynamics {
            Dynamics::Kawasaki => ReplicaState::Conserved(ConservedLattice::new(grid)),
            _ => ReplicaState::Free(grid),
        };
        Ok(Self { state, rng })
    }

    /// Current spin configuration.
    pub fn grid(&self) -> &SpinGrid {
        match &self.state {
            ReplicaState::Free(grid) => grid,
            ReplicaState::Conserved(state) => state.grid(),
        }
    }
}
