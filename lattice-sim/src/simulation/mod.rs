pub mod realization;

pub use realization::{Replica, ReplicaState};

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{Dynamics, SimConfig};
use crate::error::{DynamicsError, Result};
use crate::parallel::par_over_replicas;
use crate::spins::energy::energy_per_spin;
use crate::statistics::{sokal_tau, AutocorrAccum, Statistics, SweepResult};
use crate::{clusters, mcmc};
use tracing::{debug, warn};
use validator::Validate;

/// Advance `replica` by one sweep of `config.dynamics`.
///
/// Returns the Wolff cluster size for Wolff dynamics, `None` otherwise.
fn sweep_once(replica: &mut Replica, config: &SimConfig) -> Result<Option<usize>> {
    let Replica { state, rng } = replica;
    match (state, config.dynamics) {
        (ReplicaState::Free(grid), Dynamics::Glauber) => {
            mcmc::glauber_sweep(grid, config.parameter, rng);
            Ok(None)
        }
        (ReplicaState::Free(grid), Dynamics::Wolff) => {
            Ok(Some(clusters::wolff_step(grid, config.parameter, rng)))
        }
        (ReplicaState::Free(grid), Dynamics::Voter) => {
            mcmc::voter_sweep(grid, config.parameter, rng);
            Ok(None)
        }
        (ReplicaState::Conserved(lattice), Dynamics::Kawasaki) => {
            mcmc::kawasaki_sweep(lattice, config.parameter, rng)?;
            Ok(None)
        }
        (_, dynamics) => Err(DynamicsError::InvalidConfig(format!(
            "replica state does not match dynamics '{}'",
            dynamics.name()
        ))),
    }
}

/// Run the full Monte Carlo loop (warmup + measurement) for one [`Replica`].
///
/// Each of the `n_sweeps` iterations performs one sweep of the configured
/// dynamics (one cluster flip for Wolff) and, after `warmup_sweeps`, records
/// the per-spin magnetization and energy moments.
///
/// `on_sweep` is called once per sweep (useful for progress bars). The
/// `interrupted` flag is polled before every sweep.
pub fn run_sweep_loop(
    replica: &mut Replica,
    config: &SimConfig,
    interrupted: &AtomicBool,
    on_sweep: &(dyn Fn() + Sync),
) -> Result<SweepResult> {
    config
        .validate()
        .map_err(|e| DynamicsError::InvalidConfig(format!("{e}")))?;
    if replica.grid().size() != config.size {
        return Err(DynamicsError::ShapeMismatch {
            expected: config.size * config.size,
            actual: replica.grid().n_spins(),
        });
    }

    let n_spins = replica.grid().n_spins() as f64;
    let n_sweeps = config.n_sweeps;
    let warmup_sweeps = config.warmup_sweeps;

    let mut mags_stat = Statistics::new(1);
    let mut abs_mags_stat = Statistics::new(1);
    let mut mags2_stat = Statistics::new(2);
    let mut mags4_stat = Statistics::new(4);
    let mut energies_stat = Statistics::new(1);
    let mut energies2_stat = Statistics::new(2);
    let mut cluster_stat = Statistics::new(1);
    let mut m2_accum = config.autocorrelation_max_lag.map(AutocorrAccum::new);

    debug!(
        dynamics = config.dynamics.name(),
        size = config.size,
        parameter = config.parameter,
        n_sweeps,
        warmup_sweeps,
        "starting sweep loop"
    );

    for sweep_id in 0..n_sweeps {
        if interrupted.load(Ordering::Relaxed) {
            warn!(sweep_id, "sweep loop interrupted");
            return Err(DynamicsError::Interrupted);
        }
        on_sweep();

        let cluster_size = sweep_once(replica, config)?;
        if sweep_id < warmup_sweeps {
            continue;
        }

        let grid = replica.grid();
        let m = grid.magnetization() as f64 / n_spins;
        let e = energy_per_spin(grid);

        mags_stat.update(m);
        abs_mags_stat.update(m.abs());
        mags2_stat.update(m);
        mags4_stat.update(m);
        energies_stat.update(e);
        energies2_stat.update(e);
        if let Some(size) = cluster_size {
            cluster_stat.update(size as f64 / n_spins);
        }
        if let Some(acc) = m2_accum.as_mut() {
            acc.push(m * m);
        }
    }

    let mags2_tau = m2_accum.as_ref().map(|acc| sokal_tau(&acc.finish()));
    let result = SweepResult {
        mags: mags_stat.average(),
        abs_mags: abs_mags_stat.average(),
        mags2: mags2_stat.average(),
        mags4: mags4_stat.average(),
        energies: energies_stat.average(),
        energies2: energies2_stat.average(),
        cluster_fraction: (config.dynamics == Dynamics::Wolff).then(|| cluster_stat.average()),
        mags2_tau,
        n_samples: mags_stat.count,
    };
    debug!(
        final_magnetization = replica.grid().magnetization(),
        mags = result.mags,
        energies = result.energies,
        n_samples = result.n_samples,
        "sweep loop finished"
    );
    Ok(result)
}

/// Run the sweep loop over several independent replicas.
///
/// Each replica is processed by [`run_sweep_loop`], then results are
/// averaged via [`SweepResult::aggregate`]. A single replica (or
/// `config.sequential`) runs on the calling thread.
pub fn run_sweep_parallel(
    replicas: &mut [Replica],
    config: &SimConfig,
    interrupted: &AtomicBool,
    on_sweep: &(dyn Fn() + Sync),
) -> Result<SweepResult> {
    if replicas.is_empty() {
        return Err(DynamicsError::InvalidConfig(
            "at least one replica is required".to_string(),
        ));
    }
    if replicas.len() == 1 {
        return run_sweep_loop(&mut replicas[0], config, interrupted, on_sweep);
    }

    let results = par_over_replicas(replicas, config.sequential, |replica| {
        run_sweep_loop(replica, config, interrupted, on_sweep)
    });
    let results: Vec<SweepResult> = results.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(SweepResult::aggregate(&results))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_op() {}

    #[test]
    fn test_zero_temperature_glauber_stays_ordered() {
        // β large: starting aligned, no move can raise the energy.
        let mut config = SimConfig::new(Dynamics::Glauber, 8, 50.0, 20);
        config.warmup_sweeps = 5;
        let mut replica = Replica::new(&config, 1).unwrap();
        let result = run_sweep_loop(&mut replica, &config, &AtomicBool::new(false), &no_op).unwrap();
        assert_eq!(result.n_samples, 15);
        assert_eq!(result.mags, 1.0);
        assert_eq!(result.mags4, 1.0);
        assert_eq!(result.energies, -2.0);
        assert_eq!(result.energies2, 4.0);
        assert_eq!(result.cluster_fraction, None);
    }

    #[test]
    fn test_interrupt_flag() {
        let config = SimConfig::new(Dynamics::Voter, 4, 0.1, 10);
        let mut replica = Replica::new(&config, 1).unwrap();
        let err = run_sweep_loop(&mut replica, &config, &AtomicBool::new(true), &no_op);
        assert_eq!(err, Err(DynamicsError::Interrupted));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig::new(Dynamics::Glauber, 4, 0.4, 10);
        let mut replica = Replica::new(&config, 1).unwrap();
        let mut bad = config.clone();
        bad.warmup_sweeps = 11;
        let err = run_sweep_loop(&mut replica, &bad, &AtomicBool::new(false), &no_op);
        assert!(matches!(err, Err(DynamicsError::InvalidConfig(_))));
    }

    #[test]
    fn test_mismatched_state_rejected() {
        let config = SimConfig::new(Dynamics::Glauber, 4, 0.4, 10);
        let mut replica = Replica::new(&config, 1).unwrap();
        let kawasaki = SimConfig::new(Dynamics::Kawasaki, 4, 0.4, 10);
        let err = run_sweep_loop(&mut replica, &kawasaki, &AtomicBool::new(false), &no_op);
        assert!(matches!(err, Err(DynamicsError::InvalidConfig(_))));
    }
}
