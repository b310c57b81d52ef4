use std::sync::atomic::AtomicBool;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use lattice_sim::{run_sweep_parallel, Dynamics, Replica, SimConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const L: usize = 128;
const N_SWEEPS: usize = 200;
const N_REPLICAS: usize = 8;

fn main() -> lattice_sim::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let runs = [
        (Dynamics::Glauber, 0.44),
        (Dynamics::Kawasaki, 0.6),
        (Dynamics::Wolff, 0.44),
        (Dynamics::Voter, 0.01),
    ];

    println!("Lattice: {L}x{L}  |  Replicas: {N_REPLICAS}  |  Sweeps: {N_SWEEPS}");
    println!("{}", "-".repeat(70));

    let interrupted = AtomicBool::new(false);
    for (dynamics, parameter) in runs {
        let mut config = SimConfig::new(dynamics, L, parameter, N_SWEEPS);
        config.warmup_sweeps = N_SWEEPS / 4;
        config.autocorrelation_max_lag = Some(50);

        let mut replicas = (0..N_REPLICAS)
            .map(|r| Replica::new(&config, 42 + r as u64))
            .collect::<lattice_sim::Result<Vec<_>>>()?;

        let pb = ProgressBar::new((N_SWEEPS * N_REPLICAS) as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        ) {
            pb.set_style(style.progress_chars("=> "));
        }
        pb.set_message(dynamics.name());

        let t0 = Instant::now();
        let result = run_sweep_parallel(&mut replicas, &config, &interrupted, &|| pb.inc(1))?;
        pb.finish_and_clear();
        let elapsed = t0.elapsed().as_secs_f64();

        info!(
            dynamics = dynamics.name(),
            abs_mags = result.abs_mags,
            energies = result.energies,
            binder = result.binder_cumulant(),
            tau = result.mags2_tau,
            "measured"
        );
        let per_sweep = elapsed / N_SWEEPS as f64 * 1000.0;
        println!(
            "{:<10} Total: {:.3} s  |  {:.3} ms/sweep",
            dynamics.name(),
            elapsed,
            per_sweep
        );
    }
    Ok(())
}
