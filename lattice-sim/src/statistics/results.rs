/// Observables averaged over the measurement sweeps of one replica (or, after
/// [`SweepResult::aggregate`], over several replicas).
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    /// ⟨m⟩, the mean magnetization per spin.
    pub mags: f64,
    /// ⟨|m|⟩.
    pub abs_mags: f64,
    /// ⟨m²⟩.
    pub mags2: f64,
    /// ⟨m⁴⟩.
    pub mags4: f64,
    /// ⟨E⟩, the mean energy per spin.
    pub energies: f64,
    /// ⟨E²⟩.
    pub energies2: f64,
    /// Mean Wolff cluster size as a fraction of `N²`. `None` for the other
    /// dynamics.
    pub cluster_fraction: Option<f64>,
    /// Sokal integrated autocorrelation time of m². `None` unless
    /// `autocorrelation_max_lag` was set.
    pub mags2_tau: Option<f64>,
    /// Number of measurement sweeps recorded.
    pub n_samples: usize,
}

impl SweepResult {
    /// Binder cumulant `1 - ⟨m⁴⟩ / (3 ⟨m²⟩²)`; zero when ⟨m²⟩ vanishes.
    pub fn binder_cumulant(&self) -> f64 {
        if self.mags2 == 0.0 {
            return 0.0;
        }
        1.0 - self.mags4 / (3.0 * self.mags2 * self.mags2)
    }

    /// Average [`SweepResult`]s across independent replicas.
    ///
    /// Optional fields are averaged over the replicas that report them.
    /// `results` must be non-empty.
    pub fn aggregate(results: &[Self]) -> Self {
        let n = results.len() as f64;
        let mean = |f: fn(&Self) -> f64| results.iter().map(f).sum::<f64>() / n;
        let mean_opt = |f: fn(&Self) -> Option<f64>| {
            let vals: Vec<f64> = results.iter().filter_map(f).collect();
            if vals.is_empty() {
                None
            } else {
                Some(vals.iter().sum::<f64>() / vals.len() as f64)
            }
        };

        SweepResult {
            mags: mean(|r| r.mags),
            abs_mags: mean(|r| r.abs_mags),
            mags2: mean(|r| r.mags2),
            mags4: mean(|r| r.mags4),
            energies: mean(|r| r.energies),
            energies2: mean(|r| r.energies2),
            cluster_fraction: mean_opt(|r| r.cluster_fraction),
            mags2_tau: mean_opt(|r| r.mags2_tau),
            n_samples: results.iter().map(|r| r.n_samples).sum(),
        }
    }
}
