use crate::spins::init;
use validator::{Validate, ValidationError};

/// Lattice dynamics driven by the measurement loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dynamics {
    /// Single-spin flips with the Metropolis acceptance rule.
    Glauber,
    /// Magnetization-conserving pair exchange.
    Kawasaki,
    /// One Wolff cluster flip per sweep.
    Wolff,
    /// Noisy voter imitation.
    Voter,
}

impl Dynamics {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Glauber => "glauber",
            Self::Kawasaki => "kawasaki",
            Self::Wolff => "wolff",
            Self::Voter => "voter",
        }
    }
}

impl TryFrom<&str> for Dynamics {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "glauber" | "metropolis" => Ok(Self::Glauber),
            "kawasaki" => Ok(Self::Kawasaki),
            "wolff" => Ok(Self::Wolff),
            "voter" => Ok(Self::Voter),
            _ => Err(format!(
                "unknown dynamics '{s}', expected 'glauber', 'kawasaki', 'wolff' or 'voter'"
            )),
        }
    }
}

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.size < 1 {
        return Err(ValidationError::new("size must be >= 1"));
    }
    if cfg.n_sweeps < 1 {
        return Err(ValidationError::new("n_sweeps must be >= 1"));
    }
    if cfg.warmup_sweeps > cfg.n_sweeps {
        return Err(ValidationError::new("warmup_sweeps must be <= n_sweeps"));
    }
    if !cfg.parameter.is_finite() || cfg.parameter < 0.0 {
        return Err(ValidationError::new("parameter must be finite and >= 0"));
    }
    if cfg.dynamics == Dynamics::Voter && cfg.parameter > 1.0 {
        return Err(ValidationError::new(
            "voter noise probability must lie in [0, 1]",
        ));
    }
    if let Some(m) = cfg.magnetization {
        if !m.is_finite() || !(-1.0..=1.0).contains(&m) {
            return Err(ValidationError::new("magnetization must lie in [-1, 1]"));
        }
    }
    if cfg.dynamics == Dynamics::Kawasaki {
        let n_spins = cfg.size * cfg.size;
        let n_up = init::up_count(n_spins, cfg.magnetization.unwrap_or(0.0))
            .map_err(|_| ValidationError::new("magnetization must lie in [-1, 1]"))?;
        if n_up == 0 || n_up == n_spins {
            return Err(ValidationError::new(
                "kawasaki needs both spin species on the lattice",
            ));
        }
    }
    if cfg.autocorrelation_max_lag == Some(0) {
        return Err(ValidationError::new("autocorrelation_max_lag must be >= 1"));
    }
    Ok(())
}

/// Parameters for one measurement run.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    /// Lattice side length `N`.
    pub size: usize,
    pub dynamics: Dynamics,
    /// `β` for Glauber and Kawasaki, `kT` for Wolff, noise probability for
    /// the voter model.
    pub parameter: f64,
    pub n_sweeps: usize,
    pub warmup_sweeps: usize,
    /// Initial magnetization per spin. `None` picks the dynamics' default
    /// start (aligned for Glauber, random for Wolff, coin-aligned for voter,
    /// zero for Kawasaki).
    pub magnetization: Option<f64>,
    pub autocorrelation_max_lag: Option<usize>,
    /// Process replicas on the calling thread instead of the rayon pool.
    pub sequential: bool,
}

impl SimConfig {
    /// Config with no warm-up, default start and no autocorrelation.
    pub fn new(dynamics: Dynamics, size: usize, parameter: f64, n_sweeps: usize) -> Self {
        Self {
            size,
            dynamics,
            parameter,
            n_sweeps,
            warmup_sweeps: 0,
            magnetization: None,
            autocorrelation_max_lag: None,
            sequential: false,
        }
    }
}
