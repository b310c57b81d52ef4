/// Streaming autocorrelation accumulator using a ring buffer.
///
/// Computes the normalized autocorrelation function Γ(δ) of a scalar time
/// series without storing the full history. Memory is O(max_lag).
#[derive(Debug, Clone)]
pub struct AutocorrAccum {
    max_lag: usize,
    /// Ring buffer of the most recent `max_lag` values.
    ring: Vec<f64>,
    sum_o: f64,
    sum_o2: f64,
    /// Running sum of o(t)·o(t−δ), length `max_lag + 1`.
    sum_prod: Vec<f64>,
    n_recorded: usize,
    ring_pos: usize,
}

impl AutocorrAccum {
    /// `max_lag` must be at least 1.
    pub fn new(max_lag: usize) -> Self {
        let max_lag = max_lag.max(1);
        Self {
            max_lag,
            ring: vec![0.0; max_lag],
            sum_o: 0.0,
            sum_o2: 0.0,
            sum_prod: vec![0.0; max_lag + 1],
            n_recorded: 0,
            ring_pos: 0,
        }
    }

    pub fn push(&mut self, o: f64) {
        let ml = self.max_lag;
        let pos = self.ring_pos;
        self.sum_o += o;
        self.sum_o2 += o * o;

        // Lag 0 pairs the value with itself; older values sit behind `pos`.
        self.sum_prod[0] += o * o;
        let n_back = self.n_recorded.min(ml);
        for delta in 1..=n_back {
            let idx = (pos + ml - delta) % ml;
            self.sum_prod[delta] += o * self.ring[idx];
        }

        self.ring[pos] = o;
        self.n_recorded += 1;
        self.ring_pos = (pos + 1) % ml;
    }

    pub fn n_recorded(&self) -> usize {
        self.n_recorded
    }

    /// Γ(δ) for δ in `0..=max_lag`. Γ(0) = 1; a constant series gives zeros
    /// beyond lag 0.
    pub fn finish(&self) -> Vec<f64> {
        let m = self.n_recorded as f64;
        let mean = if self.n_recorded > 0 { self.sum_o / m } else { 0.0 };
        let var = if self.n_recorded > 0 {
            self.sum_o2 / m - mean * mean
        } else {
            0.0
        };
        (0..=self.max_lag)
            .map(|delta| {
                let count = self.n_recorded.saturating_sub(delta) as f64;
                if count <= 0.0 || var <= 0.0 {
                    return if delta == 0 { 1.0 } else { 0.0 };
                }
                (self.sum_prod[delta] / count - mean * mean) / var
            })
            .collect()
    }
}

/// Integrated autocorrelation time with Sokal's self-consistent window
/// (stop at the first `W >= 5 τ(W)`).
pub fn sokal_tau(gamma: &[f64]) -> f64 {
    let mut tau = 0.5;
    for (w, &g) in gamma.iter().enumerate().skip(1) {
        tau += g;
        if w as f64 >= 5.0 * tau {
            return tau;
        }
    }
    tau
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_series() {
        let mut acc = AutocorrAccum::new(2);
        for t in 0..1000 {
            acc.push(if t % 2 == 0 { 1.0 } else { -1.0 });
        }
        let gamma = acc.finish();
        assert!((gamma[0] - 1.0).abs() < 1e-9);
        assert!((gamma[1] + 1.0).abs() < 1e-9);
        assert!((gamma[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_direct_computation() {
        let series: Vec<f64> = (0..200).map(|t| ((t * 37 % 11) as f64).sin()).collect();
        let max_lag = 5;
        let mut acc = AutocorrAccum::new(max_lag);
        for &v in &series {
            acc.push(v);
        }
        let gamma = acc.finish();

        let n = series.len() as f64;
        let mean = series.iter().sum::<f64>() / n;
        let var = series.iter().map(|v| v * v).sum::<f64>() / n - mean * mean;
        for delta in 0..=max_lag {
            let pairs = series.len() - delta;
            let prod: f64 = (delta..series.len())
                .map(|t| series[t] * series[t - delta])
                .sum();
            let expected = (prod / pairs as f64 - mean * mean) / var;
            assert!((gamma[delta] - expected).abs() < 1e-9, "lag {delta}");
        }
    }

    #[test]
    fn test_constant_series() {
        let mut acc = AutocorrAccum::new(3);
        for _ in 0..10 {
            acc.push(0.25);
        }
        assert_eq!(acc.finish(), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(sokal_tau(&acc.finish()), 0.5);
    }

    #[test]
    fn test_sokal_window() {
        // Γ(δ) = 0.5^δ gives τ → 0.5 + 1 = 1.5 and stops once w >= 5τ.
        let gamma: Vec<f64> = (0..40).map(|d| 0.5f64.powi(d)).collect();
        let tau = sokal_tau(&gamma);
        assert!((tau - 1.5).abs() < 1e-2);
    }
}
