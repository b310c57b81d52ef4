//! Multi-scale aggregation of a 2-D field and the scaling index built on it.
//!
//! A field holds fractions in `[0, 1]` (for a spin grid, the `+1`
//! occupancy). Coarse-graining it into larger blocks and tracking how a
//! statistic such as the standard deviation decays with block area tells
//! clustered configurations apart from uncorrelated ones.

use crate::error::{DynamicsError, Result};
use crate::spins::SpinGrid;

/// Row-major 2-D array of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f64>,
}

impl Field {
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(DynamicsError::ShapeMismatch {
                expected: rows * cols,
                actual: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }
}

impl From<&SpinGrid> for Field {
    /// `1.0` where the spin is `+1`, `0.0` elsewhere.
    fn from(grid: &SpinGrid) -> Self {
        Self {
            rows: grid.size(),
            cols: grid.size(),
            values: grid.occupancy_field(),
        }
    }
}

/// Block means over non-overlapping `scale × scale` tiles.
///
/// Tiles on the bottom and right borders may be partial; their mean is over
/// the cells they actually cover. Output is `ceil(rows / scale) ×
/// ceil(cols / scale)`.
pub fn scale_data(field: &Field, scale: usize) -> Field {
    let scale = scale.max(1);
    let out_rows = field.rows.div_ceil(scale);
    let out_cols = field.cols.div_ceil(scale);
    let mut values = Vec::with_capacity(out_rows * out_cols);

    for bi in 0..out_rows {
        let r0 = bi * scale;
        let r1 = (r0 + scale).min(field.rows);
        for bj in 0..out_cols {
            let c0 = bj * scale;
            let c1 = (c0 + scale).min(field.cols);
            let mut sum = 0.0;
            for r in r0..r1 {
                for c in c0..c1 {
                    sum += field.get(r, c);
                }
            }
            values.push(sum / ((r1 - r0) * (c1 - c0)) as f64);
        }
    }

    Field {
        rows: out_rows,
        cols: out_cols,
        values,
    }
}

/// Periodic moving average with a `scale × scale` window.
///
/// The output has the input's shape. The window for cell `(i, j)` starts at
/// `(i - scale / 2, j - scale / 2)` and wraps around both edges.
pub fn scale_data_wrapped(field: &Field, scale: usize) -> Field {
    let scale = scale.max(1);
    let (rows, cols) = (field.rows, field.cols);
    let half = scale / 2;
    let norm = (scale * scale) as f64;
    let mut values = Vec::with_capacity(rows * cols);

    for i in 0..rows {
        for j in 0..cols {
            let mut sum = 0.0;
            for di in 0..scale {
                let r = (i + rows * scale + di - half) % rows;
                for dj in 0..scale {
                    let c = (j + cols * scale + dj - half) % cols;
                    sum += field.get(r, c);
                }
            }
            values.push(sum / norm);
        }
    }

    Field { rows, cols, values }
}

/// Population standard deviation of the field's values.
pub fn std_dev(field: &Field) -> f64 {
    let n = field.values.len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mean = field.values.iter().sum::<f64>() / n;
    let var = field.values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    var.sqrt()
}

/// Evaluate `analysis` on [`scale_data`] at scales `1, 2, 4, …` while the
/// scale stays below `2^floor(log2(min(rows, cols)))`.
///
/// Returns the unit sizes (`scale²`) and the values normalised by the first
/// one. If the first value is zero the curve is `[1, 0, 0, …]`.
pub fn auto_scale(
    field: &Field,
    analysis: impl Fn(&Field) -> f64,
) -> Result<(Vec<usize>, Vec<f64>)> {
    let min_side = field.rows.min(field.cols);
    let n_scales = if min_side == 0 { 0 } else { min_side.ilog2() as usize };
    if n_scales < 2 {
        return Err(DynamicsError::FieldTooSmall {
            rows: field.rows,
            cols: field.cols,
        });
    }

    let scales: Vec<usize> = (0..n_scales).map(|k| 1 << k).collect();
    let vals: Vec<f64> = scales
        .iter()
        .map(|&s| analysis(&scale_data(field, s)))
        .collect();

    let rel_vals = if vals[0] != 0.0 {
        vals.iter().map(|v| v / vals[0]).collect()
    } else {
        let mut rel = vec![0.0; vals.len()];
        rel[0] = 1.0;
        rel
    };
    let unit_sizes = scales.iter().map(|s| s * s).collect();
    Ok((unit_sizes, rel_vals))
}

fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) * 0.5)
        .sum()
}

/// Compare a normalised aggregation curve with the uncorrelated baseline
/// `1/sqrt(unit)`.
///
/// The area under `values` is mapped to `[-1, 0]` between the minimal curve
/// (`1` at the first unit, `0` after) and the baseline, or to `[0, 1]`
/// between the baseline and the constant curve (area `last unit - 1`).
/// Negative values mean faster decay than random, positive values slower
/// (clustering).
pub fn scaling_index(unit_sizes: &[usize], values: &[f64]) -> Result<f64> {
    if unit_sizes.len() < 2 || unit_sizes.len() != values.len() {
        return Err(DynamicsError::TooFewScales {
            units: unit_sizes.len(),
            values: values.len(),
        });
    }
    let units: Vec<f64> = unit_sizes.iter().map(|&u| u as f64).collect();

    let mut min_vals = vec![0.0; units.len()];
    min_vals[0] = 1.0;
    let minimal_area = trapezoid(&min_vals, &units);
    let maximal_area = units[units.len() - 1] - 1.0;
    let baseline: Vec<f64> = units.iter().map(|u| 1.0 / u.sqrt()).collect();
    let baseline_area = trapezoid(&baseline, &units);
    let data_area = trapezoid(values, &units);

    let index = if data_area < baseline_area {
        (data_area - minimal_area) / (baseline_area - minimal_area) - 1.0
    } else {
        (data_area - baseline_area) / (maximal_area - baseline_area)
    };
    Ok(index)
}
