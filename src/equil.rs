//! Equilibration (burn-in) detection for Monte Carlo time series.

use crate::error::{Result, check_len};
use crate::stats::sample_variance;

/// Compute the optimal equilibration index using the marginal standard error rule.
///
/// Candidate cut points are `n / 2^k`, from the start of the series up to its middle.
/// The one minimizing `var * (n - 1) / n^2` of the remaining `n` values is chosen,
/// defaulting to the middle of the series.
pub fn equilibration_index(time_series: &[f64]) -> Result<usize> {
    check_len(time_series, 1)?;

    let n_vals = time_series.len();
    let mut min_mse = f64::INFINITY;
    let mut opt_i_equil = n_vals / 2;

    let n_idxs = n_vals.ilog2() + 1;
    let i_equils = (0..n_idxs).map(|idx| n_vals / 2_usize.pow(n_idxs - idx));

    for i_equil in i_equils {
        let aux_time_series = &time_series[i_equil..];
        let n_vals = aux_time_series.len();
        if n_vals < 2 {
            continue;
        }

        let var = sample_variance(aux_time_series)?;
        let mse = var * (n_vals - 1) as f64 / n_vals.pow(2) as f64;

        if mse < min_mse {
            min_mse = mse;
            opt_i_equil = i_equil;
        }
    }
    log::debug!("equilibration index is {opt_i_equil} of {n_vals}");

    Ok(opt_i_equil)
}

/// Whether an equilibration index was found before the middle of the series.
pub fn is_equilibrated(i_equil: usize, n_vals: usize) -> bool {
    i_equil != n_vals / 2
}
