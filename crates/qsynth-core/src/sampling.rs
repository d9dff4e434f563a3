//! Noisy sampling step shared by every generator.
//!
//! **All** noise is applied here. Generators compute a theoretical value and
//! hand it to this module; nothing else in the crate perturbs, clips or
//! shot-samples a value.
//!
//! ```text
//! theory → + N(0, noise_rate) → clip → Binomial(shots, p) → counts
//! ```

use crate::error::Result;
use crate::source::SeededRandomSource;

/// Outcome of shot-sampling one probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSample {
    /// Shots that reported `1`.
    pub ones: u64,
    /// Shots that reported `0`.
    pub zeros: u64,
    /// `ones / shots`.
    pub fraction: f64,
}

/// Evenly spaced grid of `steps` points over `[0, time_max]`, both ends included.
pub fn time_grid(time_max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let last = (n - 1) as f64;
            (0..n).map(|i| time_max * (i as f64 / last)).collect()
        }
    }
}

/// Clip to a probability.
pub fn clip_probability(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}

/// Clip to a correlation.
pub fn clip_correlation(c: f64) -> f64 {
    c.clamp(-1.0, 1.0)
}

/// Perturb a theoretical probability, clip it and draw `shots` binary trials.
///
/// Draw order is fixed: one Gaussian (skipped when `noise_rate == 0`), then one
/// binomial.
pub fn sample_probability(
    source: &mut SeededRandomSource,
    theory: f64,
    noise_rate: f64,
    shots: u64,
) -> Result<ShotSample> {
    let noisy = clip_probability(theory + source.gaussian(noise_rate)?);
    let ones = source.binomial(shots, noisy)?;
    Ok(ShotSample {
        ones,
        zeros: shots - ones,
        fraction: ones as f64 / shots as f64,
    })
}

/// Perturb a theoretical two-qubit correlation and clip it to `[-1, 1]`.
pub fn perturb_correlation(
    source: &mut SeededRandomSource,
    theory: f64,
    noise_rate: f64,
) -> Result<f64> {
    Ok(clip_correlation(theory + source.gaussian(noise_rate)?))
}

/// Mean squared error between two equally long series.
pub fn mean_squared_error(measured: &[f64], theory: &[f64]) -> f64 {
    if measured.is_empty() {
        return 0.0;
    }
    let sum: f64 = measured
        .iter()
        .zip(theory)
        .map(|(m, t)| (m - t).powi(2))
        .sum();
    sum / measured.len() as f64
}
