//! Seeded random source shared by every generation algorithm.
//!
//! A [`SeededRandomSource`] wraps a [`StdRng`] and exposes exactly the draws the
//! generators need: Gaussian perturbations, binomial shot counts and a
//! multinomial split. Two sources built from the same seed and asked for the
//! same sequence of draws return bit-identical values.
//!
//! The source is always passed explicitly into a generation call. Nothing in
//! this crate keeps one in a global.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Binomial, Distribution, Normal};

use crate::error::{Error, Result};

/// Tolerance on `sum(probabilities) == 1` for [`SeededRandomSource::multinomial`].
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-9;

/// Deterministically reseedable pseudo-random source.
#[derive(Debug, Clone)]
pub struct SeededRandomSource {
    rng: StdRng,
}

impl SeededRandomSource {
    /// Create a source from `seed`, or from OS entropy when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Create a deterministic source.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Reset to the state derived from `seed`. `None` leaves the cursor where it is.
    pub fn reseed(&mut self, seed: Option<u64>) {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }
    }

    /// Zero-mean Gaussian draw with standard deviation `std_dev`.
    ///
    /// `std_dev == 0.0` returns `0.0` without consuming the stream.
    pub fn gaussian(&mut self, std_dev: f64) -> Result<f64> {
        if std_dev == 0.0 {
            return Ok(0.0);
        }
        let normal = Normal::new(0.0, std_dev).map_err(|e| {
            Error::Domain(format!("gaussian standard deviation {std_dev}: {e}"))
        })?;
        Ok(normal.sample(&mut self.rng))
    }

    /// Number of successes in `trials` Bernoulli trials at `probability`.
    ///
    /// The caller clips `probability` to `[0, 1]`; anything else is a
    /// [`Error::Domain`].
    pub fn binomial(&mut self, trials: u64, probability: f64) -> Result<u64> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::Domain(format!(
                "binomial probability {probability} outside [0, 1]"
            )));
        }
        let dist = Binomial::new(trials, probability)
            .map_err(|e| Error::Domain(format!("binomial({trials}, {probability}): {e}")))?;
        Ok(dist.sample(&mut self.rng))
    }

    /// One multinomial draw: how `trials` fall into `probabilities.len()`
    /// categories.
    ///
    /// Drawn as a chain of conditional binomials, so the returned counts are
    /// non-negative and always sum to `trials`. `probabilities` must be
    /// non-negative and sum to 1.
    pub fn multinomial(&mut self, trials: u64, probabilities: &[f64]) -> Result<Vec<u64>> {
        let Some((_, leading)) = probabilities.split_last() else {
            return Err(Error::Domain("multinomial needs at least one category".into()));
        };
        if let Some(bad) = probabilities
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0)
        {
            return Err(Error::Domain(format!(
                "multinomial probability {bad} is not a valid weight"
            )));
        }
        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(Error::Domain(format!(
                "multinomial probabilities sum to {total}, expected 1"
            )));
        }

        let mut counts = Vec::with_capacity(probabilities.len());
        let mut remaining = trials;
        let mut remaining_mass = 1.0_f64;
        for &p in leading {
            let count = if remaining == 0 || remaining_mass <= 0.0 {
                0
            } else {
                let conditional = (p / remaining_mass).clamp(0.0, 1.0);
                self.binomial(remaining, conditional)?
            };
            counts.push(count);
            remaining -= count;
            remaining_mass -= p;
        }
        counts.push(remaining);
        Ok(counts)
    }
}
