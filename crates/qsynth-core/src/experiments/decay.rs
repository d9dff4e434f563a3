//! T1 relaxation and T2 coherence decay, sampled as two parallel series.

use std::f64::consts::PI;

use crate::error::Result;
use crate::measurement::DecayPoint;
use crate::params::{DecayParams, ExperimentKind, ExperimentParameters};
use crate::result::{DecayStatistics, ExperimentResult, Measurements, Metadata, Statistics};
use crate::sampling::{ShotSample, sample_probability, time_grid};
use crate::source::SeededRandomSource;

/// Relative standard deviation of the synthetic "fitted" times.
pub const FIT_JITTER: f64 = 0.1;

/// Amplitude decay `exp(-t/t1)`.
pub fn t1_signal(t1: f64, t: f64) -> f64 {
    (-t / t1).exp()
}

/// Raw coherence `exp(-t/t1)·cos(π·t)·exp(-t/t2)` in `[-1, 1]`.
pub fn t2_oscillation(t1: f64, t2: f64, t: f64) -> f64 {
    t1_signal(t1, t) * (PI * t).cos() * (-t / t2).exp()
}

/// Coherence mapped to a probability via `(x + 1) / 2`.
pub fn t2_signal(t1: f64, t2: f64, t: f64) -> f64 {
    (t2_oscillation(t1, t2, t) + 1.0) / 2.0
}

fn point(time: f64, theory: f64, sample: ShotSample) -> DecayPoint {
    DecayPoint {
        time,
        theory_signal: theory,
        measured_signal: sample.fraction,
        ones_count: sample.ones,
        zeros_count: sample.zeros,
    }
}

/// Generate a T1/T2 decay dataset.
///
/// At each grid point the T1 sample is drawn before the T2 sample; the two
/// synthetic fit values are drawn after both series.
pub fn generate_decay(
    params: &DecayParams,
    source: &mut SeededRandomSource,
) -> Result<ExperimentResult> {
    params.validate()?;
    source.reseed(params.seed);
    log::debug!(
        "decay: t1={} t2={} time_max={} steps={} noise={} shots={} seed={:?}",
        params.t1,
        params.t2,
        params.time_max,
        params.time_steps,
        params.noise_rate,
        params.shots,
        params.seed
    );

    let grid = time_grid(params.time_max, params.time_steps);
    let mut t1_decay = Vec::with_capacity(grid.len());
    let mut t2_coherence = Vec::with_capacity(grid.len());
    for &t in &grid {
        let theory_t1 = t1_signal(params.t1, t);
        let sample = sample_probability(source, theory_t1, params.noise_rate, params.shots)?;
        t1_decay.push(point(t, theory_t1, sample));

        let theory_t2 = t2_signal(params.t1, params.t2, t);
        let sample = sample_probability(source, theory_t2, params.noise_rate, params.shots)?;
        t2_coherence.push(point(t, theory_t2, sample));
    }

    // Placeholder fit: jitter of the inputs, independent of the measured data.
    let statistics = DecayStatistics {
        t1_fitted: params.t1 * (1.0 + source.gaussian(FIT_JITTER)?),
        t2_fitted: params.t2 * (1.0 + source.gaussian(FIT_JITTER)?),
    };

    let series_len = params.time_steps * 2;
    Ok(ExperimentResult {
        experiment_type: ExperimentKind::Decay,
        parameters: ExperimentParameters::Decay(params.clone()),
        measurements: Measurements::Decay {
            t1_decay,
            t2_coherence,
        },
        statistics: Statistics::Decay(statistics),
        metadata: Metadata {
            total_measurements: series_len,
            total_shots: params.total_shots()?,
        },
    })
}
