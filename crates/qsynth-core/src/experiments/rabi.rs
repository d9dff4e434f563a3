//! Rabi oscillation under a continuous drive, damped by a dephasing envelope.

use std::f64::consts::TAU;

use crate::error::Result;
use crate::measurement::RabiPoint;
use crate::params::{ExperimentKind, ExperimentParameters, RabiParams};
use crate::result::{ExperimentResult, Measurements, Metadata, RabiStatistics, Statistics};
use crate::sampling::{mean_squared_error, sample_probability, time_grid};
use crate::source::SeededRandomSource;

/// Envelope time constant as a fraction of `time_max`.
pub const ENVELOPE_FRACTION: f64 = 0.3;

/// `sin²(omega·t/2)` before the envelope.
pub fn drive_probability(omega: f64, t: f64) -> f64 {
    (omega * t / 2.0).sin().powi(2)
}

/// `exp(-t / (0.3·time_max))`.
pub fn envelope(time_max: f64, t: f64) -> f64 {
    (-t / (ENVELOPE_FRACTION * time_max)).exp()
}

/// Theoretical excitation probability at `t`.
pub fn theory_probability(omega: f64, time_max: f64, t: f64) -> f64 {
    drive_probability(omega, t) * envelope(time_max, t)
}

/// Generate a Rabi oscillation dataset.
pub fn generate_rabi(
    params: &RabiParams,
    source: &mut SeededRandomSource,
) -> Result<ExperimentResult> {
    params.validate()?;
    source.reseed(params.seed);
    log::debug!(
        "rabi: omega={} time_max={} steps={} noise={} shots={} seed={:?}",
        params.omega,
        params.time_max,
        params.time_steps,
        params.noise_rate,
        params.shots,
        params.seed
    );

    let grid = time_grid(params.time_max, params.time_steps);
    let mut points = Vec::with_capacity(grid.len());
    for &t in &grid {
        let theory = theory_probability(params.omega, params.time_max, t);
        let sample = sample_probability(source, theory, params.noise_rate, params.shots)?;
        points.push(RabiPoint {
            time: t,
            theory_prob: theory,
            measured_prob: sample.fraction,
            ones_count: sample.ones,
            zeros_count: sample.zeros,
        });
    }

    let measured: Vec<f64> = points.iter().map(|p| p.measured_prob).collect();
    let theory: Vec<f64> = points.iter().map(|p| p.theory_prob).collect();
    let statistics = RabiStatistics {
        mse: mean_squared_error(&measured, &theory),
        max_prob: measured.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        oscillation_period: TAU / params.omega,
    };

    Ok(ExperimentResult {
        experiment_type: ExperimentKind::Rabi,
        parameters: ExperimentParameters::Rabi(params.clone()),
        measurements: Measurements::Rabi(points),
        statistics: Statistics::Rabi(statistics),
        metadata: Metadata {
            total_measurements: params.time_steps,
            total_shots: params.total_shots()?,
        },
    })
}
