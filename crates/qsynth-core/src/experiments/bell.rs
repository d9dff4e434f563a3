//! Bell-state correlations in four bases and the CHSH statistic.
//!
//! Joint outcomes are drawn with one multinomial per basis over
//! `(00, 01, 10, 11)` with weights `(p/2, q/2, q/2, p/2)`, where `p` is the
//! same-outcome probability and `q = 1 - p`. The four counts are therefore
//! non-negative and sum to `shots` exactly.

use std::collections::BTreeMap;
use std::f64::consts::SQRT_2;

use crate::error::Result;
use crate::measurement::{BellBasis, BellMeasurement};
use crate::params::{BellParams, ExperimentKind, ExperimentParameters};
use crate::result::{BellStatistics, ExperimentResult, Measurements, Metadata, Statistics};
use crate::sampling::perturb_correlation;
use crate::source::SeededRandomSource;

/// Largest CHSH value a local hidden-variable model can reach.
pub const CLASSICAL_BOUND: f64 = 2.0;

/// Tsirelson's bound, `2√2`.
pub const TSIRELSON_BOUND: f64 = 2.0 * SQRT_2;

/// Theoretical correlation in `basis` for phase `theta`.
pub fn theory_correlation(basis: BellBasis, theta: f64) -> f64 {
    (theta + basis.phase_offset()).cos()
}

/// `|E(XX) - E(XY)| + |E(YX) + E(YY)|`.
pub fn chsh(xx: f64, xy: f64, yx: f64, yy: f64) -> f64 {
    (xx - xy).abs() + (yx + yy).abs()
}

fn measure_basis(
    source: &mut SeededRandomSource,
    basis: BellBasis,
    params: &BellParams,
) -> Result<BellMeasurement> {
    let theory = theory_correlation(basis, params.theta);
    let noisy = perturb_correlation(source, theory, params.noise_rate)?;
    let p_same = (1.0 + noisy) / 2.0;
    let p_diff = 1.0 - p_same;

    let counts = source.multinomial(
        params.shots,
        &[p_same / 2.0, p_diff / 2.0, p_diff / 2.0, p_same / 2.0],
    )?;
    let (count_00, count_01, count_10, count_11) = (counts[0], counts[1], counts[2], counts[3]);
    let signed = (count_00 + count_11) as f64 - (count_01 + count_10) as f64;

    Ok(BellMeasurement {
        count_00,
        count_01,
        count_10,
        count_11,
        theory_correlation: theory,
        measured_correlation: signed / params.shots as f64,
    })
}

/// Generate a Bell-state correlation dataset.
pub fn generate_bell(
    params: &BellParams,
    source: &mut SeededRandomSource,
) -> Result<ExperimentResult> {
    params.validate()?;
    source.reseed(params.seed);
    log::debug!(
        "bell: theta={} noise={} shots={} seed={:?}",
        params.theta,
        params.noise_rate,
        params.shots,
        params.seed
    );

    let mut measurements = BTreeMap::new();
    for basis in BellBasis::ALL {
        measurements.insert(basis, measure_basis(source, basis, params)?);
    }

    let measured = |b: BellBasis| measurements[&b].measured_correlation;
    let theory = |b: BellBasis| measurements[&b].theory_correlation;
    let chsh_value = chsh(
        measured(BellBasis::XX),
        measured(BellBasis::XY),
        measured(BellBasis::YX),
        measured(BellBasis::YY),
    );
    let chsh_theory = chsh(
        theory(BellBasis::XX),
        theory(BellBasis::XY),
        theory(BellBasis::YX),
        theory(BellBasis::YY),
    );
    let total_correlation = measurements
        .values()
        .map(|m| m.measured_correlation.abs())
        .sum();

    log::debug!("bell: chsh={chsh_value:.4} (theory {chsh_theory:.4})");

    let statistics = BellStatistics {
        chsh_value,
        violation: chsh_value > CLASSICAL_BOUND,
        total_correlation,
        chsh_theory,
    };

    let n_bases = BellBasis::ALL.len();
    Ok(ExperimentResult {
        experiment_type: ExperimentKind::Bell,
        parameters: ExperimentParameters::Bell(params.clone()),
        measurements: Measurements::Bell(measurements),
        statistics: Statistics::Bell(statistics),
        metadata: Metadata {
            total_measurements: n_bases,
            total_shots: params.total_shots()?,
        },
    })
}
