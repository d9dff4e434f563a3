//! Statistical consistency battery for generated datasets.
//!
//! Each check inspects one [`ExperimentResult`] and returns a [`TestResult`]
//! with a pass/fail determination, a p-value where the check is statistical,
//! and a letter grade (A through F). Structural checks (count conservation,
//! bounds, metadata) are exact; the dispersion checks compare the observed
//! scatter around the theory curve with what Gaussian noise plus binomial shot
//! noise predicts.

use qsynth_core::{CLASSICAL_BOUND, ExperimentResult, Measurements, TSIRELSON_BOUND};
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

/// Significance level for the statistical checks.
pub const ALPHA: f64 = 0.001;

/// Points whose noisy value may be clipped are excluded from dispersion
/// checks; this is the margin in noise standard deviations.
const CLIP_MARGIN_SIGMAS: f64 = 3.0;

/// Points with fewer expected binomial events than this are too far from
/// the normal approximation to enter a chi-squared sum.
const MIN_EXPECTED_COUNT: f64 = 5.0;

/// CHSH ceiling tolerance in standard errors.
const CHSH_SIGMAS: f64 = 5.0;

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of a single consistency check.
#[derive(Debug, Clone)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub p_value: Option<f64>,
    pub statistic: f64,
    pub details: String,
    pub grade: char,
}

impl TestResult {
    /// Assign a letter grade based on p-value.
    ///
    /// - A: p >= 0.1
    /// - B: p >= 0.01
    /// - C: p >= 0.001
    /// - D: p >= 0.0001
    /// - F: otherwise or None
    pub fn grade_from_p(p: Option<f64>) -> char {
        match p {
            Some(p) if p >= 0.1 => 'A',
            Some(p) if p >= 0.01 => 'B',
            Some(p) if p >= 0.001 => 'C',
            Some(p) if p >= 0.0001 => 'D',
            _ => 'F',
        }
    }

    /// Determine pass/fail from p-value against a threshold.
    pub fn pass_from_p(p: Option<f64>, threshold: f64) -> bool {
        match p {
            Some(p) => p >= threshold,
            None => false,
        }
    }

    fn exact(name: &str, violations: usize, checked: usize, details: String) -> Self {
        let passed = violations == 0;
        TestResult {
            name: name.to_string(),
            passed,
            p_value: None,
            statistic: violations as f64,
            details: format!("{violations}/{checked} violations; {details}"),
            grade: if passed { 'A' } else { 'F' },
        }
    }

    fn statistical(name: &str, p: Option<f64>, statistic: f64, details: String) -> Self {
        TestResult {
            name: name.to_string(),
            passed: TestResult::pass_from_p(p, ALPHA),
            p_value: p,
            statistic,
            details,
            grade: TestResult::grade_from_p(p),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Upper-tail probability of a chi-squared statistic.
fn chi2_sf(statistic: f64, df: usize) -> Option<f64> {
    ChiSquared::new(df as f64).ok().map(|d| d.sf(statistic))
}

/// `(theory, measured, shots)` for every binary series point in the result.
fn binary_points(result: &ExperimentResult) -> Vec<(f64, f64, u64)> {
    let shots = result.parameters.shots();
    match &result.measurements {
        Measurements::Rabi(points) => points
            .iter()
            .map(|p| (p.theory_prob, p.measured_prob, shots))
            .collect(),
        Measurements::Decay {
            t1_decay,
            t2_coherence,
        } => t1_decay
            .iter()
            .chain(t2_coherence)
            .map(|p| (p.theory_signal, p.measured_signal, shots))
            .collect(),
        Measurements::Bell(_) => Vec::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. STRUCTURAL CHECKS
// ═══════════════════════════════════════════════════════════════════════════════

/// Every measurement's outcome counts sum to the shot count.
pub fn count_conservation(result: &ExperimentResult) -> TestResult {
    let name = "Count Conservation";
    let shots = result.parameters.shots();
    let totals: Vec<u64> = match &result.measurements {
        Measurements::Rabi(points) => points
            .iter()
            .map(|p| p.ones_count + p.zeros_count)
            .collect(),
        Measurements::Decay {
            t1_decay,
            t2_coherence,
        } => t1_decay
            .iter()
            .chain(t2_coherence)
            .map(|p| p.ones_count + p.zeros_count)
            .collect(),
        Measurements::Bell(bases) => bases.values().map(|m| m.total()).collect(),
    };
    let violations = totals.iter().filter(|&&t| t != shots).count();
    TestResult::exact(name, violations, totals.len(), format!("shots={shots}"))
}

/// Measured probabilities lie in `[0, 1]`, measured correlations in `[-1, 1]`.
pub fn probability_bounds(result: &ExperimentResult) -> TestResult {
    let name = "Probability Bounds";
    let (violations, checked) = match &result.measurements {
        Measurements::Bell(bases) => (
            bases
                .values()
                .filter(|m| !(-1.0..=1.0).contains(&m.measured_correlation))
                .count(),
            bases.len(),
        ),
        _ => {
            let points = binary_points(result);
            (
                points
                    .iter()
                    .filter(|(_, measured, _)| !(0.0..=1.0).contains(measured))
                    .count(),
                points.len(),
            )
        }
    };
    TestResult::exact(name, violations, checked, "measured values".to_string())
}

/// Metadata totals match the measurement collection.
pub fn metadata_consistency(result: &ExperimentResult) -> TestResult {
    let name = "Metadata Consistency";
    let records = match &result.measurements {
        Measurements::Rabi(points) => points.len(),
        Measurements::Decay {
            t1_decay,
            t2_coherence,
        } => t1_decay.len() + t2_coherence.len(),
        Measurements::Bell(bases) => bases.len(),
    };
    let expected_shots = result.parameters.shots().checked_mul(records as u64);
    let mut violations = 0;
    if result.metadata.total_measurements != records {
        violations += 1;
    }
    if expected_shots != Some(result.metadata.total_shots) {
        violations += 1;
    }
    TestResult::exact(
        name,
        violations,
        2,
        format!(
            "records={records}, total_measurements={}, total_shots={} (expected {expected_shots:?})",
            result.metadata.total_measurements, result.metadata.total_shots
        ),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. DISPERSION CHECKS
// ═══════════════════════════════════════════════════════════════════════════════

/// Scatter of measured fractions around the theory curve (Rabi, Decay).
///
/// Each eligible point contributes `(measured - theory)² / (p(1-p)/shots + σ²)`;
/// the sum is chi-squared with one degree of freedom per point. Points whose
/// noisy probability could be clipped, or with too few expected events for
/// the normal approximation, are excluded. Returns `None` when the check does not apply or no point is
/// eligible.
pub fn shot_noise_dispersion(result: &ExperimentResult) -> Option<TestResult> {
    let name = "Shot Noise Dispersion";
    let sigma = result.parameters.noise_rate();
    let margin = CLIP_MARGIN_SIGMAS * sigma;
    let mut chi2 = 0.0;
    let mut df = 0usize;
    for (theory, measured, shots) in binary_points(result) {
        if theory - margin < 0.0 || theory + margin > 1.0 {
            continue;
        }
        if shots as f64 * theory * (1.0 - theory) < MIN_EXPECTED_COUNT {
            continue;
        }
        let variance = theory * (1.0 - theory) / shots as f64 + sigma * sigma;
        if variance <= 0.0 {
            continue;
        }
        chi2 += (measured - theory).powi(2) / variance;
        df += 1;
    }
    if df == 0 {
        return None;
    }
    let p = chi2_sf(chi2, df);
    Some(TestResult::statistical(
        name,
        p,
        chi2,
        format!("chi2={chi2:.2}, df={df}, sigma={sigma}"),
    ))
}

/// Scatter of measured Bell correlations around the theory (Bell).
///
/// Given a noisy correlation `c`, the measured correlation has variance
/// `(1 - c²)/shots`; adding the Gaussian perturbation gives
/// `(1 - E²)/shots + σ²` around the theory value `E`.
pub fn correlation_dispersion(result: &ExperimentResult) -> Option<TestResult> {
    let name = "Correlation Dispersion";
    let bases = result.bell_measurements()?;
    let sigma = result.parameters.noise_rate();
    let shots = result.parameters.shots() as f64;
    let margin = CLIP_MARGIN_SIGMAS * sigma;
    let mut chi2 = 0.0;
    let mut df = 0usize;
    for m in bases.values() {
        let e = m.theory_correlation;
        if e.abs() + margin > 1.0 {
            continue;
        }
        let variance = (1.0 - e * e).max(0.0) / shots + sigma * sigma;
        if variance <= 0.0 {
            continue;
        }
        chi2 += (m.measured_correlation - e).powi(2) / variance;
        df += 1;
    }
    if df == 0 {
        return None;
    }
    let p = chi2_sf(chi2, df);
    Some(TestResult::statistical(
        name,
        p,
        chi2,
        format!("chi2={chi2:.2}, df={df}, sigma={sigma}"),
    ))
}

/// Balance of `00` vs `11` and `01` vs `10` within each basis (Bell).
///
/// Given the number of same-outcome shots `k`, `count_00` is Binomial(k, ½);
/// likewise for the different-outcome pair. Each pair contributes a squared
/// z-score and the sum is chi-squared.
pub fn outcome_symmetry(result: &ExperimentResult) -> Option<TestResult> {
    let name = "Outcome Symmetry";
    let bases = result.bell_measurements()?;
    let mut chi2 = 0.0;
    let mut df = 0usize;
    for m in bases.values() {
        for (a, b) in [(m.count_00, m.count_11), (m.count_01, m.count_10)] {
            let k = (a + b) as f64;
            if k == 0.0 {
                continue;
            }
            let z = (a as f64 - k / 2.0) / (k / 4.0).sqrt();
            chi2 += z * z;
            df += 1;
        }
    }
    if df == 0 {
        return None;
    }
    let p = chi2_sf(chi2, df);
    Some(TestResult::statistical(
        name,
        p,
        chi2,
        format!("chi2={chi2:.2}, df={df}"),
    ))
}

// ═══════════════════════════════════════════════════════════════════════════════
// 3. CHSH
// ═══════════════════════════════════════════════════════════════════════════════

/// CHSH value consistent with Tsirelson's bound (Bell).
///
/// Each of the four correlations carries a standard error of at most
/// `sqrt(σ² + 1/shots)`, so the CHSH value's is at most twice that. The check
/// fails when the value exceeds `2√2` by more than five standard errors.
pub fn chsh_ceiling(result: &ExperimentResult) -> Option<TestResult> {
    let name = "CHSH Ceiling";
    let stats = result.bell_statistics()?;
    let sigma = result.parameters.noise_rate();
    let shots = result.parameters.shots() as f64;
    let std_error = 2.0 * (sigma * sigma + 1.0 / shots).sqrt();
    let z = (stats.chsh_value - TSIRELSON_BOUND) / std_error;
    let p = Normal::new(0.0, 1.0).ok().map(|n| n.sf(z));
    Some(TestResult {
        name: name.to_string(),
        passed: z <= CHSH_SIGMAS,
        p_value: p,
        statistic: stats.chsh_value,
        details: format!(
            "chsh={:.4}, bound={:.4}, se={:.4}, classical violation={}",
            stats.chsh_value,
            TSIRELSON_BOUND,
            std_error,
            stats.chsh_value > CLASSICAL_BOUND
        ),
        grade: TestResult::grade_from_p(p),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Battery
// ═══════════════════════════════════════════════════════════════════════════════

/// Run every check that applies to the result's kind.
pub fn run_all_checks(result: &ExperimentResult) -> Vec<TestResult> {
    let mut results = vec![
        count_conservation(result),
        probability_bounds(result),
        metadata_consistency(result),
    ];
    let optional: [fn(&ExperimentResult) -> Option<TestResult>; 4] = [
        shot_noise_dispersion,
        correlation_dispersion,
        outcome_symmetry,
        chsh_ceiling,
    ];
    results.extend(optional.iter().filter_map(|check| check(result)));
    results
}

/// Overall quality score (0-100) from test grades.
pub fn calculate_quality_score(results: &[TestResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: f64 = results
        .iter()
        .map(|r| match r.grade {
            'A' => 100.0,
            'B' => 75.0,
            'C' => 50.0,
            'D' => 25.0,
            _ => 0.0,
        })
        .sum();
    total / results.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsynth_core::{
        BellParams, DecayParams, ExperimentParameters, RabiParams, Statistics, generate,
    };

    fn rabi(noise_rate: f64, seed: u64) -> ExperimentResult {
        generate(&ExperimentParameters::Rabi(RabiParams {
            noise_rate,
            seed: Some(seed),
            ..Default::default()
        }))
        .unwrap()
    }

    fn bell(noise_rate: f64, theta: f64, seed: u64) -> ExperimentResult {
        generate(&ExperimentParameters::Bell(BellParams {
            noise_rate,
            theta,
            seed: Some(seed),
            ..Default::default()
        }))
        .unwrap()
    }

    #[test]
    fn test_grade_from_p() {
        assert_eq!(TestResult::grade_from_p(Some(0.5)), 'A');
        assert_eq!(TestResult::grade_from_p(Some(0.05)), 'B');
        assert_eq!(TestResult::grade_from_p(Some(0.005)), 'C');
        assert_eq!(TestResult::grade_from_p(Some(0.0005)), 'D');
        assert_eq!(TestResult::grade_from_p(Some(0.00000001)), 'F');
        assert_eq!(TestResult::grade_from_p(None), 'F');
    }

    #[test]
    fn test_pass_from_p() {
        assert!(TestResult::pass_from_p(Some(0.05), 0.01));
        assert!(!TestResult::pass_from_p(Some(0.005), 0.01));
        assert!(!TestResult::pass_from_p(None, 0.01));
    }

    #[test]
    fn structural_checks_pass_on_generated_data() {
        for result in [
            rabi(0.1, 1),
            generate(&ExperimentParameters::Decay(DecayParams {
                seed: Some(1),
                ..Default::default()
            }))
            .unwrap(),
            bell(0.1, 0.0, 1),
        ] {
            assert!(count_conservation(&result).passed);
            assert!(probability_bounds(&result).passed);
            assert!(metadata_consistency(&result).passed);
        }
    }

    #[test]
    fn count_conservation_catches_tampering() {
        let mut result = rabi(0.0, 3);
        if let Measurements::Rabi(points) = &mut result.measurements {
            points[4].ones_count += 1;
        }
        let r = count_conservation(&result);
        assert!(!r.passed);
        assert_eq!(r.statistic, 1.0);
        assert_eq!(r.grade, 'F');
    }

    #[test]
    fn metadata_consistency_catches_tampering() {
        let mut result = bell(0.0, 0.0, 3);
        result.metadata.total_shots += 1;
        assert!(!metadata_consistency(&result).passed);
    }

    #[test]
    fn noiseless_rabi_dispersion_passes() {
        let mut passes = 0;
        for seed in 0..20 {
            if let Some(r) = shot_noise_dispersion(&rabi(0.0, seed)) {
                assert!(r.p_value.is_some());
                if r.passed {
                    passes += 1;
                }
            }
        }
        // alpha = 0.001, so a failure among 20 runs is very unlikely
        assert!(passes >= 19, "only {passes}/20 passed");
    }

    #[test]
    fn understated_noise_fails_dispersion() {
        let mut result = rabi(0.2, 5);
        // claim the data was noiseless
        if let ExperimentParameters::Rabi(p) = &mut result.parameters {
            p.noise_rate = 0.0;
        }
        let r = shot_noise_dispersion(&result).unwrap();
        assert!(!r.passed, "{}", r.details);
    }

    #[test]
    fn dispersion_skipped_when_every_point_may_clip() {
        assert!(shot_noise_dispersion(&rabi(0.5, 1)).is_none());
    }

    #[test]
    fn bell_only_checks_skip_other_kinds() {
        let result = rabi(0.1, 1);
        assert!(outcome_symmetry(&result).is_none());
        assert!(chsh_ceiling(&result).is_none());
        assert!(correlation_dispersion(&result).is_none());
        assert!(shot_noise_dispersion(&bell(0.1, 0.0, 1)).is_none());
    }

    #[test]
    fn bell_checks_pass_on_generated_data() {
        let result = bell(0.05, 0.7, 11);
        let sym = outcome_symmetry(&result).unwrap();
        assert!(sym.p_value.is_some());
        let ceiling = chsh_ceiling(&result).unwrap();
        assert!(ceiling.passed);
        assert_eq!(ceiling.grade, 'A');
    }

    #[test]
    fn inflated_chsh_fails_ceiling() {
        let mut result = bell(0.0, 0.0, 2);
        if let Statistics::Bell(stats) = &mut result.statistics {
            stats.chsh_value = 3.5;
        }
        assert!(!chsh_ceiling(&result).unwrap().passed);
    }

    #[test]
    fn battery_contents_depend_on_kind() {
        let names = |r: &ExperimentResult| -> Vec<String> {
            run_all_checks(r).into_iter().map(|t| t.name).collect()
        };
        let bell_names = names(&bell(0.1, 0.0, 1));
        assert!(bell_names.contains(&"CHSH Ceiling".to_string()));
        assert!(bell_names.contains(&"Outcome Symmetry".to_string()));
        assert!(!bell_names.contains(&"Shot Noise Dispersion".to_string()));

        let rabi_names = names(&rabi(0.0, 1));
        assert!(rabi_names.contains(&"Shot Noise Dispersion".to_string()));
        assert!(!rabi_names.contains(&"CHSH Ceiling".to_string()));
    }

    #[test]
    fn quality_score_bounds() {
        assert_eq!(calculate_quality_score(&[]), 0.0);
        let results = run_all_checks(&bell(0.0, 0.0, 4));
        let score = calculate_quality_score(&results);
        assert!((0.0..=100.0).contains(&score));
    }
}
