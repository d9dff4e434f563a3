//! Integration tests for qsynth-core.
//!
//! These tests drive the public API end to end:
//! parameters → generation → envelope → export.

use qsynth_core::{
    BellBasis, BellParams, DecayParams, Error, ExperimentGenerator, ExperimentKind,
    ExperimentParameters, RabiParams, SeededRandomSource, TSIRELSON_BOUND, fingerprint,
    generate, generate_bell, generate_decay, generate_rabi, to_csv,
};

fn all_seeded(seed: u64) -> Vec<ExperimentParameters> {
    vec![
        RabiParams {
            seed: Some(seed),
            ..Default::default()
        }
        .into(),
        DecayParams {
            seed: Some(seed),
            ..Default::default()
        }
        .into(),
        BellParams {
            seed: Some(seed),
            ..Default::default()
        }
        .into(),
    ]
}

#[test]
fn same_seed_same_result_for_every_kind() {
    for seed in [0, 1, 42, u64::MAX] {
        for params in all_seeded(seed) {
            let a = generate(&params).unwrap();
            let b = generate(&params).unwrap();
            assert_eq!(a, b, "{} not reproducible for seed {seed}", params.kind());
            assert_eq!(fingerprint(&a), fingerprint(&b));
        }
    }
}

#[test]
fn different_seeds_give_different_data() {
    for (a, b) in all_seeded(10).iter().zip(all_seeded(11).iter()) {
        assert_ne!(generate(a).unwrap(), generate(b).unwrap());
    }
}

#[test]
fn unseeded_calls_are_not_repeated() {
    let params: ExperimentParameters = RabiParams::default().into();
    assert_ne!(generate(&params).unwrap(), generate(&params).unwrap());
}

#[test]
fn counts_are_conserved_everywhere() {
    for seed in 0..10 {
        for params in all_seeded(seed) {
            let shots = params.shots();
            let result = generate(&params).unwrap();
            match result.kind() {
                ExperimentKind::Rabi => {
                    for p in result.rabi_points().unwrap() {
                        assert_eq!(p.ones_count + p.zeros_count, shots);
                    }
                }
                ExperimentKind::Decay => {
                    let (t1, t2) = result.decay_series().unwrap();
                    for p in t1.iter().chain(t2) {
                        assert_eq!(p.ones_count + p.zeros_count, shots);
                    }
                }
                ExperimentKind::Bell => {
                    for m in result.bell_measurements().unwrap().values() {
                        assert_eq!(m.total(), shots);
                    }
                }
            }
        }
    }
}

#[test]
fn measured_values_within_bounds_under_extreme_noise() {
    let rabi = generate_rabi(
        &RabiParams {
            noise_rate: 3.0,
            seed: Some(5),
            ..Default::default()
        },
        &mut SeededRandomSource::new(None),
    )
    .unwrap();
    assert!(
        rabi.rabi_points()
            .unwrap()
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.measured_prob))
    );

    let decay = generate_decay(
        &DecayParams {
            noise_rate: 3.0,
            seed: Some(5),
            ..Default::default()
        },
        &mut SeededRandomSource::new(None),
    )
    .unwrap();
    let (t1, t2) = decay.decay_series().unwrap();
    assert!(
        t1.iter()
            .chain(t2)
            .all(|p| (0.0..=1.0).contains(&p.measured_signal))
    );

    let bell = generate_bell(
        &BellParams {
            noise_rate: 3.0,
            seed: Some(5),
            ..Default::default()
        },
        &mut SeededRandomSource::new(None),
    )
    .unwrap();
    assert!(
        bell.bell_measurements()
            .unwrap()
            .values()
            .all(|m| (-1.0..=1.0).contains(&m.measured_correlation))
    );
}

#[test]
fn rabi_scenario() {
    let result = generate(
        &RabiParams {
            omega: 1.0,
            time_max: 10.0,
            time_steps: 100,
            noise_rate: 0.0,
            shots: 10000,
            seed: Some(42),
        }
        .into(),
    )
    .unwrap();
    let points = result.rabi_points().unwrap();
    assert_eq!(points[0].time, 0.0);
    assert_eq!(points[0].theory_prob, 0.0);
    assert_eq!(points[0].ones_count, 0);

    let pi = std::f64::consts::PI;
    let idx = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (a.time - pi).abs().total_cmp(&(b.time - pi).abs()))
        .map(|(i, _)| i)
        .unwrap();
    let t = points[idx].time;
    let pre_envelope = points[idx].theory_prob / (-t / 3.0).exp();
    assert!(pre_envelope > 0.999 && pre_envelope <= 1.0);
    // local maximum of the undamped drive term
    let drive = |t: f64| (t / 2.0).sin().powi(2);
    assert!(drive(points[idx - 1].time) < pre_envelope);
    assert!(drive(points[idx + 1].time) < pre_envelope);
}

#[test]
fn decay_scenario() {
    let result = generate(
        &DecayParams {
            t1: 5.0,
            t2: 3.0,
            time_max: 15.0,
            time_steps: 100,
            noise_rate: 0.0,
            shots: 10000,
            seed: Some(7),
        }
        .into(),
    )
    .unwrap();
    let (t1, t2) = result.decay_series().unwrap();
    assert_eq!(t1.len(), t2.len());
    assert_eq!(t1[0].theory_signal, 1.0);
    assert!(t1.windows(2).all(|w| w[1].theory_signal <= w[0].theory_signal));
    assert_eq!(t1.last().unwrap().time, 15.0);
}

#[test]
fn bell_scenario() {
    let result = generate(
        &BellParams {
            theta: 0.0,
            noise_rate: 0.0,
            shots: 10000,
            seed: Some(1),
        }
        .into(),
    )
    .unwrap();
    let m = result.bell_measurements().unwrap();
    let expected = [
        (BellBasis::XX, 1.0),
        (BellBasis::XY, 0.0),
        (BellBasis::YX, 0.0),
        (BellBasis::YY, -1.0),
    ];
    for (basis, corr) in expected {
        assert!((m[&basis].theory_correlation - corr).abs() < 1e-12, "{basis}");
    }
    let stats = result.bell_statistics().unwrap();
    assert!((stats.chsh_theory - 2.0).abs() < 1e-12);
    assert!(stats.chsh_value <= TSIRELSON_BOUND);
}

#[test]
fn validation_errors_surface_before_sampling() {
    let bad: Vec<(ExperimentParameters, &str)> = vec![
        (
            RabiParams {
                omega: 0.0,
                ..Default::default()
            }
            .into(),
            "omega",
        ),
        (
            RabiParams {
                time_steps: 1,
                ..Default::default()
            }
            .into(),
            "time_steps",
        ),
        (
            DecayParams {
                time_max: 0.0,
                ..Default::default()
            }
            .into(),
            "time_max",
        ),
        (
            DecayParams {
                t1: 0.0,
                ..Default::default()
            }
            .into(),
            "t1",
        ),
        (
            BellParams {
                noise_rate: -1.0,
                ..Default::default()
            }
            .into(),
            "noise_rate",
        ),
    ];
    for (params, expected) in bad {
        match generate(&params) {
            Err(Error::Validation { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected validation error on {expected}, got {other:?}"),
        }
    }
}

#[test]
fn shared_generator_and_fresh_source_agree_when_seeded() {
    let generator = ExperimentGenerator::new(None);
    for params in all_seeded(99) {
        assert_eq!(generator.generate(&params).unwrap(), generate(&params).unwrap());
    }
}

#[test]
fn csv_has_one_row_per_measurement() {
    for params in all_seeded(4) {
        let result = generate(&params).unwrap();
        let rows = to_csv(&result).lines().count() - 1;
        let expected = match result.kind() {
            ExperimentKind::Decay => result.metadata.total_measurements / 2,
            _ => result.metadata.total_measurements,
        };
        assert_eq!(rows, expected);
    }
}

#[test]
fn extreme_finite_inputs_generate_or_fail_validation() {
    let wide = generate(
        &RabiParams {
            time_max: 1e308,
            time_steps: 50,
            seed: Some(3),
            ..Default::default()
        }
        .into(),
    )
    .unwrap();
    let points = wide.rabi_points().unwrap();
    assert_eq!(points.last().unwrap().time, 1e308);
    assert!(points.iter().all(|p| (0.0..=1.0).contains(&p.theory_prob)));

    let decay = generate(
        &DecayParams {
            time_max: 1e307,
            t1: f64::from_bits(1),
            time_steps: 50,
            seed: Some(3),
            ..Default::default()
        }
        .into(),
    )
    .unwrap();
    let (t1, t2) = decay.decay_series().unwrap();
    assert!(
        t1.iter()
            .chain(t2)
            .all(|p| (0.0..=1.0).contains(&p.theory_signal))
    );

    let rejected: Vec<ExperimentParameters> = vec![
        RabiParams {
            omega: 1e308,
            ..Default::default()
        }
        .into(),
        RabiParams {
            time_max: f64::from_bits(1),
            ..Default::default()
        }
        .into(),
        DecayParams {
            time_max: 1e308,
            ..Default::default()
        }
        .into(),
    ];
    for params in rejected {
        let err = generate(&params).unwrap_err();
        assert!(err.is_validation(), "{err}");
    }
}

#[test]
fn huge_shot_counts_are_validation_errors() {
    let cases: Vec<ExperimentParameters> = vec![
        RabiParams {
            shots: u64::MAX / 2,
            time_steps: 3,
            ..Default::default()
        }
        .into(),
        DecayParams {
            shots: u64::MAX / 3,
            ..Default::default()
        }
        .into(),
        BellParams {
            shots: u64::MAX / 2,
            ..Default::default()
        }
        .into(),
    ];
    for params in cases {
        match generate(&params) {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "shots"),
            other => panic!("{}: expected shots validation error, got {other:?}", params.kind()),
        }
    }
}
