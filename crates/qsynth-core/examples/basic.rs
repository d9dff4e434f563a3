//! Basic dataset generation example.
//!
//! Generates one seeded dataset of each kind and prints its summary
//! statistics and fingerprint.
//!
//! Run: `cargo run --example basic`

use qsynth_core::{
    BellParams, DecayParams, ExperimentParameters, RabiParams, fingerprint, generate,
};

fn main() -> qsynth_core::Result<()> {
    let runs: Vec<ExperimentParameters> = vec![
        RabiParams {
            seed: Some(42),
            ..Default::default()
        }
        .into(),
        DecayParams {
            seed: Some(7),
            ..Default::default()
        }
        .into(),
        BellParams {
            seed: Some(1),
            ..Default::default()
        }
        .into(),
    ];

    for params in &runs {
        let result = generate(params)?;
        println!(
            "{:<18} {} measurements, {} shots",
            result.kind(),
            result.metadata.total_measurements,
            result.metadata.total_shots
        );
        println!("  statistics:  {}", result.to_json()["statistics"]);
        println!("  fingerprint: {}", fingerprint(&result));
    }
    Ok(())
}
