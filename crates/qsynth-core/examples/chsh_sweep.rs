//! Sweep the Bell-state phase and print the CHSH value at each step.
//!
//! Run: `cargo run --example chsh_sweep`

use qsynth_core::{BellParams, CLASSICAL_BOUND, SeededRandomSource, generate_bell};

fn main() -> qsynth_core::Result<()> {
    let mut source = SeededRandomSource::from_seed(2024);
    println!("{:>8} {:>10} {:>10} {:>9}", "theta", "chsh", "theory", "violation");
    for i in 0..=16 {
        let theta = i as f64 * std::f64::consts::PI / 8.0;
        let params = BellParams {
            theta,
            noise_rate: 0.02,
            shots: 20000,
            seed: None,
        };
        let result = generate_bell(&params, &mut source)?;
        if let Some(stats) = result.bell_statistics() {
            println!(
                "{:>8.4} {:>10.4} {:>10.4} {:>9}",
                theta,
                stats.chsh_value,
                stats.chsh_theory,
                stats.chsh_value > CLASSICAL_BOUND
            );
        }
    }
    Ok(())
}
