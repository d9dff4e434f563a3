//! # qsynth-core
//!
//! **Synthetic measurement data for three textbook quantum experiments.**
//!
//! `qsynth-core` produces datasets shaped like a Rabi oscillation scan, a T1/T2
//! decay measurement and a two-qubit Bell-state correlation run with CHSH
//! evaluation. It does not simulate quantum dynamics: each generator evaluates
//! a closed-form curve, perturbs it with Gaussian noise and re-samples it with
//! binomial shot noise.
//!
//! ## Quick Start
//!
//! ```
//! use qsynth_core::{ExperimentParameters, RabiParams, generate};
//!
//! let params = ExperimentParameters::Rabi(RabiParams {
//!     seed: Some(42),
//!     ..Default::default()
//! });
//! let result = generate(&params).unwrap();
//! assert_eq!(result.metadata.total_measurements, 100);
//!
//! // Same seed, same dataset.
//! assert_eq!(result, generate(&params).unwrap());
//! ```
//!
//! ## Architecture
//!
//! Parameters → validate → reseed source → theory curve → sampling → result
//!
//! Every random draw goes through a [`SeededRandomSource`] passed explicitly to
//! the generator, and every noisy value goes through [`sampling`]. Results
//! share one envelope, [`ExperimentResult`].

pub mod error;
pub mod experiments;
pub mod export;
pub mod generator;
pub mod measurement;
pub mod params;
pub mod result;
pub mod sampling;
pub mod source;

pub use error::{Error, Result};
pub use experiments::{
    CLASSICAL_BOUND, TSIRELSON_BOUND, chsh, generate_bell, generate_decay, generate_rabi,
};
pub use export::{fingerprint, to_csv, write_csv, write_json};
pub use generator::{ExperimentGenerator, generate, generate_with};
pub use measurement::{BellBasis, BellMeasurement, DecayPoint, RabiPoint};
pub use params::{BellParams, DecayParams, ExperimentKind, ExperimentParameters, RabiParams};
pub use result::{
    BellStatistics, DecayStatistics, ExperimentResult, Measurements, Metadata, RabiStatistics,
    Statistics,
};
pub use source::SeededRandomSource;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
