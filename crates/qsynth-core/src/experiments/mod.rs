//! The three generation algorithms.
//!
//! Each algorithm validates its parameters, reseeds the supplied source when a
//! seed is given, evaluates its closed-form theory curve and pushes every value
//! through [`crate::sampling`]. None of them depends on another.

pub mod bell;
pub mod decay;
pub mod rabi;

pub use bell::{CLASSICAL_BOUND, TSIRELSON_BOUND, chsh, generate_bell};
pub use decay::generate_decay;
pub use rabi::generate_rabi;
