//! Single observation records.
//!
//! Every record carries its raw outcome counts; for each one the counts sum to
//! the shot count of the call that produced it.

use serde::{Deserialize, Serialize};

/// One point of a Rabi oscillation series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RabiPoint {
    pub time: f64,
    /// Excitation probability including the decay envelope.
    pub theory_prob: f64,
    /// `ones_count / shots`.
    pub measured_prob: f64,
    pub ones_count: u64,
    pub zeros_count: u64,
}

/// One point of a T1 or T2 decay series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayPoint {
    pub time: f64,
    /// Signal as a probability in `[0, 1]`.
    pub theory_signal: f64,
    pub measured_signal: f64,
    pub ones_count: u64,
    pub zeros_count: u64,
}

/// Two-qubit measurement basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BellBasis {
    XX,
    XY,
    YX,
    YY,
}

impl BellBasis {
    /// Bases in measurement order.
    pub const ALL: [BellBasis; 4] = [Self::XX, Self::XY, Self::YX, Self::YY];

    /// Phase offset added to `theta` for this basis.
    pub fn phase_offset(&self) -> f64 {
        use std::f64::consts::{FRAC_PI_2, PI};
        match self {
            Self::XX => 0.0,
            Self::XY => FRAC_PI_2,
            Self::YX => -FRAC_PI_2,
            Self::YY => PI,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XX => "XX",
            Self::XY => "XY",
            Self::YX => "YX",
            Self::YY => "YY",
        }
    }
}

impl std::fmt::Display for BellBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Joint outcome counts and correlations for one basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BellMeasurement {
    pub count_00: u64,
    pub count_01: u64,
    pub count_10: u64,
    pub count_11: u64,
    pub theory_correlation: f64,
    /// `(n00 + n11 - n01 - n10) / shots`.
    pub measured_correlation: f64,
}

impl BellMeasurement {
    pub fn total(&self) -> u64 {
        self.count_00 + self.count_01 + self.count_10 + self.count_11
    }

    pub fn same_outcomes(&self) -> u64 {
        self.count_00 + self.count_11
    }

    pub fn different_outcomes(&self) -> u64 {
        self.count_01 + self.count_10
    }
}
