//! The result envelope returned by every generation call.
//!
//! `{experiment_type, parameters, measurements, statistics, metadata}` is the
//! stable contract consumers translate to JSON, tables or plots.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::measurement::{BellBasis, BellMeasurement, DecayPoint, RabiPoint};
use crate::params::{ExperimentKind, ExperimentParameters};

/// Kind-specific measurement collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Measurements {
    /// Rabi series in grid order.
    Rabi(Vec<RabiPoint>),
    /// Two parallel series of equal length.
    Decay {
        t1_decay: Vec<DecayPoint>,
        t2_coherence: Vec<DecayPoint>,
    },
    /// One record per basis, ordered XX, XY, YX, YY.
    Bell(BTreeMap<BellBasis, BellMeasurement>),
}

/// Rabi summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RabiStatistics {
    /// Mean squared error of measured fractions against the theory curve.
    pub mse: f64,
    /// Largest measured fraction.
    pub max_prob: f64,
    /// `2π / omega`.
    pub oscillation_period: f64,
}

/// Decay summary statistics.
///
/// These are **synthetic**: each value is the true input time multiplied by
/// `1 + N(0, 0.1)`. They are not fitted to the measured series and exist so
/// downstream tooling has a plausible-looking fit result to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecayStatistics {
    pub t1_fitted: f64,
    pub t2_fitted: f64,
}

/// Bell summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BellStatistics {
    /// CHSH value from the measured correlations.
    pub chsh_value: f64,
    /// `chsh_value > 2.0`.
    pub violation: bool,
    /// Sum of absolute measured correlations over the four bases.
    pub total_correlation: f64,
    /// CHSH value from the theoretical correlations.
    pub chsh_theory: f64,
}

/// Kind-specific scalar summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statistics {
    Rabi(RabiStatistics),
    Decay(DecayStatistics),
    Bell(BellStatistics),
}

/// Measurement and shot totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub total_measurements: usize,
    pub total_shots: u64,
}

/// A generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentResult {
    pub experiment_type: ExperimentKind,
    pub parameters: ExperimentParameters,
    pub measurements: Measurements,
    pub statistics: Statistics,
    pub metadata: Metadata,
}

impl ExperimentResult {
    pub fn kind(&self) -> ExperimentKind {
        self.experiment_type
    }

    pub fn rabi_points(&self) -> Option<&[RabiPoint]> {
        match &self.measurements {
            Measurements::Rabi(points) => Some(points),
            _ => None,
        }
    }

    /// `(t1_decay, t2_coherence)`.
    pub fn decay_series(&self) -> Option<(&[DecayPoint], &[DecayPoint])> {
        match &self.measurements {
            Measurements::Decay {
                t1_decay,
                t2_coherence,
            } => Some((t1_decay, t2_coherence)),
            _ => None,
        }
    }

    pub fn bell_measurements(&self) -> Option<&BTreeMap<BellBasis, BellMeasurement>> {
        match &self.measurements {
            Measurements::Bell(map) => Some(map),
            _ => None,
        }
    }

    pub fn rabi_statistics(&self) -> Option<&RabiStatistics> {
        match &self.statistics {
            Statistics::Rabi(s) => Some(s),
            _ => None,
        }
    }

    pub fn decay_statistics(&self) -> Option<&DecayStatistics> {
        match &self.statistics {
            Statistics::Decay(s) => Some(s),
            _ => None,
        }
    }

    pub fn bell_statistics(&self) -> Option<&BellStatistics> {
        match &self.statistics {
            Statistics::Bell(s) => Some(s),
            _ => None,
        }
    }

    /// Serialize to a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // Every field is a plain number, string, bool or map with string keys.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
