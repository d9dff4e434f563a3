//! Parameter records for the three experiment kinds.
//!
//! Each record has the defaults of the public API, deserializes with missing
//! fields filled from those defaults, and validates itself before any random
//! draw happens.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::experiments::rabi::ENVELOPE_FRACTION;
use crate::measurement::BellBasis;

/// Largest accepted `time_steps`.
pub const MAX_TIME_STEPS: usize = 1_000_000;

/// Experiment kind, serialized as the `experiment_type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperimentKind {
    #[serde(rename = "rabi_oscillation")]
    Rabi,
    #[serde(rename = "t1_t2_decay")]
    Decay,
    #[serde(rename = "bell_state")]
    Bell,
}

impl ExperimentKind {
    /// All kinds in a stable order.
    pub const ALL: [ExperimentKind; 3] = [Self::Rabi, Self::Decay, Self::Bell];

    /// Wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rabi => "rabi_oscillation",
            Self::Decay => "t1_t2_decay",
            Self::Bell => "bell_state",
        }
    }
}

impl std::fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExperimentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rabi" | "rabi_oscillation" => Ok(Self::Rabi),
            "decay" | "t1_t2_decay" | "t1t2" => Ok(Self::Decay),
            "bell" | "bell_state" => Ok(Self::Bell),
            other => Err(Error::validation(
                "experiment_type",
                format!("unknown experiment kind '{other}' (expected rabi, decay or bell)"),
            )),
        }
    }
}

/// Rabi oscillation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RabiParams {
    /// Drive frequency.
    pub omega: f64,
    pub time_max: f64,
    pub time_steps: usize,
    /// Standard deviation of the Gaussian perturbation on each probability.
    pub noise_rate: f64,
    pub shots: u64,
    pub seed: Option<u64>,
}

impl Default for RabiParams {
    fn default() -> Self {
        Self {
            omega: 1.0,
            time_max: 10.0,
            time_steps: 100,
            noise_rate: 0.1,
            shots: 1000,
            seed: None,
        }
    }
}

impl RabiParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("omega", self.omega)?;
        require_positive("time_max", self.time_max)?;
        require_grid("time_steps", self.time_steps)?;
        require_noise(self.noise_rate)?;
        require_shots(self.shots)?;
        require_finite(
            "omega",
            self.omega * self.time_max,
            "drive phase omega * time_max overflows",
        )?;
        require_finite("omega", TAU / self.omega, "oscillation period overflows")?;
        if ENVELOPE_FRACTION * self.time_max <= 0.0 {
            return Err(Error::validation(
                "time_max",
                format!("envelope time constant underflows to zero for {}", self.time_max),
            ));
        }
        self.total_shots().map(|_| ())
    }

    /// `shots` summed over every grid point.
    pub fn total_shots(&self) -> Result<u64> {
        total_shots(self.shots, self.time_steps)
    }
}

/// T1/T2 decay parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayParams {
    /// Amplitude relaxation time.
    pub t1: f64,
    /// Phase coherence time.
    pub t2: f64,
    pub time_max: f64,
    pub time_steps: usize,
    pub noise_rate: f64,
    pub shots: u64,
    pub seed: Option<u64>,
}

impl Default for DecayParams {
    fn default() -> Self {
        Self {
            t1: 5.0,
            t2: 3.0,
            time_max: 15.0,
            time_steps: 100,
            noise_rate: 0.05,
            shots: 1000,
            seed: None,
        }
    }
}

impl DecayParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("t1", self.t1)?;
        require_positive("t2", self.t2)?;
        require_positive("time_max", self.time_max)?;
        require_grid("time_steps", self.time_steps)?;
        require_noise(self.noise_rate)?;
        require_shots(self.shots)?;
        require_finite(
            "time_max",
            PI * self.time_max,
            "coherence phase pi * time_max overflows",
        )?;
        self.total_shots().map(|_| ())
    }

    /// `shots` summed over both series.
    pub fn total_shots(&self) -> Result<u64> {
        total_shots(self.shots, 2 * self.time_steps)
    }
}

/// Bell-state correlation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BellParams {
    pub noise_rate: f64,
    pub shots: u64,
    /// Bell-state phase.
    pub theta: f64,
    pub seed: Option<u64>,
}

impl Default for BellParams {
    fn default() -> Self {
        Self {
            noise_rate: 0.1,
            shots: 10000,
            theta: 0.0,
            seed: None,
        }
    }
}

impl BellParams {
    pub fn validate(&self) -> Result<()> {
        require_noise(self.noise_rate)?;
        require_shots(self.shots)?;
        if !self.theta.is_finite() {
            return Err(Error::validation(
                "theta",
                format!("must be finite, got {}", self.theta),
            ));
        }
        self.total_shots().map(|_| ())
    }

    /// `shots` summed over the four bases.
    pub fn total_shots(&self) -> Result<u64> {
        total_shots(self.shots, BellBasis::ALL.len())
    }
}

/// Parameters of one generation call, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExperimentParameters {
    Rabi(RabiParams),
    Decay(DecayParams),
    Bell(BellParams),
}

impl ExperimentParameters {
    /// Default parameters for `kind`.
    pub fn default_for(kind: ExperimentKind) -> Self {
        match kind {
            ExperimentKind::Rabi => Self::Rabi(RabiParams::default()),
            ExperimentKind::Decay => Self::Decay(DecayParams::default()),
            ExperimentKind::Bell => Self::Bell(BellParams::default()),
        }
    }

    pub fn kind(&self) -> ExperimentKind {
        match self {
            Self::Rabi(_) => ExperimentKind::Rabi,
            Self::Decay(_) => ExperimentKind::Decay,
            Self::Bell(_) => ExperimentKind::Bell,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        match self {
            Self::Rabi(p) => p.seed,
            Self::Decay(p) => p.seed,
            Self::Bell(p) => p.seed,
        }
    }

    pub fn shots(&self) -> u64 {
        match self {
            Self::Rabi(p) => p.shots,
            Self::Decay(p) => p.shots,
            Self::Bell(p) => p.shots,
        }
    }

    pub fn noise_rate(&self) -> f64 {
        match self {
            Self::Rabi(p) => p.noise_rate,
            Self::Decay(p) => p.noise_rate,
            Self::Bell(p) => p.noise_rate,
        }
    }

    /// Grid size for time-series kinds; `None` for Bell.
    pub fn time_steps(&self) -> Option<usize> {
        match self {
            Self::Rabi(p) => Some(p.time_steps),
            Self::Decay(p) => Some(p.time_steps),
            Self::Bell(_) => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Rabi(p) => p.validate(),
            Self::Decay(p) => p.validate(),
            Self::Bell(p) => p.validate(),
        }
    }
}

impl From<RabiParams> for ExperimentParameters {
    fn from(p: RabiParams) -> Self {
        Self::Rabi(p)
    }
}

impl From<DecayParams> for ExperimentParameters {
    fn from(p: DecayParams) -> Self {
        Self::Decay(p)
    }
}

impl From<BellParams> for ExperimentParameters {
    fn from(p: BellParams) -> Self {
        Self::Bell(p)
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::validation(
            field,
            format!("must be a finite number > 0, got {value}"),
        ))
    }
}

fn require_grid(field: &'static str, steps: usize) -> Result<()> {
    if (2..=MAX_TIME_STEPS).contains(&steps) {
        Ok(())
    } else {
        Err(Error::validation(
            field,
            format!("must be between 2 and {MAX_TIME_STEPS}, got {steps}"),
        ))
    }
}

fn require_finite(field: &'static str, derived: f64, reason: &str) -> Result<()> {
    if derived.is_finite() {
        Ok(())
    } else {
        Err(Error::validation(field, reason))
    }
}

fn total_shots(shots: u64, records: usize) -> Result<u64> {
    u64::try_from(records)
        .ok()
        .and_then(|records| shots.checked_mul(records))
        .ok_or_else(|| {
            Error::validation(
                "shots",
                format!("{shots} shots over {records} measurements overflows the shot total"),
            )
        })
}

fn require_noise(noise_rate: f64) -> Result<()> {
    if noise_rate.is_finite() && noise_rate >= 0.0 {
        Ok(())
    } else {
        Err(Error::validation(
            "noise_rate",
            format!("must be a finite number >= 0, got {noise_rate}"),
        ))
    }
}

fn require_shots(shots: u64) -> Result<()> {
    if shots >= 1 {
        Ok(())
    } else {
        Err(Error::validation("shots", "must be >= 1, got 0"))
    }
}
