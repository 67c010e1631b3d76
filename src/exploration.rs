//! Epsilon decay schedules for exploration control.
//!
//! The exploration rate for a training trial is a pure function of the trial
//! counter `t` and a configured decay law. The law is a closed enum: unknown
//! names are rejected when the configuration string is parsed, never during
//! training.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A decay law mapping the trial counter to an exploration rate.
///
/// Note that `Cos` oscillates and can go negative; the epsilon it produces
/// is used as-is in a raw `draw < epsilon` comparison, not clamped into
/// [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayLaw {
    /// `epsilon = c ^ t`
    ConstPower,
    /// `epsilon = exp(-c * t)`
    ExpPower,
    /// `epsilon = 1 / t^2` (the constant is ignored)
    TSquareReciprocal,
    /// `epsilon = cos(c * t)`
    Cos,
}

impl DecayLaw {
    /// The accepted configuration names, in canonical order.
    pub const NAMES: [&'static str; 4] = ["const_power", "exp_power", "t_square_reciprocal", "cos"];

    /// Evaluate the law at trial `t` with decay constant `c`.
    ///
    /// `t` starts at 1 by construction of [`crate::q_learning::LearningAgent`];
    /// `TSquareReciprocal` divides by `t^2` and relies on that invariant.
    pub fn evaluate(&self, t: u32, c: f64) -> f64 {
        let t = f64::from(t);
        match self {
            DecayLaw::ConstPower => c.powf(t),
            DecayLaw::ExpPower => (-c * t).exp(),
            DecayLaw::TSquareReciprocal => 1.0 / (t * t),
            DecayLaw::Cos => (c * t).cos(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DecayLaw::ConstPower => "const_power",
            DecayLaw::ExpPower => "exp_power",
            DecayLaw::TSquareReciprocal => "t_square_reciprocal",
            DecayLaw::Cos => "cos",
        }
    }
}

impl fmt::Display for DecayLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DecayLaw {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "const_power" => Ok(DecayLaw::ConstPower),
            "exp_power" => Ok(DecayLaw::ExpPower),
            "t_square_reciprocal" => Ok(DecayLaw::TSquareReciprocal),
            "cos" => Ok(DecayLaw::Cos),
            other => Err(Error::UnknownDecayLaw {
                name: other.to_string(),
                expected: Self::NAMES.join(", "),
            }),
        }
    }
}

/// A decay law paired with its constant — the full exploration schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonSchedule {
    pub law: DecayLaw,
    pub constant: f64,
}

impl EpsilonSchedule {
    pub fn new(law: DecayLaw, constant: f64) -> Self {
        Self { law, constant }
    }

    /// Parse the law from its configuration name. Fails fast on unknown names.
    pub fn parse(law: &str, constant: f64) -> Result<Self> {
        Ok(Self {
            law: law.parse()?,
            constant,
        })
    }

    /// Epsilon for trial `t`.
    pub fn epsilon_at(&self, t: u32) -> f64 {
        self.law.evaluate(t, self.constant)
    }
}
