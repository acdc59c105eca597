use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tie-break strategy applied to options with equal aggregated scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieBreaker {
    /// Earlier position in the caller-supplied candidate order wins.
    #[default]
    First,
}

impl TieBreaker {
    pub const fn label(self) -> &'static str {
        match self {
            TieBreaker::First => "first",
        }
    }
}

impl FromStr for TieBreaker {
    type Err = GovernanceConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(TieBreaker::First),
            _ => Err(GovernanceConfigError::UnknownTieBreaker {
                found: value.to_string(),
            }),
        }
    }
}

/// Process-wide governance dials supplied once per decision run; an
/// explicit immutable value threaded into the engine, never ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    pub stakeholder_weights: BTreeMap<String, f64>,
    pub evaluator_weights: BTreeMap<String, f64>,
    /// Evaluators whose `forbid` verdict unconditionally forbids an option.
    pub veto_evaluators: BTreeSet<String>,
    /// Options with an aggregated score below this are excluded from
    /// selection.
    pub min_score_threshold: f64,
    /// When true, a forbidden option can never be selected regardless of
    /// score.
    pub require_non_forbidden: bool,
    pub tie_breaker: TieBreaker,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            stakeholder_weights: BTreeMap::new(),
            evaluator_weights: BTreeMap::new(),
            veto_evaluators: BTreeSet::new(),
            min_score_threshold: 0.0,
            require_non_forbidden: true,
            tie_breaker: TieBreaker::First,
        }
    }
}

impl GovernanceConfig {
    /// Weight lookups default to 1.0 for anything not configured.
    pub(crate) fn evaluator_weight(&self, name: &str) -> f64 {
        self.evaluator_weights.get(name).copied().unwrap_or(1.0)
    }

    pub(crate) fn stakeholder_weight(&self, name: &str) -> f64 {
        self.stakeholder_weights.get(name).copied().unwrap_or(1.0)
    }

    /// Reject malformed configuration before any evaluation runs; a bad
    /// configuration is fatal to the decision run.
    pub fn validate(&self) -> Result<(), GovernanceConfigError> {
        if !self.min_score_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.min_score_threshold)
        {
            return Err(GovernanceConfigError::ThresholdOutOfRange {
                found: self.min_score_threshold,
            });
        }
        for (name, weight) in &self.evaluator_weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(GovernanceConfigError::NonPositiveWeight {
                    scope: "evaluator",
                    name: name.clone(),
                    found: *weight,
                });
            }
        }
        for (name, weight) in &self.stakeholder_weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(GovernanceConfigError::NonPositiveWeight {
                    scope: "stakeholder",
                    name: name.clone(),
                    found: *weight,
                });
            }
        }
        Ok(())
    }
}

/// Configuration errors detected at validation time.
#[derive(Debug, thiserror::Error)]
pub enum GovernanceConfigError {
    #[error("min_score_threshold must lie in [0, 1], found {found}")]
    ThresholdOutOfRange { found: f64 },
    #[error("{scope} weight for {name:?} must be a finite positive number, found {found}")]
    NonPositiveWeight {
        scope: &'static str,
        name: String,
        found: f64,
    },
    #[error("unknown tie-breaker strategy {found:?}")]
    UnknownTieBreaker { found: String },
}
