use serde::{Deserialize, Serialize};

/// Rubric configuration for the reference triage evaluator: weights over
/// the ethical dimensions (the sum does not need to be 1.0) plus penalty
/// dials. Fixed at construction; evaluators share no mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    pub benefit_weight: f64,
    pub harm_weight: f64,
    pub urgency_weight: f64,
    pub disadvantaged_weight: f64,
    pub autonomy_weight: f64,
    pub procedural_weight: f64,
    pub discrimination_penalty: f64,
    pub exploitation_penalty: f64,
    pub power_imbalance_penalty: f64,
    /// At uncertainty 1.0 the running score is multiplied by
    /// (1 - max_uncertainty_penalty); at 0.0 there is no dampening.
    pub max_uncertainty_penalty: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            benefit_weight: 0.30,
            harm_weight: 0.20,
            urgency_weight: 0.20,
            disadvantaged_weight: 0.15,
            autonomy_weight: 0.10,
            procedural_weight: 0.05,
            discrimination_penalty: 0.5,
            exploitation_penalty: 0.4,
            power_imbalance_penalty: 0.3,
            max_uncertainty_penalty: 0.4,
        }
    }
}

impl TriageConfig {
    pub(crate) fn total_weight(&self) -> f64 {
        self.benefit_weight
            + self.harm_weight
            + self.urgency_weight
            + self.disadvantaged_weight
            + self.autonomy_weight
            + self.procedural_weight
    }

    /// Reject configurations that could zero out the weighted average or
    /// push scores outside [0, 1]. Raised at construction, never during an
    /// `evaluate` call.
    pub fn validate(&self) -> Result<(), TriageConfigError> {
        let weights = [
            ("benefit_weight", self.benefit_weight),
            ("harm_weight", self.harm_weight),
            ("urgency_weight", self.urgency_weight),
            ("disadvantaged_weight", self.disadvantaged_weight),
            ("autonomy_weight", self.autonomy_weight),
            ("procedural_weight", self.procedural_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TriageConfigError::InvalidWeight {
                    name,
                    found: weight,
                });
            }
        }
        if self.total_weight() <= 0.0 {
            return Err(TriageConfigError::ZeroTotalWeight);
        }

        let penalties = [
            ("discrimination_penalty", self.discrimination_penalty),
            ("exploitation_penalty", self.exploitation_penalty),
            ("power_imbalance_penalty", self.power_imbalance_penalty),
            ("max_uncertainty_penalty", self.max_uncertainty_penalty),
        ];
        for (name, penalty) in penalties {
            if !penalty.is_finite() || !(0.0..=1.0).contains(&penalty) {
                return Err(TriageConfigError::PenaltyOutOfRange {
                    name,
                    found: penalty,
                });
            }
        }

        Ok(())
    }
}

/// Configuration errors for the reference triage evaluator.
#[derive(Debug, thiserror::Error)]
pub enum TriageConfigError {
    #[error("{name} must be a finite non-negative number, found {found}")]
    InvalidWeight { name: &'static str, found: f64 },
    #[error("dimension weights must not all be zero")]
    ZeroTotalWeight,
    #[error("{name} must lie in [0, 1], found {found}")]
    PenaltyOutOfRange { name: &'static str, found: f64 },
}
