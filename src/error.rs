use crate::ethics::domain::FactsError;
use crate::ethics::evaluation::{EvaluationError, TriageConfigError};
use crate::ethics::governance::GovernanceConfigError;
use crate::ethics::service::DecisionError;

/// Crate-level error roll-up so embedding callers can carry one error type
/// across configuration, input, and evaluation failures.
#[derive(Debug, thiserror::Error)]
pub enum EthicsError {
    #[error("configuration error: {0}")]
    Governance(#[from] GovernanceConfigError),
    #[error("configuration error: {0}")]
    Evaluator(#[from] TriageConfigError),
    #[error("input error: {0}")]
    Facts(#[from] FactsError),
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
    #[error("decision error: {0}")]
    Decision(#[from] DecisionError),
}
