use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{EthicalFacts, OptionId};
use super::evaluation::EthicsEvaluator;
use super::governance::{
    DecisionOutcome, GovernanceConfig, GovernanceConfigError, GovernanceEngine,
};
use super::judgement::EthicalJudgement;

/// Facade composing the evaluator registry and the governance engine:
/// callers hand over facts records and receive one decision plus its audit
/// trail. Each decision run is independent; the service holds no state
/// between runs beyond its static configuration.
pub struct DecisionService {
    evaluators: Vec<Box<dyn EthicsEvaluator>>,
    engine: GovernanceEngine,
}

impl DecisionService {
    pub fn new(config: GovernanceConfig) -> Result<Self, GovernanceConfigError> {
        Ok(Self {
            evaluators: Vec::new(),
            engine: GovernanceEngine::new(config)?,
        })
    }

    /// Register a scoring module; any number may join a decision.
    pub fn with_evaluator(mut self, evaluator: Box<dyn EthicsEvaluator>) -> Self {
        self.evaluators.push(evaluator);
        self
    }

    pub fn evaluators(&self) -> impl Iterator<Item = &dyn EthicsEvaluator> + '_ {
        self.evaluators.iter().map(|evaluator| &**evaluator)
    }

    /// Run every registered evaluator over every option, then aggregate and
    /// select.
    ///
    /// A failed `judge` call is isolated to its (option, evaluator) pair:
    /// the failure is recorded in the report, the affected option enters
    /// aggregation without judgements (and therefore stays ineligible), and
    /// the run continues for everything else.
    pub fn decide(
        &self,
        options: &[EthicalFacts],
        baseline_option_id: Option<&OptionId>,
    ) -> Result<DecisionReport, DecisionError> {
        let mut candidate_order: Vec<OptionId> = Vec::with_capacity(options.len());
        for facts in options {
            if candidate_order.contains(&facts.option_id) {
                return Err(DecisionError::DuplicateOption(facts.option_id.clone()));
            }
            candidate_order.push(facts.option_id.clone());
        }

        let mut judgements_by_option: BTreeMap<OptionId, Vec<EthicalJudgement>> = BTreeMap::new();
        let mut failures = Vec::new();

        for facts in options {
            let mut judgements = Vec::with_capacity(self.evaluators.len());
            let mut failed = false;
            for evaluator in &self.evaluators {
                match evaluator.judge(facts) {
                    Ok(judgement) => judgements.push(judgement),
                    Err(error) => {
                        warn!(
                            option = facts.option_id.as_str(),
                            evaluator = evaluator.name(),
                            %error,
                            "evaluation failed; option excluded from selection"
                        );
                        failures.push(EvaluationFailure {
                            option_id: facts.option_id.clone(),
                            evaluator: evaluator.name().to_string(),
                            reason: error.to_string(),
                        });
                        failed = true;
                    }
                }
            }
            // An unassessable option keeps its slot in the candidate order
            // but contributes no judgements, so aggregation marks it
            // ineligible rather than aborting the run.
            if !failed {
                judgements_by_option.insert(facts.option_id.clone(), judgements);
            }
        }

        let outcome = self
            .engine
            .select(judgements_by_option, &candidate_order, baseline_option_id);
        Ok(DecisionReport { outcome, failures })
    }
}

/// Decision outcome plus the per-pair failures recorded along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    pub outcome: DecisionOutcome,
    pub failures: Vec<EvaluationFailure>,
}

/// Diagnostic entry for a single failed judge call, with enough context to
/// reconstruct the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationFailure {
    pub option_id: OptionId,
    pub evaluator: String,
    pub reason: String,
}

/// Input errors raised by the decision service before evaluation starts.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("duplicate candidate option id {0:?}")]
    DuplicateOption(OptionId),
}
