mod config;
mod rights;
mod rules;

pub use config::{TriageConfig, TriageConfigError};
pub use rights::RightsFirstEvaluator;

use std::collections::BTreeMap;

use super::domain::{clamp_unit, EthicalFacts, FactsError};
use super::judgement::{EthicalJudgement, MetadataValue, Verdict};

/// Output of one `evaluate` call before evaluator identity is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub score: f64,
    pub reasons: Vec<String>,
    pub metadata: BTreeMap<String, MetadataValue>,
}

/// Capability interface implemented by every scoring module.
///
/// Implementations must be deterministic and side-effect free over a
/// validated facts record, and must degrade unassessed dimensions to their
/// neutral interpretation instead of failing. Any number of modules may be
/// registered for a decision; each represents one ethical theory,
/// stakeholder, or domain specialization.
pub trait EthicsEvaluator: Send + Sync {
    fn name(&self) -> &str;

    /// Whose interests this module represents.
    fn stakeholder(&self) -> &str;

    /// Core normative logic over validated facts.
    fn evaluate(&self, facts: &EthicalFacts) -> Evaluation;

    /// Validate the facts, run [`evaluate`](Self::evaluate), and attach the
    /// module's identity. The returned score is clamped into [0, 1] so
    /// downstream consumers can rely on the range without re-checking.
    fn judge(&self, facts: &EthicalFacts) -> Result<EthicalJudgement, EvaluationError> {
        facts.validate()?;
        let evaluation = self.evaluate(facts);
        Ok(EthicalJudgement {
            evaluator_name: self.name().to_string(),
            stakeholder: self.stakeholder().to_string(),
            verdict: evaluation.verdict,
            normative_score: clamp_unit(evaluation.score),
            reasons: evaluation.reasons,
            metadata: evaluation.metadata,
        })
    }
}

/// Error raised for a single (option, evaluator) judgement. Failures are
/// isolated per pair and never abort a whole decision run.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    InvalidFacts(#[from] FactsError),
}

/// Reference scoring module for scarce-resource triage decisions.
///
/// Enforces hard deontic constraints on rights and explicit rules, then
/// scores benefit, inverse harm, urgency, priority for the most
/// disadvantaged, autonomy, and procedural legitimacy under the configured
/// weights, penalizes unfair options, and dampens the result under
/// epistemic uncertainty.
#[derive(Debug)]
pub struct TriageEvaluator {
    config: TriageConfig,
}

impl TriageEvaluator {
    pub fn new(config: TriageConfig) -> Result<Self, TriageConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }
}

impl Default for TriageEvaluator {
    fn default() -> Self {
        Self {
            config: TriageConfig::default(),
        }
    }
}

impl EthicsEvaluator for TriageEvaluator {
    fn name(&self) -> &str {
        "clinical_triage"
    }

    fn stakeholder(&self) -> &str {
        "patients_and_public"
    }

    fn evaluate(&self, facts: &EthicalFacts) -> Evaluation {
        let config = &self.config;
        let mut metadata = BTreeMap::new();

        let rights = &facts.rights_and_duties;
        metadata.insert(
            "rights.violates_rights".to_string(),
            MetadataValue::Boolean(rights.violates_rights),
        );
        metadata.insert(
            "rights.violates_explicit_rule".to_string(),
            MetadataValue::Boolean(rights.violates_explicit_rule),
        );
        metadata.insert(
            "rights.has_valid_consent".to_string(),
            MetadataValue::Boolean(rights.has_valid_consent),
        );
        metadata.insert(
            "rights.role_duty_conflict".to_string(),
            MetadataValue::Boolean(rights.role_duty_conflict),
        );

        // Hard deontic constraints dominate everything else; no further
        // computation happens once one fires.
        if rights.violates_rights || rights.violates_explicit_rule {
            metadata.insert(
                "hard_constraint_triggered".to_string(),
                MetadataValue::Boolean(true),
            );
            let mut reasons = vec![
                "Forbidden: the option violates fundamental rights and/or an explicit rule."
                    .to_string(),
            ];
            if rights.violates_rights {
                reasons.push("hard constraint fired: violates_rights".to_string());
            }
            if rights.violates_explicit_rule {
                reasons.push("hard constraint fired: violates_explicit_rule".to_string());
            }
            return Evaluation {
                verdict: Verdict::Forbid,
                score: 0.0,
                reasons,
                metadata,
            };
        }
        metadata.insert(
            "hard_constraint_triggered".to_string(),
            MetadataValue::Boolean(false),
        );

        let (scores, mut concerns) = rules::score_dimensions(facts);
        let base_score = scores.weighted_base(config);

        let (penalty, fairness_flags) = rules::fairness_penalty(&facts.justice_and_fairness, config);
        if !fairness_flags.is_empty() {
            concerns.push(format!(
                "fairness concern(s) detected: {}",
                fairness_flags.join(", ")
            ));
        }
        let score_after_fairness = base_score * (1.0 - penalty);

        let mut final_score = score_after_fairness;
        match facts.epistemic_status.value() {
            Some(epistemic) => {
                let uncertainty = clamp_unit(epistemic.uncertainty_level);
                let factor = 1.0 - config.max_uncertainty_penalty * uncertainty;
                final_score *= factor;
                metadata.insert(
                    "uncertainty.level".to_string(),
                    MetadataValue::Decimal(uncertainty),
                );
                metadata.insert(
                    "uncertainty.factor".to_string(),
                    MetadataValue::Decimal(factor),
                );
                if uncertainty > 0.5 {
                    concerns.push(format!(
                        "high epistemic uncertainty ({uncertainty:.2}) reduces confidence in this option"
                    ));
                }
            }
            None => {
                metadata.insert(
                    "uncertainty.factor".to_string(),
                    MetadataValue::Decimal(1.0),
                );
            }
        }
        let final_score = clamp_unit(final_score);

        metadata.insert(
            "dimension.benefit".to_string(),
            MetadataValue::Decimal(scores.benefit),
        );
        metadata.insert(
            "dimension.harm_inverse".to_string(),
            MetadataValue::Decimal(scores.harm_inverse),
        );
        metadata.insert(
            "dimension.urgency".to_string(),
            MetadataValue::Decimal(scores.urgency),
        );
        metadata.insert(
            "dimension.disadvantaged".to_string(),
            MetadataValue::Decimal(scores.disadvantaged),
        );
        metadata.insert(
            "dimension.autonomy".to_string(),
            MetadataValue::Decimal(scores.autonomy),
        );
        metadata.insert(
            "dimension.procedural".to_string(),
            MetadataValue::Decimal(scores.procedural),
        );
        metadata.insert(
            "weight.benefit".to_string(),
            MetadataValue::Decimal(config.benefit_weight),
        );
        metadata.insert(
            "weight.harm".to_string(),
            MetadataValue::Decimal(config.harm_weight),
        );
        metadata.insert(
            "weight.urgency".to_string(),
            MetadataValue::Decimal(config.urgency_weight),
        );
        metadata.insert(
            "weight.disadvantaged".to_string(),
            MetadataValue::Decimal(config.disadvantaged_weight),
        );
        metadata.insert(
            "weight.autonomy".to_string(),
            MetadataValue::Decimal(config.autonomy_weight),
        );
        metadata.insert(
            "weight.procedural".to_string(),
            MetadataValue::Decimal(config.procedural_weight),
        );
        metadata.insert("score.base".to_string(), MetadataValue::Decimal(base_score));
        metadata.insert(
            "fairness.penalty_applied".to_string(),
            MetadataValue::Decimal(penalty),
        );
        if !fairness_flags.is_empty() {
            metadata.insert(
                "fairness.flags".to_string(),
                MetadataValue::Text(fairness_flags.join(", ")),
            );
        }
        metadata.insert(
            "score.after_fairness".to_string(),
            MetadataValue::Decimal(score_after_fairness),
        );
        metadata.insert(
            "score.final".to_string(),
            MetadataValue::Decimal(final_score),
        );

        let mut reasons = Vec::with_capacity(concerns.len() + 1);
        reasons.push(
            "Composite triage judgement over benefit, harm, urgency, priority for the \
             disadvantaged, autonomy, and procedural legitimacy."
                .to_string(),
        );
        reasons.extend(concerns);

        Evaluation {
            verdict: Verdict::from_score(final_score),
            score: final_score,
            reasons,
            metadata,
        }
    }
}
