use std::collections::BTreeMap;

use super::super::domain::EthicalFacts;
use super::super::judgement::{MetadataValue, Verdict};
use super::{EthicsEvaluator, Evaluation};

const COMPLIANT_SCORE: f64 = 0.8;

/// Deliberately minimal deontic module: forbid when rights or explicit
/// rules are violated, otherwise a fixed favourable score. Pairs naturally
/// with richer consequentialist modules as a veto voter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RightsFirstEvaluator;

impl EthicsEvaluator for RightsFirstEvaluator {
    fn name(&self) -> &str {
        "rights_first_compliance"
    }

    fn stakeholder(&self) -> &str {
        "patients_and_public"
    }

    fn evaluate(&self, facts: &EthicalFacts) -> Evaluation {
        let rights = &facts.rights_and_duties;
        let mut metadata = BTreeMap::new();
        metadata.insert(
            "rights.violates_rights".to_string(),
            MetadataValue::Boolean(rights.violates_rights),
        );
        metadata.insert(
            "rights.violates_explicit_rule".to_string(),
            MetadataValue::Boolean(rights.violates_explicit_rule),
        );

        if rights.violates_rights || rights.violates_explicit_rule {
            let mut reasons = vec![
                "Forbid: rights and explicit rules take precedence over all other considerations."
                    .to_string(),
            ];
            if rights.violates_rights {
                reasons.push("hard constraint fired: violates_rights".to_string());
            }
            if rights.violates_explicit_rule {
                reasons.push("hard constraint fired: violates_explicit_rule".to_string());
            }
            Evaluation {
                verdict: Verdict::Forbid,
                score: 0.0,
                reasons,
                metadata,
            }
        } else {
            Evaluation {
                verdict: Verdict::Prefer,
                score: COMPLIANT_SCORE,
                reasons: vec![
                    "Rights and explicit rules are respected; no deontic veto from this module."
                        .to_string(),
                ],
                metadata,
            }
        }
    }
}
