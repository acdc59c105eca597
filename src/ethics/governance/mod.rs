mod config;

pub use config::{GovernanceConfig, GovernanceConfigError, TieBreaker};

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{clamp_unit, OptionId};
use super::judgement::{EthicalJudgement, MetadataValue, Verdict};

const AGGREGATE_EVALUATOR_NAME: &str = "governance_aggregate";
const AGGREGATE_STAKEHOLDER: &str = "all_stakeholders";

/// Final artifact of one aggregation run; nothing is mutated after
/// construction, and identical inputs always reproduce an equal outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub aggregated_judgements: BTreeMap<OptionId, EthicalJudgement>,
    /// Eligible options only, best first.
    pub ranked_options: Vec<OptionId>,
    pub forbidden_options: BTreeSet<OptionId>,
    pub selected_option_id: Option<OptionId>,
    pub rationale: String,
}

/// Combines per-option judgement lists under the governance configuration,
/// then filters, ranks, and selects.
#[derive(Debug)]
pub struct GovernanceEngine {
    config: GovernanceConfig,
}

struct OptionAggregate {
    judgement: EthicalJudgement,
    vetoed_by: Option<String>,
    contributing: usize,
}

struct RankedCandidate {
    position: usize,
    option_id: OptionId,
    score: f64,
}

impl GovernanceEngine {
    /// Validate the configuration up front; a malformed configuration
    /// aborts the decision run before any judgement is touched.
    pub fn new(config: GovernanceConfig) -> Result<Self, GovernanceConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Aggregate, filter, rank, and select over the supplied judgements.
    ///
    /// `candidate_order` is the authoritative candidate list and defines
    /// tie-break positions; judgement-map entries outside it are dropped
    /// with a warning. A candidate without judgements aggregates to 0.0 and
    /// stays ineligible.
    pub fn select(
        &self,
        judgements_by_option: BTreeMap<OptionId, Vec<EthicalJudgement>>,
        candidate_order: &[OptionId],
        baseline_option_id: Option<&OptionId>,
    ) -> DecisionOutcome {
        let mut judgements_by_option = judgements_by_option;
        let mut aggregated_judgements = BTreeMap::new();
        let mut forbidden_options = BTreeSet::new();
        let mut veto_notes = Vec::new();
        let mut eligible = Vec::new();
        let mut candidates = 0usize;

        for (position, option_id) in candidate_order.iter().enumerate() {
            if aggregated_judgements.contains_key(option_id) {
                warn!(
                    option = option_id.as_str(),
                    "duplicate entry in candidate order; keeping the first position"
                );
                continue;
            }
            candidates += 1;

            let judgements = judgements_by_option.remove(option_id).unwrap_or_default();
            let aggregate = self.aggregate_option(option_id, &judgements);
            let score = aggregate.judgement.normative_score;

            let forbidden = aggregate.vetoed_by.is_some();
            if let Some(evaluator) = &aggregate.vetoed_by {
                forbidden_options.insert(option_id.clone());
                veto_notes.push(format!("{} vetoed by {}", option_id.as_str(), evaluator));
            }

            let permitted = !forbidden || !self.config.require_non_forbidden;
            if aggregate.contributing > 0 && score >= self.config.min_score_threshold && permitted
            {
                eligible.push(RankedCandidate {
                    position,
                    option_id: option_id.clone(),
                    score,
                });
            }

            debug!(
                option = option_id.as_str(),
                score,
                verdict = aggregate.judgement.verdict.label(),
                forbidden,
                contributing = aggregate.contributing,
                "option aggregated"
            );
            aggregated_judgements.insert(option_id.clone(), aggregate.judgement);
        }

        for ignored in judgements_by_option.keys() {
            warn!(
                option = ignored.as_str(),
                "judgements supplied for an option missing from the candidate order; not ranked"
            );
        }

        match self.config.tie_breaker {
            TieBreaker::First => eligible.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(Ordering::Equal)
                    .then(a.position.cmp(&b.position))
            }),
        }

        let ranked_options: Vec<OptionId> = eligible
            .iter()
            .map(|candidate| candidate.option_id.clone())
            .collect();
        let selected_option_id = ranked_options.first().cloned();

        let rationale = match &selected_option_id {
            Some(selected) => {
                let score = aggregated_judgements
                    .get(selected)
                    .map(|judgement| judgement.normative_score)
                    .unwrap_or(0.0);
                let mut parts = vec![format!(
                    "Selected {} with aggregated score {:.3}.",
                    selected.as_str(),
                    score
                )];
                if !veto_notes.is_empty() {
                    parts.push(format!("Vetoes applied: {}.", veto_notes.join("; ")));
                }
                let excluded = candidates - ranked_options.len();
                if excluded > 0 {
                    parts.push(format!(
                        "{excluded} of {candidates} candidate(s) excluded ({} forbidden).",
                        forbidden_options.len()
                    ));
                }
                parts.join(" ")
            }
            None => {
                let mut parts = vec![format!(
                    "No permissible option exists among {candidates} candidate(s) ({} forbidden).",
                    forbidden_options.len()
                )];
                if !veto_notes.is_empty() {
                    parts.push(format!("Vetoes applied: {}.", veto_notes.join("; ")));
                }
                if let Some(baseline) = baseline_option_id {
                    parts.push(format!(
                        "Baseline {} is reported for reference only and is not auto-selected.",
                        baseline.as_str()
                    ));
                }
                parts.join(" ")
            }
        };

        info!(
            selected = selected_option_id
                .as_ref()
                .map(OptionId::as_str)
                .unwrap_or("<none>"),
            ranked = ranked_options.len(),
            forbidden = forbidden_options.len(),
            "governance selection complete"
        );

        DecisionOutcome {
            aggregated_judgements,
            ranked_options,
            forbidden_options,
            selected_option_id,
            rationale,
        }
    }

    fn aggregate_option(
        &self,
        option_id: &OptionId,
        judgements: &[EthicalJudgement],
    ) -> OptionAggregate {
        // A veto dominates the weighted combination entirely.
        if let Some(veto) = judgements.iter().find(|judgement| {
            judgement.verdict == Verdict::Forbid
                && self.config.veto_evaluators.contains(&judgement.evaluator_name)
        }) {
            warn!(
                option = option_id.as_str(),
                evaluator = veto.evaluator_name.as_str(),
                "veto applied"
            );
            let mut reasons = vec![format!("Vetoed by {}.", veto.evaluator_name)];
            reasons.extend(
                veto.reasons
                    .iter()
                    .map(|reason| format!("[{}] {}", veto.evaluator_name, reason)),
            );
            let mut metadata = BTreeMap::new();
            metadata.insert(
                "veto.evaluator".to_string(),
                MetadataValue::Text(veto.evaluator_name.clone()),
            );
            return OptionAggregate {
                judgement: EthicalJudgement {
                    evaluator_name: AGGREGATE_EVALUATOR_NAME.to_string(),
                    stakeholder: AGGREGATE_STAKEHOLDER.to_string(),
                    verdict: Verdict::Forbid,
                    normative_score: 0.0,
                    reasons,
                    metadata,
                },
                vetoed_by: Some(veto.evaluator_name.clone()),
                contributing: judgements.len(),
            };
        }

        if judgements.is_empty() {
            return OptionAggregate {
                judgement: EthicalJudgement {
                    evaluator_name: AGGREGATE_EVALUATOR_NAME.to_string(),
                    stakeholder: AGGREGATE_STAKEHOLDER.to_string(),
                    verdict: Verdict::from_score(0.0),
                    normative_score: 0.0,
                    reasons: vec![
                        "No contributing judgements; the option cannot be assessed and is \
                         excluded from selection."
                            .to_string(),
                    ],
                    metadata: BTreeMap::new(),
                },
                vetoed_by: None,
                contributing: 0,
            };
        }

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut reasons = Vec::new();
        let mut metadata = BTreeMap::new();

        for judgement in judgements {
            let evaluator_weight = self.config.evaluator_weight(&judgement.evaluator_name);
            let stakeholder_weight = self.config.stakeholder_weight(&judgement.stakeholder);
            // Evaluator and stakeholder weights compose multiplicatively.
            let effective = evaluator_weight * stakeholder_weight;

            weighted_sum += effective * judgement.normative_score;
            total_weight += effective;

            reasons.extend(
                judgement
                    .reasons
                    .iter()
                    .map(|reason| format!("[{}] {}", judgement.evaluator_name, reason)),
            );
            metadata.insert(
                format!("{}.weight", judgement.evaluator_name),
                MetadataValue::Decimal(effective),
            );
            metadata.insert(
                format!("{}.score", judgement.evaluator_name),
                MetadataValue::Decimal(judgement.normative_score),
            );
            metadata.insert(
                format!("{}.verdict", judgement.evaluator_name),
                MetadataValue::Text(judgement.verdict.label().to_string()),
            );
        }

        let score = if total_weight > 0.0 {
            clamp_unit(weighted_sum / total_weight)
        } else {
            0.0
        };
        metadata.insert("aggregate.score".to_string(), MetadataValue::Decimal(score));
        metadata.insert(
            "aggregate.total_weight".to_string(),
            MetadataValue::Decimal(total_weight),
        );

        OptionAggregate {
            judgement: EthicalJudgement {
                evaluator_name: AGGREGATE_EVALUATOR_NAME.to_string(),
                stakeholder: AGGREGATE_STAKEHOLDER.to_string(),
                verdict: Verdict::from_score(score),
                normative_score: score,
                reasons,
                metadata,
            },
            vetoed_by: None,
            contributing: judgements.len(),
        }
    }
}

/// Single entry point for external callers: validate the configuration,
/// then aggregate and select in one pass.
pub fn select_option(
    judgements_by_option: BTreeMap<OptionId, Vec<EthicalJudgement>>,
    config: GovernanceConfig,
    candidate_order: &[OptionId],
    baseline_option_id: Option<&OptionId>,
) -> Result<DecisionOutcome, GovernanceConfigError> {
    let engine = GovernanceEngine::new(config)?;
    Ok(engine.select(judgements_by_option, candidate_order, baseline_option_id))
}
