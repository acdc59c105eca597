use super::super::domain::{clamp_unit, EthicalFacts, JusticeAndFairness};
use super::config::TriageConfig;

const NEUTRAL_SCORE: f64 = 0.5;

const COERCION_PENALTY: f64 = 0.4;
const MANIPULATION_PENALTY: f64 = 0.3;
const NO_CHOICE_PENALTY: f64 = 0.4;
const NO_WITHDRAWAL_PENALTY: f64 = 0.3;

const APPROVED_PROCEDURE_CREDIT: f64 = 0.4;
const CONSULTATION_CREDIT: f64 = 0.2;
const EXPLAINABILITY_CREDIT: f64 = 0.2;
const CONTESTATION_CREDIT: f64 = 0.2;

const MAX_FAIRNESS_PENALTY: f64 = 0.9;

/// Per-dimension proxy scores feeding the weighted base score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DimensionScores {
    pub benefit: f64,
    pub harm_inverse: f64,
    pub urgency: f64,
    pub disadvantaged: f64,
    pub autonomy: f64,
    pub procedural: f64,
}

impl DimensionScores {
    /// Weighted sum over the configured weights, divided by their total.
    pub(crate) fn weighted_base(&self, config: &TriageConfig) -> f64 {
        let weighted_sum = config.benefit_weight * self.benefit
            + config.harm_weight * self.harm_inverse
            + config.urgency_weight * self.urgency
            + config.disadvantaged_weight * self.disadvantaged
            + config.autonomy_weight * self.autonomy
            + config.procedural_weight * self.procedural;
        let total_weight = config.total_weight();
        if total_weight > 0.0 {
            clamp_unit(weighted_sum / total_weight)
        } else {
            0.0
        }
    }
}

/// Score each ethical dimension on its [0, 1] proxy, collecting concern
/// lines in detection order for the judgement's audit trail.
pub(crate) fn score_dimensions(facts: &EthicalFacts) -> (DimensionScores, Vec<String>) {
    let mut concerns = Vec::new();
    let consequences = &facts.consequences;
    let fairness = &facts.justice_and_fairness;

    let benefit = clamp_unit(consequences.expected_benefit);
    let harm_inverse = clamp_unit(1.0 - consequences.expected_harm);
    let urgency = clamp_unit(consequences.urgency);

    // Neutral unless the option explicitly prioritizes the worst-off.
    let disadvantaged = if fairness.prioritizes_most_disadvantaged {
        1.0
    } else {
        NEUTRAL_SCORE
    };

    let autonomy = match facts.autonomy_and_agency.value() {
        Some(autonomy) => {
            let mut score = 1.0;
            if autonomy.coercion_or_undue_influence {
                score -= COERCION_PENALTY;
                concerns.push("autonomy concern: coercion or undue influence".to_string());
            }
            if autonomy.manipulative_design_present {
                score -= MANIPULATION_PENALTY;
                concerns.push("autonomy concern: manipulative design present".to_string());
            }
            if !autonomy.has_meaningful_choice {
                score -= NO_CHOICE_PENALTY;
                concerns.push("autonomy concern: no meaningful choice".to_string());
            }
            if !autonomy.can_withdraw_without_penalty {
                score -= NO_WITHDRAWAL_PENALTY;
                concerns.push("autonomy concern: cannot withdraw without penalty".to_string());
            }
            clamp_unit(score)
        }
        None => NEUTRAL_SCORE,
    };

    let procedural = match facts.procedural_and_legitimacy.value() {
        Some(procedure) => {
            let mut score = 0.0;
            if procedure.followed_approved_procedure {
                score += APPROVED_PROCEDURE_CREDIT;
            }
            if procedure.stakeholders_consulted {
                score += CONSULTATION_CREDIT;
            }
            if procedure.decision_explainable_to_public {
                score += EXPLAINABILITY_CREDIT;
            }
            if procedure.contestation_available {
                score += CONTESTATION_CREDIT;
            }
            clamp_unit(score)
        }
        None => NEUTRAL_SCORE,
    };

    (
        DimensionScores {
            benefit,
            harm_inverse,
            urgency,
            disadvantaged,
            autonomy,
            procedural,
        },
        concerns,
    )
}

/// Sum the configured penalty for each raised fairness flag, capped at
/// 0.9 so a penalized option never loses its entire score, and describe
/// which flags fired.
pub(crate) fn fairness_penalty(
    fairness: &JusticeAndFairness,
    config: &TriageConfig,
) -> (f64, Vec<String>) {
    let mut penalty = 0.0;
    let mut flags = Vec::new();

    if fairness.discriminates_on_protected_attr {
        penalty += config.discrimination_penalty;
        flags.push("discriminates on a protected attribute".to_string());
    }
    if fairness.exploits_vulnerable_population {
        penalty += config.exploitation_penalty;
        flags.push("exploits a vulnerable population".to_string());
    }
    if fairness.exacerbates_power_imbalance {
        penalty += config.power_imbalance_penalty;
        flags.push("exacerbates a power imbalance".to_string());
    }

    (penalty.clamp(0.0, MAX_FAIRNESS_PENALTY), flags)
}
