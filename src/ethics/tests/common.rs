use std::collections::BTreeMap;

use crate::ethics::domain::{
    Assessment, AutonomyAndAgency, Consequences, DistributivePattern, EpistemicStatus,
    EthicalFacts, EvidenceQuality, JusticeAndFairness, OptionId, ProceduralAndLegitimacy,
    RightsAndDuties,
};
use crate::ethics::evaluation::{RightsFirstEvaluator, TriageEvaluator};
use crate::ethics::governance::GovernanceConfig;
use crate::ethics::judgement::{EthicalJudgement, Verdict};
use crate::ethics::service::DecisionService;

pub(super) fn clean_rights() -> RightsAndDuties {
    RightsAndDuties {
        violates_rights: false,
        has_valid_consent: true,
        violates_explicit_rule: false,
        role_duty_conflict: false,
    }
}

pub(super) fn fair_justice(prioritizes_most_disadvantaged: bool) -> JusticeAndFairness {
    JusticeAndFairness {
        discriminates_on_protected_attr: false,
        prioritizes_most_disadvantaged,
        distributive_pattern: DistributivePattern::Maximin,
        exploits_vulnerable_population: false,
        exacerbates_power_imbalance: false,
    }
}

pub(super) fn full_autonomy() -> AutonomyAndAgency {
    AutonomyAndAgency {
        has_meaningful_choice: true,
        coercion_or_undue_influence: false,
        can_withdraw_without_penalty: true,
        manipulative_design_present: false,
    }
}

pub(super) fn full_procedure() -> ProceduralAndLegitimacy {
    ProceduralAndLegitimacy {
        followed_approved_procedure: true,
        stakeholders_consulted: true,
        decision_explainable_to_public: true,
        contestation_available: true,
    }
}

/// Neutral facts record: mid-range consequences, clean rights, no optional
/// dimension assessed.
pub(super) fn baseline_facts(id: &str) -> EthicalFacts {
    EthicalFacts {
        option_id: OptionId::new(id),
        consequences: Consequences {
            expected_benefit: 0.5,
            expected_harm: 0.5,
            urgency: 0.5,
            affected_count: 1,
        },
        rights_and_duties: clean_rights(),
        justice_and_fairness: fair_justice(false),
        autonomy_and_agency: Assessment::NotAssessed,
        procedural_and_legitimacy: Assessment::NotAssessed,
        epistemic_status: Assessment::NotAssessed,
        privacy_and_data: Assessment::NotAssessed,
        societal_and_environmental: Assessment::NotAssessed,
        virtue_and_care: Assessment::NotAssessed,
        tags: Vec::new(),
    }
}

/// High benefit, high urgency, respects rights, prioritizes the most
/// disadvantaged.
pub(super) fn option_a() -> EthicalFacts {
    EthicalFacts {
        option_id: OptionId::new("allocate_to_patient_a"),
        consequences: Consequences {
            expected_benefit: 0.9,
            expected_harm: 0.2,
            urgency: 0.9,
            affected_count: 1,
        },
        rights_and_duties: clean_rights(),
        justice_and_fairness: fair_justice(true),
        autonomy_and_agency: Assessment::Present(full_autonomy()),
        procedural_and_legitimacy: Assessment::Present(full_procedure()),
        epistemic_status: Assessment::Present(EpistemicStatus {
            uncertainty_level: 0.3,
            evidence_quality: EvidenceQuality::High,
            novel_situation_flag: false,
        }),
        privacy_and_data: Assessment::NotAssessed,
        societal_and_environmental: Assessment::NotAssessed,
        virtue_and_care: Assessment::NotAssessed,
        tags: vec!["triage".to_string(), "patient_a".to_string()],
    }
}

/// Moderate benefit, lower urgency, otherwise similar to option A.
pub(super) fn option_b() -> EthicalFacts {
    EthicalFacts {
        option_id: OptionId::new("allocate_to_patient_b"),
        consequences: Consequences {
            expected_benefit: 0.7,
            expected_harm: 0.2,
            urgency: 0.5,
            affected_count: 1,
        },
        rights_and_duties: clean_rights(),
        justice_and_fairness: fair_justice(true),
        autonomy_and_agency: Assessment::Present(full_autonomy()),
        procedural_and_legitimacy: Assessment::Present(ProceduralAndLegitimacy {
            followed_approved_procedure: true,
            stakeholders_consulted: false,
            decision_explainable_to_public: true,
            contestation_available: true,
        }),
        epistemic_status: Assessment::Present(EpistemicStatus {
            uncertainty_level: 0.2,
            evidence_quality: EvidenceQuality::Medium,
            novel_situation_flag: false,
        }),
        privacy_and_data: Assessment::NotAssessed,
        societal_and_environmental: Assessment::NotAssessed,
        virtue_and_care: Assessment::NotAssessed,
        tags: vec!["triage".to_string(), "patient_b".to_string()],
    }
}

/// Strong raw benefit and urgency, but violates an explicit rule.
pub(super) fn option_c() -> EthicalFacts {
    EthicalFacts {
        option_id: OptionId::new("allocate_to_patient_c"),
        consequences: Consequences {
            expected_benefit: 0.85,
            expected_harm: 0.25,
            urgency: 0.8,
            affected_count: 1,
        },
        rights_and_duties: RightsAndDuties {
            violates_rights: false,
            has_valid_consent: false,
            violates_explicit_rule: true,
            role_duty_conflict: true,
        },
        justice_and_fairness: JusticeAndFairness {
            discriminates_on_protected_attr: false,
            prioritizes_most_disadvantaged: false,
            distributive_pattern: DistributivePattern::Utilitarian,
            exploits_vulnerable_population: false,
            exacerbates_power_imbalance: false,
        },
        autonomy_and_agency: Assessment::Present(AutonomyAndAgency {
            has_meaningful_choice: false,
            coercion_or_undue_influence: true,
            can_withdraw_without_penalty: false,
            manipulative_design_present: true,
        }),
        procedural_and_legitimacy: Assessment::Present(ProceduralAndLegitimacy {
            followed_approved_procedure: false,
            stakeholders_consulted: false,
            decision_explainable_to_public: false,
            contestation_available: false,
        }),
        epistemic_status: Assessment::Present(EpistemicStatus {
            uncertainty_level: 0.6,
            evidence_quality: EvidenceQuality::Low,
            novel_situation_flag: true,
        }),
        privacy_and_data: Assessment::NotAssessed,
        societal_and_environmental: Assessment::NotAssessed,
        virtue_and_care: Assessment::NotAssessed,
        tags: vec!["triage".to_string(), "patient_c".to_string()],
    }
}

pub(super) fn triage() -> TriageEvaluator {
    TriageEvaluator::default()
}

/// Rights-first module carries more weight and a veto.
pub(super) fn governance_config() -> GovernanceConfig {
    let mut config = GovernanceConfig::default();
    config
        .evaluator_weights
        .insert("rights_first_compliance".to_string(), 1.5);
    config
        .evaluator_weights
        .insert("clinical_triage".to_string(), 1.0);
    config
        .veto_evaluators
        .insert("rights_first_compliance".to_string());
    config
}

pub(super) fn decision_service() -> DecisionService {
    DecisionService::new(governance_config())
        .expect("valid governance config")
        .with_evaluator(Box::new(triage()))
        .with_evaluator(Box::new(RightsFirstEvaluator))
}

pub(super) fn judgement(
    evaluator: &str,
    stakeholder: &str,
    verdict: Verdict,
    score: f64,
) -> EthicalJudgement {
    EthicalJudgement {
        evaluator_name: evaluator.to_string(),
        stakeholder: stakeholder.to_string(),
        verdict,
        normative_score: score,
        reasons: vec![format!("{evaluator} summary")],
        metadata: BTreeMap::new(),
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
