//! Clinical triage walkthrough: three candidate allocations of one scarce
//! resource, two ethics modules, one governed selection.
//!
//! Run with `cargo run --example triage_demo`.

use std::collections::BTreeMap;

use triage_ethics::ethics::{
    select_option, Assessment, AutonomyAndAgency, Consequences, DistributivePattern,
    EpistemicStatus, EthicalFacts, EthicsEvaluator, EvidenceQuality, GovernanceConfig,
    JusticeAndFairness, OptionId, ProceduralAndLegitimacy, RightsAndDuties, RightsFirstEvaluator,
    TriageEvaluator,
};
use triage_ethics::EthicsError;

fn main() -> Result<(), EthicsError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = demo_options();
    let candidate_order: Vec<OptionId> = options
        .iter()
        .map(|facts| facts.option_id.clone())
        .collect();

    let evaluators: Vec<Box<dyn EthicsEvaluator>> = vec![
        Box::new(TriageEvaluator::default()),
        Box::new(RightsFirstEvaluator),
    ];

    let mut judgements_by_option = BTreeMap::new();
    for facts in &options {
        let mut judgements = Vec::with_capacity(evaluators.len());
        for evaluator in &evaluators {
            judgements.push(evaluator.judge(facts)?);
        }
        judgements_by_option.insert(facts.option_id.clone(), judgements);
    }

    println!("=== triage ethics demo ===");
    println!();
    for option_id in &candidate_order {
        println!("--- option: {} ---", option_id.as_str());
        for judgement in &judgements_by_option[option_id] {
            println!(
                "[{:<24}] verdict={:<15} score={:.3}",
                judgement.evaluator_name,
                judgement.verdict.label(),
                judgement.normative_score
            );
            for reason in &judgement.reasons {
                println!("    - {reason}");
            }
        }
        println!();
    }

    let outcome = select_option(
        judgements_by_option,
        governance_config(),
        &candidate_order,
        None,
    )?;

    println!("=== governance outcome ===");
    for option_id in &candidate_order {
        if let Some(aggregate) = outcome.aggregated_judgements.get(option_id) {
            println!(
                "[aggregate] {:<24} verdict={:<15} score={:.3}",
                option_id.as_str(),
                aggregate.verdict.label(),
                aggregate.normative_score
            );
        }
    }
    println!();
    println!(
        "selected:  {}",
        outcome
            .selected_option_id
            .as_ref()
            .map(OptionId::as_str)
            .unwrap_or("<none>")
    );
    println!(
        "ranked:    {:?}",
        outcome
            .ranked_options
            .iter()
            .map(OptionId::as_str)
            .collect::<Vec<_>>()
    );
    println!(
        "forbidden: {:?}",
        outcome
            .forbidden_options
            .iter()
            .map(OptionId::as_str)
            .collect::<Vec<_>>()
    );
    println!("rationale: {}", outcome.rationale);

    Ok(())
}

/// Rights-first module carries extra weight and a veto, mirroring a
/// governance board that treats deontic compliance as non-negotiable.
fn governance_config() -> GovernanceConfig {
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

fn demo_options() -> Vec<EthicalFacts> {
    let clean_rights = RightsAndDuties {
        violates_rights: false,
        has_valid_consent: true,
        violates_explicit_rule: false,
        role_duty_conflict: false,
    };
    let supportive_autonomy = AutonomyAndAgency {
        has_meaningful_choice: true,
        coercion_or_undue_influence: false,
        can_withdraw_without_penalty: true,
        manipulative_design_present: false,
    };
    let full_procedure = ProceduralAndLegitimacy {
        followed_approved_procedure: true,
        stakeholders_consulted: true,
        decision_explainable_to_public: true,
        contestation_available: true,
    };

    vec![
        // High benefit, high urgency, respects rights, prioritizes the
        // most disadvantaged.
        EthicalFacts {
            option_id: OptionId::new("allocate_to_patient_a"),
            consequences: Consequences {
                expected_benefit: 0.9,
                expected_harm: 0.2,
                urgency: 0.9,
                affected_count: 1,
            },
            rights_and_duties: clean_rights,
            justice_and_fairness: JusticeAndFairness {
                discriminates_on_protected_attr: false,
                prioritizes_most_disadvantaged: true,
                distributive_pattern: DistributivePattern::Maximin,
                exploits_vulnerable_population: false,
                exacerbates_power_imbalance: false,
            },
            autonomy_and_agency: Assessment::Present(supportive_autonomy),
            procedural_and_legitimacy: Assessment::Present(full_procedure),
            epistemic_status: Assessment::Present(EpistemicStatus {
                uncertainty_level: 0.3,
                evidence_quality: EvidenceQuality::High,
                novel_situation_flag: false,
            }),
            privacy_and_data: Assessment::NotAssessed,
            societal_and_environmental: Assessment::NotAssessed,
            virtue_and_care: Assessment::NotAssessed,
            tags: vec!["demo".to_string(), "patient_a".to_string()],
        },
        // Moderate benefit, lower urgency, also prioritizes the most
        // disadvantaged.
        EthicalFacts {
            option_id: OptionId::new("allocate_to_patient_b"),
            consequences: Consequences {
                expected_benefit: 0.7,
                expected_harm: 0.2,
                urgency: 0.5,
                affected_count: 1,
            },
            rights_and_duties: clean_rights,
            justice_and_fairness: JusticeAndFairness {
                discriminates_on_protected_attr: false,
                prioritizes_most_disadvantaged: true,
                distributive_pattern: DistributivePattern::Maximin,
                exploits_vulnerable_population: false,
                exacerbates_power_imbalance: false,
            },
            autonomy_and_agency: Assessment::Present(supportive_autonomy),
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
            tags: vec!["demo".to_string(), "patient_b".to_string()],
        },
        // Strong raw numbers, but violates an explicit allocation rule.
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
            tags: vec!["demo".to_string(), "patient_c".to_string()],
        },
    ]
}
