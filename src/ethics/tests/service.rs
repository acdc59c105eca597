use super::common::*;
use crate::ethics::domain::OptionId;
use crate::ethics::judgement::Verdict;
use crate::ethics::service::DecisionError;

#[test]
fn full_scenario_selects_the_strongest_permissible_option() {
    let service = decision_service();

    let report = service
        .decide(&[option_a(), option_b(), option_c()], None)
        .expect("decision runs");

    assert!(report.failures.is_empty());

    let outcome = &report.outcome;
    assert_eq!(
        outcome.selected_option_id,
        Some(OptionId::new("allocate_to_patient_a"))
    );
    assert_eq!(
        outcome.ranked_options,
        vec![
            OptionId::new("allocate_to_patient_a"),
            OptionId::new("allocate_to_patient_b"),
        ]
    );
    assert!(outcome
        .forbidden_options
        .contains(&OptionId::new("allocate_to_patient_c")));
    assert_eq!(outcome.aggregated_judgements.len(), 3);

    // (1.0 * 0.8008 + 1.5 * 0.8) / 2.5
    let winner = &outcome.aggregated_judgements[&OptionId::new("allocate_to_patient_a")];
    assert_close(winner.normative_score, 0.80032);
    assert_eq!(winner.verdict, Verdict::StronglyPrefer);

    let vetoed = &outcome.aggregated_judgements[&OptionId::new("allocate_to_patient_c")];
    assert_eq!(vetoed.verdict, Verdict::Forbid);
    assert_eq!(vetoed.normative_score, 0.0);
}

#[test]
fn evaluator_failures_are_isolated_per_option() {
    let service = decision_service();
    let mut poisoned = option_b();
    poisoned.consequences.expected_benefit = f64::NAN;

    let report = service
        .decide(&[option_a(), poisoned], None)
        .expect("decision still runs");

    // Both registered modules fail validation on the poisoned option.
    assert_eq!(report.failures.len(), 2);
    for failure in &report.failures {
        assert_eq!(failure.option_id, OptionId::new("allocate_to_patient_b"));
        assert!(failure.reason.contains("expected_benefit"));
    }

    let outcome = &report.outcome;
    assert_eq!(
        outcome.selected_option_id,
        Some(OptionId::new("allocate_to_patient_a"))
    );
    assert_eq!(
        outcome.ranked_options,
        vec![OptionId::new("allocate_to_patient_a")]
    );
    // Excluded, not forbidden.
    assert!(outcome.forbidden_options.is_empty());

    let excluded = &outcome.aggregated_judgements[&OptionId::new("allocate_to_patient_b")];
    assert_eq!(excluded.normative_score, 0.0);
    assert!(excluded.reasons[0].contains("No contributing judgements"));
}

#[test]
fn duplicate_option_ids_are_rejected_up_front() {
    let service = decision_service();

    match service.decide(&[option_a(), option_a()], None) {
        Err(DecisionError::DuplicateOption(id)) => {
            assert_eq!(id, OptionId::new("allocate_to_patient_a"));
        }
        other => panic!("expected duplicate option error, got {other:?}"),
    }
}

#[test]
fn no_permissible_option_reports_the_baseline() {
    let service = decision_service();
    let baseline = OptionId::new("status_quo");

    let report = service
        .decide(&[option_c()], Some(&baseline))
        .expect("decision runs");

    assert_eq!(report.outcome.selected_option_id, None);
    assert!(report.outcome.rationale.contains("No permissible option"));
    assert!(report.outcome.rationale.contains("status_quo"));
}

#[test]
fn registered_evaluators_are_exposed_in_order() {
    let service = decision_service();
    let names: Vec<&str> = service.evaluators().map(|evaluator| evaluator.name()).collect();
    assert_eq!(names, vec!["clinical_triage", "rights_first_compliance"]);
}

#[test]
fn reruns_produce_identical_reports() {
    let service = decision_service();
    let options = [option_a(), option_b(), option_c()];

    let first = service.decide(&options, None).expect("decision runs");
    let second = service.decide(&options, None).expect("decision runs");

    assert_eq!(first, second);
}
