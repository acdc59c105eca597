//! Ethical decision evaluation and governance.
//!
//! `domain` holds the immutable facts model, `evaluation` the evaluator
//! contract and the reference triage module, `governance` the aggregation
//! and selection engine, and `service` the facade gluing them together for
//! one-call decisions.

pub mod domain;
pub mod evaluation;
pub mod governance;
pub mod judgement;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    clamp_unit, Assessment, AutonomyAndAgency, Consequences, DistributivePattern, EpistemicStatus,
    EthicalFacts, EvidenceQuality, FactsError, JusticeAndFairness, OptionId, PrivacyAndDataRights,
    ProceduralAndLegitimacy, RightsAndDuties, SocietalAndEnvironmental, VirtueAndCare,
};
pub use evaluation::{
    EthicsEvaluator, Evaluation, EvaluationError, RightsFirstEvaluator, TriageConfig,
    TriageConfigError, TriageEvaluator,
};
pub use governance::{
    select_option, DecisionOutcome, GovernanceConfig, GovernanceConfigError, GovernanceEngine,
    TieBreaker,
};
pub use judgement::{EthicalJudgement, MetadataValue, Verdict};
pub use service::{DecisionError, DecisionReport, DecisionService, EvaluationFailure};
