use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidate options.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionId(pub String);

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Clamp a proxy score into the unit interval.
///
/// Float fields on a facts record are read as [0, 1] proxies but are never
/// assumed pre-clamped; every consumer clamps at the point of use.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Presence marker for ethical dimensions an upstream pipeline may not have
/// assessed. `NotAssessed` routes each consumer to its documented neutral
/// interpretation instead of implicit null handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assessment<T> {
    Present(T),
    NotAssessed,
}

impl<T> Assessment<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Assessment::Present(value) => Some(value),
            Assessment::NotAssessed => None,
        }
    }

    pub fn is_assessed(&self) -> bool {
        matches!(self, Assessment::Present(_))
    }
}

impl<T> Default for Assessment<T> {
    fn default() -> Self {
        Assessment::NotAssessed
    }
}

/// Expected outcomes of enacting the option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Consequences {
    pub expected_benefit: f64,
    pub expected_harm: f64,
    pub urgency: f64,
    pub affected_count: u32,
}

/// Deontic facts: rights, consent, rules, and role duties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightsAndDuties {
    pub violates_rights: bool,
    pub has_valid_consent: bool,
    pub violates_explicit_rule: bool,
    pub role_duty_conflict: bool,
}

/// Distributive pattern the option follows, as labelled upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistributivePattern {
    Utilitarian,
    Maximin,
    Egalitarian,
    Prioritarian,
    #[default]
    Unspecified,
}

impl DistributivePattern {
    pub const fn label(self) -> &'static str {
        match self {
            DistributivePattern::Utilitarian => "utilitarian",
            DistributivePattern::Maximin => "maximin",
            DistributivePattern::Egalitarian => "egalitarian",
            DistributivePattern::Prioritarian => "prioritarian",
            DistributivePattern::Unspecified => "unspecified",
        }
    }
}

/// Fairness facts feeding both the disadvantage priority score and the
/// fairness penalty flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JusticeAndFairness {
    pub discriminates_on_protected_attr: bool,
    pub prioritizes_most_disadvantaged: bool,
    pub distributive_pattern: DistributivePattern,
    pub exploits_vulnerable_population: bool,
    pub exacerbates_power_imbalance: bool,
}

/// Agency of the affected parties under the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutonomyAndAgency {
    pub has_meaningful_choice: bool,
    pub coercion_or_undue_influence: bool,
    pub can_withdraw_without_penalty: bool,
    pub manipulative_design_present: bool,
}

/// Legitimacy of the process that produced the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProceduralAndLegitimacy {
    pub followed_approved_procedure: bool,
    pub stakeholders_consulted: bool,
    pub decision_explainable_to_public: bool,
    pub contestation_available: bool,
}

/// Quality grade attached to the evidence behind the facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceQuality {
    High,
    Medium,
    Low,
}

impl EvidenceQuality {
    pub const fn label(self) -> &'static str {
        match self {
            EvidenceQuality::High => "high",
            EvidenceQuality::Medium => "medium",
            EvidenceQuality::Low => "low",
        }
    }
}

/// How confident upstream is in the factual inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpistemicStatus {
    pub uncertainty_level: f64,
    pub evidence_quality: EvidenceQuality,
    pub novel_situation_flag: bool,
}

/// Data-protection facts; present in the schema for specialized evaluators,
/// not consumed by the reference triage module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyAndDataRights {
    pub processes_sensitive_data: bool,
    pub data_minimization_respected: bool,
    pub secondary_use_consented: bool,
}

/// Broader societal facts; schema-present, unused by the reference module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocietalAndEnvironmental {
    pub significant_environmental_impact: bool,
    pub affects_future_generations: bool,
    pub sets_societal_precedent: bool,
}

/// Virtue and care-ethics facts; schema-present, unused by the reference
/// module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtueAndCare {
    pub reflects_care_for_dependents: bool,
    pub compatible_with_professional_virtue: bool,
    pub erodes_trust_relationships: bool,
}

/// Immutable, ethics-only description of one candidate option.
///
/// All clinical, legal, and statistical complexity lives upstream in the
/// pipeline that constructs these records; evaluators read them and never
/// touch raw domain artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EthicalFacts {
    pub option_id: OptionId,
    pub consequences: Consequences,
    pub rights_and_duties: RightsAndDuties,
    pub justice_and_fairness: JusticeAndFairness,
    pub autonomy_and_agency: Assessment<AutonomyAndAgency>,
    pub procedural_and_legitimacy: Assessment<ProceduralAndLegitimacy>,
    pub epistemic_status: Assessment<EpistemicStatus>,
    pub privacy_and_data: Assessment<PrivacyAndDataRights>,
    pub societal_and_environmental: Assessment<SocietalAndEnvironmental>,
    pub virtue_and_care: Assessment<VirtueAndCare>,
    pub tags: Vec<String>,
}

impl EthicalFacts {
    /// Check every float proxy field before scoring so evaluators never see
    /// NaN or infinite inputs.
    pub fn validate(&self) -> Result<(), FactsError> {
        self.check_finite(
            "consequences.expected_benefit",
            self.consequences.expected_benefit,
        )?;
        self.check_finite("consequences.expected_harm", self.consequences.expected_harm)?;
        self.check_finite("consequences.urgency", self.consequences.urgency)?;

        if let Assessment::Present(epistemic) = &self.epistemic_status {
            self.check_finite(
                "epistemic_status.uncertainty_level",
                epistemic.uncertainty_level,
            )?;
        }

        Ok(())
    }

    fn check_finite(&self, field: &'static str, value: f64) -> Result<(), FactsError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(FactsError::NonFiniteField {
                option: self.option_id.clone(),
                field,
            })
        }
    }
}

/// Validation errors raised against a facts record.
#[derive(Debug, thiserror::Error)]
pub enum FactsError {
    #[error("option {option:?}: field `{field}` must be a finite number")]
    NonFiniteField { option: OptionId, field: &'static str },
}
