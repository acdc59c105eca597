use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordinal verdict scale shared by module-level and aggregated judgements.
///
/// Variants are declared worst-first so the derived ordering matches the
/// normative ordering: `Forbid < Avoid < Neutral < Prefer < StronglyPrefer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Forbid,
    Avoid,
    Neutral,
    Prefer,
    StronglyPrefer,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Forbid => "forbid",
            Verdict::Avoid => "avoid",
            Verdict::Neutral => "neutral",
            Verdict::Prefer => "prefer",
            Verdict::StronglyPrefer => "strongly_prefer",
        }
    }

    /// Map a score onto the fixed verdict bands.
    ///
    /// Everything below 0.4 collapses into `Avoid`; `Forbid` is never
    /// produced by score mapping, only issued directly by an evaluator hard
    /// constraint or a governance veto.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Verdict::StronglyPrefer
        } else if score >= 0.6 {
            Verdict::Prefer
        } else if score >= 0.4 {
            Verdict::Neutral
        } else {
            Verdict::Avoid
        }
    }
}

/// Typed metadata values so audit trails stay structured end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Decimal(f64),
    Boolean(bool),
    Count(u32),
    Text(String),
}

/// One evaluator's verdict for one candidate option; immutable once
/// produced.
///
/// `reasons` is ordered with the summary first; the aggregation engine
/// preserves the entries verbatim. `metadata` is a diagnostic breakdown
/// opaque to aggregation and carried through for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EthicalJudgement {
    pub evaluator_name: String,
    pub stakeholder: String,
    pub verdict: Verdict,
    pub normative_score: f64,
    pub reasons: Vec<String>,
    pub metadata: BTreeMap<String, MetadataValue>,
}
