pub mod api;
pub mod criteria;
pub mod error;
pub mod export;
pub mod logging;
pub mod matching;
pub mod normalize;

use serde::{Deserialize, Serialize};

pub use criteria::{CriterionKind, RawScoringCriteria, ScoringCriteria, WeightedCriterion};
pub use matching::ranking::{score_and_rank, RankedCompany, Ranker, RankerConfig};
pub use matching::scoring::{score_one, MatchingSummary, WeightedLeadScore};

/// Company record as handed over by the search/list collaborator.
///
/// Built once at the ingestion boundary (see [`normalize`]); the scorer only
/// ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: String,
    #[serde(default)]
    pub company_name_en: String,
    #[serde(default, alias = "registrationId")]
    pub registered_no: Option<String>,
    #[serde(default)]
    pub industrial_name: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub verification_status: String,
    #[serde(default)]
    pub data_completeness: u8,
}
