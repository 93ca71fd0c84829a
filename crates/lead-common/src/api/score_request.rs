use serde::Deserialize;
use serde_json::Value;

use super::score_report::ScoreReport;
use crate::{
    criteria::{RawScoringCriteria, ScoringCriteria},
    error::CriteriaError,
    matching::ranking::{Ranker, RankerConfig},
    normalize::records_from_value,
};

/// In-process request shape used by the search/list and filtering collaborators.
///
/// `records` stays untyped until [`ScoreRequest::evaluate`] so a
/// non-array placeholder degrades to an empty ranking instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub records: Value,
    #[serde(default)]
    pub criteria: RawScoringCriteria,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ScoreRequest {
    pub fn evaluate(self) -> Result<ScoreReport, CriteriaError> {
        let criteria = ScoringCriteria::try_from(self.criteria)?;
        let records = records_from_value(&self.records);

        let ranker = Ranker::new(RankerConfig {
            max_results: self.limit,
        });
        let results = ranker.rank(&records, &criteria);

        Ok(ScoreReport::new(results, records.len(), criteria.minimum_score()))
    }
}
