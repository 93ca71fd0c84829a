use chrono::{DateTime, Utc};
use serde::Serialize;
use ulid::Ulid;

use crate::matching::ranking::RankedCompany;

/// Ranking result handed back to the caller (UI, CLI, export).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// ULID, sortable by creation time.
    pub run_id: String,
    pub scored_at: DateTime<Utc>,
    /// Records that reached the scorer, before threshold filtering.
    pub total_records: usize,
    pub returned: usize,
    pub minimum_score: f64,
    pub results: Vec<RankedCompany>,
}

impl ScoreReport {
    pub fn new(results: Vec<RankedCompany>, total_records: usize, minimum_score: f64) -> Self {
        Self {
            run_id: Ulid::new().to_string(),
            scored_at: Utc::now(),
            total_records,
            returned: results.len(),
            minimum_score,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_and_run_id() {
        let report = ScoreReport::new(Vec::new(), 7, 25.0);

        assert_eq!(report.run_id.len(), 26);
        assert_eq!(report.total_records, 7);
        assert_eq!(report.returned, 0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalRecords"], 7);
        assert_eq!(json["minimumScore"], 25.0);
        assert!(json["scoredAt"].is_string());
    }

    #[test]
    fn run_ids_are_unique() {
        let a = ScoreReport::new(Vec::new(), 0, 0.0);
        let b = ScoreReport::new(Vec::new(), 0, 0.0);
        assert_ne!(a.run_id, b.run_id);
    }
}
