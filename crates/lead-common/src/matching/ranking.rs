use std::cmp::Reverse;

use serde::Serialize;

use super::scoring::{score_one, WeightedLeadScore};
use crate::{criteria::ScoringCriteria, CompanyRecord};

#[derive(Debug, Clone, Default)]
pub struct RankerConfig {
    /// Maximum number of results returned after sorting. `None` keeps all.
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCompany {
    pub record: CompanyRecord,
    pub score: WeightedLeadScore,
}

pub struct Ranker {
    config: RankerConfig,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(RankerConfig::default())
    }
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Scores every record, drops those under `minimum_score`, then sorts by
    /// normalized score descending. Ties keep input order.
    pub fn rank(&self, records: &[CompanyRecord], criteria: &ScoringCriteria) -> Vec<RankedCompany> {
        let minimum_score = criteria.minimum_score();

        let scored: Vec<_> = records
            .iter()
            .map(|record| RankedCompany {
                record: record.clone(),
                score: score_one(record, criteria),
            })
            .collect();
        let total = scored.len();

        let mut ranked: Vec<_> = scored
            .into_iter()
            .filter(|candidate| f64::from(candidate.score.normalized_score) >= minimum_score)
            .collect();
        let retained = ranked.len();

        ranked.sort_by_key(|candidate| Reverse(candidate.score.normalized_score));
        if let Some(max_results) = self.config.max_results {
            ranked.truncate(max_results);
        }

        tracing::debug!(
            total,
            retained,
            filtered_out = total - retained,
            returned = ranked.len(),
            minimum_score,
            "ranked companies"
        );

        ranked
    }
}

/// Batch entry point with the default (uncapped) ranker.
pub fn score_and_rank(records: &[CompanyRecord], criteria: &ScoringCriteria) -> Vec<RankedCompany> {
    Ranker::default().rank(records, criteria)
}
