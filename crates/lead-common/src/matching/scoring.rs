use serde::Serialize;

use super::{exact::exact_matches, keyword::keyword_matches};
use crate::{
    criteria::{CriterionKind, ScoringCriteria},
    CompanyRecord,
};

/// Per-dimension outcome: match flag plus the weight awarded for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingSummary {
    pub keyword: bool,
    pub keyword_score: f64,
    pub industrial: bool,
    pub industrial_score: f64,
    pub province: bool,
    pub province_score: f64,
    pub company_size: bool,
    pub company_size_score: f64,
    pub contact_status: bool,
    pub contact_status_score: f64,
}

impl MatchingSummary {
    pub fn get(&self, kind: CriterionKind) -> (bool, f64) {
        match kind {
            CriterionKind::Keyword => (self.keyword, self.keyword_score),
            CriterionKind::Industrial => (self.industrial, self.industrial_score),
            CriterionKind::Province => (self.province, self.province_score),
            CriterionKind::CompanySize => (self.company_size, self.company_size_score),
            CriterionKind::ContactStatus => (self.contact_status, self.contact_status_score),
        }
    }

    fn set(&mut self, kind: CriterionKind, matched: bool, awarded: f64) {
        let (flag, score) = match kind {
            CriterionKind::Keyword => (&mut self.keyword, &mut self.keyword_score),
            CriterionKind::Industrial => (&mut self.industrial, &mut self.industrial_score),
            CriterionKind::Province => (&mut self.province, &mut self.province_score),
            CriterionKind::CompanySize => (&mut self.company_size, &mut self.company_size_score),
            CriterionKind::ContactStatus => {
                (&mut self.contact_status, &mut self.contact_status_score)
            }
        };
        *flag = matched;
        *score = awarded;
    }

    /// Dimensions that matched, in evaluation order.
    pub fn matched_kinds(&self) -> Vec<CriterionKind> {
        use strum::IntoEnumIterator;

        CriterionKind::iter().filter(|kind| self.get(*kind).0).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedLeadScore {
    pub company_id: String,
    /// Sum of weights of matched dimensions.
    pub score: f64,
    /// Sum of weights of every active dimension, matched or not.
    pub max_possible_score: f64,
    /// `round(score / max_possible_score * 100)`, or 0 when nothing is active.
    pub normalized_score: u8,
    pub matching_summary: MatchingSummary,
}

/// Scores one record against the active criteria.
///
/// Total over its input: missing record fields are non-matches and an empty
/// criteria set yields all zeros.
pub fn score_one(record: &CompanyRecord, criteria: &ScoringCriteria) -> WeightedLeadScore {
    let mut total_score = 0.0;
    let mut max_possible_score = 0.0;
    let mut summary = MatchingSummary::default();

    for (kind, criterion) in criteria.active() {
        let weight = criterion.weight();
        max_possible_score += weight;

        let matched = match kind {
            CriterionKind::Keyword => keyword_matches(record, criterion.value()),
            _ => exact_matches(record, kind, criterion.value()),
        };

        if matched {
            total_score += weight;
            summary.set(kind, true, weight);
        } else {
            summary.set(kind, false, 0.0);
        }
    }

    let normalized_score = normalize_score(total_score, max_possible_score);

    tracing::trace!(
        company_id = %record.id,
        score = total_score,
        max_possible_score,
        normalized_score,
        matched = ?summary.matched_kinds(),
        "scored company"
    );

    WeightedLeadScore {
        company_id: record.id.clone(),
        score: total_score,
        max_possible_score,
        normalized_score,
        matching_summary: summary,
    }
}

fn normalize_score(score: f64, max_possible_score: f64) -> u8 {
    if max_possible_score <= 0.0 {
        return 0;
    }

    // f64::round is half-away-from-zero, i.e. half-up for non-negative ratios.
    (score / max_possible_score * 100.0).round().clamp(0.0, 100.0) as u8
}
