use thiserror::Error;

use crate::criteria::CriterionKind;

/// Rejections raised while turning raw filter input into [`crate::ScoringCriteria`].
#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    #[error("weight for {criterion} must not be negative (got {weight})")]
    NegativeWeight { criterion: CriterionKind, weight: f64 },
    #[error("weight for {criterion} must be a finite number")]
    NonFiniteWeight { criterion: CriterionKind },
    #[error("sum of active weights must be a finite number")]
    WeightTotalOverflow,
    #[error("minimumScore must be within 0..=100 (got {0})")]
    MinimumScoreOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid records json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid records csv: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush output: {0}")]
    Io(#[from] std::io::Error),
}
