use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{error::CriteriaError, normalize::normalize_label};

/// Filter dimensions, declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum CriterionKind {
    Keyword,
    Industrial,
    Province,
    CompanySize,
    ContactStatus,
}

/// An active filter dimension: non-empty value plus a positive, finite weight.
///
/// Only [`WeightedCriterion::activate`] builds one, so holding a value of this
/// type already proves the dimension counts toward `maxPossibleScore`. The
/// value goes through the same [`normalize_label`] folding as ingested record
/// labels, so both sides of a comparison share one canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCriterion {
    value: String,
    weight: f64,
}

impl WeightedCriterion {
    /// Returns `Ok(None)` for a sparse/inactive pair (missing or blank value,
    /// missing or zero weight). A weight is validated even when the value is
    /// absent.
    pub fn activate(
        kind: CriterionKind,
        value: Option<&str>,
        weight: Option<f64>,
    ) -> Result<Option<Self>, CriteriaError> {
        let Some(weight) = weight else {
            return Ok(None);
        };

        if !weight.is_finite() {
            return Err(CriteriaError::NonFiniteWeight { criterion: kind });
        }
        if weight < 0.0 {
            return Err(CriteriaError::NegativeWeight {
                criterion: kind,
                weight,
            });
        }

        if weight == 0.0 {
            return Ok(None);
        }

        Ok(value
            .map(normalize_label)
            .filter(|value| !value.is_empty())
            .map(|value| Self { value, weight }))
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Validated scoring criteria.
///
/// Each dimension is `Some` only when active. Deserializes from the flat
/// [`RawScoringCriteria`] shape and rejects negative weights on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoringCriteria", into = "RawScoringCriteria")]
pub struct ScoringCriteria {
    keyword: Option<WeightedCriterion>,
    industrial: Option<WeightedCriterion>,
    province: Option<WeightedCriterion>,
    company_size: Option<WeightedCriterion>,
    contact_status: Option<WeightedCriterion>,
    minimum_score: f64,
}

impl ScoringCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter. An inactive pair clears the dimension.
    pub fn with(
        mut self,
        kind: CriterionKind,
        value: impl AsRef<str>,
        weight: f64,
    ) -> Result<Self, CriteriaError> {
        *self.slot_mut(kind) =
            WeightedCriterion::activate(kind, Some(value.as_ref()), Some(weight))?;
        self.checked_total()
    }

    pub fn with_minimum_score(mut self, minimum_score: f64) -> Result<Self, CriteriaError> {
        self.minimum_score = validate_minimum_score(minimum_score)?;
        Ok(self)
    }

    pub fn get(&self, kind: CriterionKind) -> Option<&WeightedCriterion> {
        match kind {
            CriterionKind::Keyword => self.keyword.as_ref(),
            CriterionKind::Industrial => self.industrial.as_ref(),
            CriterionKind::Province => self.province.as_ref(),
            CriterionKind::CompanySize => self.company_size.as_ref(),
            CriterionKind::ContactStatus => self.contact_status.as_ref(),
        }
    }

    /// Active dimensions in evaluation order.
    pub fn active(&self) -> impl Iterator<Item = (CriterionKind, &WeightedCriterion)> + '_ {
        CriterionKind::iter().filter_map(move |kind| self.get(kind).map(|c| (kind, c)))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Post-filter threshold on the normalized score (0..=100).
    pub fn minimum_score(&self) -> f64 {
        self.minimum_score
    }

    /// Individually finite weights can still overflow once summed into
    /// `maxPossibleScore`.
    fn checked_total(self) -> Result<Self, CriteriaError> {
        let total: f64 = self.active().map(|(_, c)| c.weight).sum();
        if total.is_finite() {
            Ok(self)
        } else {
            Err(CriteriaError::WeightTotalOverflow)
        }
    }

    fn slot_mut(&mut self, kind: CriterionKind) -> &mut Option<WeightedCriterion> {
        match kind {
            CriterionKind::Keyword => &mut self.keyword,
            CriterionKind::Industrial => &mut self.industrial,
            CriterionKind::Province => &mut self.province,
            CriterionKind::CompanySize => &mut self.company_size,
            CriterionKind::ContactStatus => &mut self.contact_status,
        }
    }
}

fn validate_minimum_score(value: f64) -> Result<f64, CriteriaError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(CriteriaError::MinimumScoreOutOfRange(value))
    }
}

/// Filter input as the filtering UI sends it: five loose value/weight pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScoringCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industrial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industrial_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_status_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_score: Option<f64>,
}

impl TryFrom<RawScoringCriteria> for ScoringCriteria {
    type Error = CriteriaError;

    fn try_from(raw: RawScoringCriteria) -> Result<Self, Self::Error> {
        Self {
            keyword: WeightedCriterion::activate(
                CriterionKind::Keyword,
                raw.keyword.as_deref(),
                raw.keyword_weight,
            )?,
            industrial: WeightedCriterion::activate(
                CriterionKind::Industrial,
                raw.industrial.as_deref(),
                raw.industrial_weight,
            )?,
            province: WeightedCriterion::activate(
                CriterionKind::Province,
                raw.province.as_deref(),
                raw.province_weight,
            )?,
            company_size: WeightedCriterion::activate(
                CriterionKind::CompanySize,
                raw.company_size.as_deref(),
                raw.company_size_weight,
            )?,
            contact_status: WeightedCriterion::activate(
                CriterionKind::ContactStatus,
                raw.contact_status.as_deref(),
                raw.contact_status_weight,
            )?,
            minimum_score: validate_minimum_score(raw.minimum_score.unwrap_or(0.0))?,
        }
        .checked_total()
    }
}

impl From<ScoringCriteria> for RawScoringCriteria {
    fn from(criteria: ScoringCriteria) -> Self {
        let split = |c: Option<WeightedCriterion>| match c {
            Some(c) => (Some(c.value), Some(c.weight)),
            None => (None, None),
        };

        let (keyword, keyword_weight) = split(criteria.keyword);
        let (industrial, industrial_weight) = split(criteria.industrial);
        let (province, province_weight) = split(criteria.province);
        let (company_size, company_size_weight) = split(criteria.company_size);
        let (contact_status, contact_status_weight) = split(criteria.contact_status);

        Self {
            keyword,
            keyword_weight,
            industrial,
            industrial_weight,
            province,
            province_weight,
            company_size,
            company_size_weight,
            contact_status,
            contact_status_weight,
            minimum_score: Some(criteria.minimum_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_active_only_with_value_and_weight() {
        let kind = CriterionKind::Province;
        assert!(WeightedCriterion::activate(kind, Some("Bangkok"), Some(15.0))
            .unwrap()
            .is_some());
        assert_eq!(WeightedCriterion::activate(kind, Some("Bangkok"), None), Ok(None));
        assert_eq!(WeightedCriterion::activate(kind, None, Some(15.0)), Ok(None));
        assert_eq!(WeightedCriterion::activate(kind, Some(""), Some(15.0)), Ok(None));
        assert_eq!(WeightedCriterion::activate(kind, Some("  "), Some(15.0)), Ok(None));
        assert_eq!(WeightedCriterion::activate(kind, Some("Bangkok"), Some(0.0)), Ok(None));
    }

    #[test]
    fn rejects_negative_and_non_finite_weights() {
        assert_eq!(
            WeightedCriterion::activate(CriterionKind::Keyword, Some("abc"), Some(-1.0)),
            Err(CriteriaError::NegativeWeight {
                criterion: CriterionKind::Keyword,
                weight: -1.0
            })
        );
        assert_eq!(
            WeightedCriterion::activate(CriterionKind::Keyword, None, Some(f64::NAN)),
            Err(CriteriaError::NonFiniteWeight {
                criterion: CriterionKind::Keyword
            })
        );
    }

    #[test]
    fn parses_flat_ui_payload() {
        let criteria: ScoringCriteria = serde_json::from_str(
            r#"{
                "industrial": "Manufacturing",
                "industrialWeight": 20,
                "province": "Bangkok",
                "provinceWeight": 15,
                "companySizeWeight": 5,
                "minimumScore": 40
            }"#,
        )
        .unwrap();

        let active: Vec<_> = criteria.active().map(|(kind, _)| kind).collect();
        assert_eq!(active, vec![CriterionKind::Industrial, CriterionKind::Province]);
        assert_eq!(criteria.minimum_score(), 40.0);
        assert_eq!(criteria.get(CriterionKind::Industrial).unwrap().weight(), 20.0);
    }

    #[test]
    fn deserializing_negative_weight_fails() {
        let result: Result<ScoringCriteria, _> =
            serde_json::from_str(r#"{"keyword": "steel", "keywordWeight": -4}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn minimum_score_must_be_a_percentage() {
        assert_eq!(
            ScoringCriteria::new().with_minimum_score(101.0),
            Err(CriteriaError::MinimumScoreOutOfRange(101.0))
        );
        assert_eq!(
            ScoringCriteria::new().with_minimum_score(-5.0),
            Err(CriteriaError::MinimumScoreOutOfRange(-5.0))
        );
        assert_eq!(ScoringCriteria::new().minimum_score(), 0.0);
    }

    #[test]
    fn builder_with_zero_weight_clears_dimension() {
        let criteria = ScoringCriteria::new()
            .with(CriterionKind::CompanySize, "L", 10.0)
            .unwrap()
            .with(CriterionKind::CompanySize, "L", 0.0)
            .unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn serializes_back_to_flat_shape() {
        let criteria = ScoringCriteria::new()
            .with(CriterionKind::Keyword, "steel", 10.0)
            .unwrap();
        let value = serde_json::to_value(&criteria).unwrap();
        assert_eq!(value["keyword"], "steel");
        assert_eq!(value["keywordWeight"], 10.0);
        assert_eq!(value["minimumScore"], 0.0);
        assert!(value.get("province").is_none());
    }

    #[test]
    fn values_are_folded_like_record_labels() {
        let criteria = ScoringCriteria::new()
            .with(CriterionKind::CompanySize, "Ｌ", 5.0)
            .unwrap()
            .with(CriterionKind::Province, " Chiang  Mai ", 5.0)
            .unwrap();

        assert_eq!(criteria.get(CriterionKind::CompanySize).unwrap().value(), "L");
        assert_eq!(criteria.get(CriterionKind::Province).unwrap().value(), "Chiang Mai");
    }

    #[test]
    fn rejects_weights_whose_total_overflows() {
        let result = ScoringCriteria::new()
            .with(CriterionKind::Province, "Bangkok", 1e308)
            .unwrap()
            .with(CriterionKind::CompanySize, "L", 1e308);
        assert_eq!(result, Err(CriteriaError::WeightTotalOverflow));

        let raw = RawScoringCriteria {
            keyword: Some("steel".into()),
            keyword_weight: Some(f64::MAX),
            industrial: Some("Manufacturing".into()),
            industrial_weight: Some(f64::MAX),
            ..RawScoringCriteria::default()
        };
        assert_eq!(
            ScoringCriteria::try_from(raw),
            Err(CriteriaError::WeightTotalOverflow)
        );
    }

    #[test]
    fn large_weights_with_finite_total_are_accepted() {
        let criteria = ScoringCriteria::new()
            .with(CriterionKind::Province, "Bangkok", 1e307)
            .unwrap()
            .with(CriterionKind::CompanySize, "L", 1e307)
            .unwrap();
        assert_eq!(criteria.active().count(), 2);
    }
}
