//! Ingestion boundary for company records.
//!
//! The search/list collaborator hands over loosely typed rows (JSON exports,
//! CSV imports). Everything is turned into [`CompanyRecord`] here so the
//! scorer never sees optional or mistyped fields.

use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::{error::IngestError, CompanyRecord};

/// One record before normalization. All fields are optional text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompanyRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub company_name_en: Option<String>,
    #[serde(default, alias = "registrationId")]
    pub registered_no: Option<String>,
    #[serde(default)]
    pub industrial_name: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
    #[serde(default)]
    pub data_completeness: Option<String>,
}

impl RawCompanyRecord {
    fn from_json_object(object: &Map<String, Value>) -> Self {
        Self {
            id: scalar_text(object, &["id"]),
            company_name_en: scalar_text(object, &["companyNameEn"]),
            registered_no: scalar_text(object, &["registeredNo", "registrationId"]),
            industrial_name: scalar_text(object, &["industrialName"]),
            province: scalar_text(object, &["province"]),
            company_size: scalar_text(object, &["companySize"]),
            verification_status: scalar_text(object, &["verificationStatus"]),
            data_completeness: scalar_text(object, &["dataCompleteness"]),
        }
    }

    /// Returns `None` when the record has no usable id.
    pub fn normalize(self) -> Option<CompanyRecord> {
        let id = self.id.as_deref().map(normalize_label).filter(|id| !id.is_empty())?;

        Some(CompanyRecord {
            id,
            company_name_en: label_or_empty(self.company_name_en),
            registered_no: self
                .registered_no
                .as_deref()
                .map(normalize_label)
                .filter(|value| !value.is_empty()),
            industrial_name: label_or_empty(self.industrial_name),
            province: label_or_empty(self.province),
            company_size: label_or_empty(self.company_size),
            verification_status: label_or_empty(self.verification_status),
            data_completeness: parse_completeness(self.data_completeness.as_deref()),
        })
    }
}

/// NFKC-folds (full-width digits and Latin letters become ASCII), trims, and
/// collapses inner whitespace. Case is preserved.
pub fn normalize_label(raw: &str) -> String {
    let folded: String = raw.nfkc().collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn label_or_empty(raw: Option<String>) -> String {
    raw.as_deref().map(normalize_label).unwrap_or_default()
}

fn parse_completeness(raw: Option<&str>) -> u8 {
    raw.map(normalize_label)
        .and_then(|value| value.trim_end_matches('%').trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| value.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

fn scalar_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
}

/// Normalizes an already-parsed JSON payload.
///
/// A non-array payload is treated as an empty collection; callers may hand
/// over transient placeholder state (null, `{}`) while a page is loading.
pub fn records_from_value(value: &Value) -> Vec<CompanyRecord> {
    let Some(items) = value.as_array() else {
        warn!(
            payload_kind = json_kind(value),
            "records payload is not an array; treating as empty"
        );
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let Some(object) = item.as_object() else {
                warn!(index, payload_kind = json_kind(item), "skipping non-object record");
                return None;
            };
            let record = RawCompanyRecord::from_json_object(object).normalize();
            if record.is_none() {
                warn!(index, "skipping record without id");
            }
            record
        })
        .collect()
}

pub fn records_from_json(input: &str) -> Result<Vec<CompanyRecord>, IngestError> {
    let value: Value = serde_json::from_str(input)?;
    Ok(records_from_value(&value))
}

/// Reads a CSV export with a header row using the camelCase column names.
pub fn records_from_csv<R: Read>(reader: R) -> Result<Vec<CompanyRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<RawCompanyRecord>().enumerate() {
        match row?.normalize() {
            Some(record) => records.push(record),
            None => warn!(row = index + 1, "skipping csv row without id"),
        }
    }

    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
