use crate::{criteria::CriterionKind, CompanyRecord};

/// Record field compared against an exact-match dimension.
///
/// `ContactStatus` reads the record's verification status. `Keyword` has no
/// single backing field and returns `None`.
pub fn record_field(record: &CompanyRecord, kind: CriterionKind) -> Option<&str> {
    match kind {
        CriterionKind::Keyword => None,
        CriterionKind::Industrial => Some(record.industrial_name.as_str()),
        CriterionKind::Province => Some(record.province.as_str()),
        CriterionKind::CompanySize => Some(record.company_size.as_str()),
        CriterionKind::ContactStatus => Some(record.verification_status.as_str()),
    }
}

/// Strict, case-sensitive equality. No trimming, no partial matches.
pub fn exact_matches(record: &CompanyRecord, kind: CriterionKind, value: &str) -> bool {
    record_field(record, kind).is_some_and(|field| field == value)
}
