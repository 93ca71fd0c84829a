use crate::CompanyRecord;

/// Case-insensitive substring match against name, registration number and
/// industry label. Any single field is enough.
pub fn keyword_matches(record: &CompanyRecord, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();

    searchable_fields(record).any(|field| field.to_lowercase().contains(&needle))
}

fn searchable_fields(record: &CompanyRecord) -> impl Iterator<Item = &str> {
    [
        Some(record.company_name_en.as_str()),
        record.registered_no.as_deref(),
        Some(record.industrial_name.as_str()),
    ]
    .into_iter()
    .flatten()
}
