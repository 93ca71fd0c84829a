use std::io::Write;

use serde::Serialize;

use crate::{api::ScoreReport, error::ExportError, matching::ranking::RankedCompany};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankedRow<'a> {
    rank: usize,
    id: &'a str,
    company_name_en: &'a str,
    normalized_score: u8,
    score: f64,
    max_possible_score: f64,
    keyword: bool,
    industrial: bool,
    province: bool,
    company_size: bool,
    contact_status: bool,
}

impl<'a> RankedRow<'a> {
    fn new(rank: usize, ranked: &'a RankedCompany) -> Self {
        let summary = &ranked.score.matching_summary;
        Self {
            rank,
            id: &ranked.record.id,
            company_name_en: &ranked.record.company_name_en,
            normalized_score: ranked.score.normalized_score,
            score: ranked.score.score,
            max_possible_score: ranked.score.max_possible_score,
            keyword: summary.keyword,
            industrial: summary.industrial,
            province: summary.province,
            company_size: summary.company_size,
            contact_status: summary.contact_status,
        }
    }
}

/// One CSV row per ranked company, rank starting at 1.
pub fn write_ranked_csv<W: Write>(ranked: &[RankedCompany], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, company) in ranked.iter().enumerate() {
        csv_writer.serialize(RankedRow::new(index + 1, company))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_report_json<W: Write>(
    report: &ScoreReport,
    mut writer: W,
    pretty: bool,
) -> Result<(), ExportError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{criteria::CriterionKind, score_and_rank, CompanyRecord, ScoringCriteria};

    fn ranked() -> Vec<RankedCompany> {
        let records = vec![
            CompanyRecord {
                id: "p".into(),
                company_name_en: "Phuket Resorts".into(),
                province: "Phuket".into(),
                ..CompanyRecord::default()
            },
            CompanyRecord {
                id: "b".into(),
                company_name_en: "Bangkok Trading, Ltd.".into(),
                province: "Bangkok".into(),
                ..CompanyRecord::default()
            },
        ];
        let criteria = ScoringCriteria::new()
            .with(CriterionKind::Province, "Bangkok", 10.0)
            .unwrap();
        score_and_rank(&records, &criteria)
    }

    #[test]
    fn writes_header_and_ranked_rows() {
        let mut out: Vec<u8> = Vec::new();
        write_ranked_csv(&ranked(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "rank,id,companyNameEn,normalizedScore,score,maxPossibleScore,keyword,industrial,province,companySize,contactStatus"
        );
        assert_eq!(
            lines[1],
            "1,b,\"Bangkok Trading, Ltd.\",100,10.0,10.0,false,false,true,false,false"
        );
        assert_eq!(lines[2], "2,p,Phuket Resorts,0,0.0,10.0,false,false,false,false,false");
    }

    #[test]
    fn empty_ranking_writes_nothing() {
        let mut out: Vec<u8> = Vec::new();
        write_ranked_csv(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn json_report_ends_with_newline() {
        let report = ScoreReport::new(ranked(), 2, 0.0);
        let mut out: Vec<u8> = Vec::new();
        write_report_json(&report, &mut out, false).unwrap();

        assert_eq!(out.last(), Some(&b'\n'));
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["results"][0]["score"]["companyId"], "b");
        assert_eq!(value["results"][0]["record"]["companyNameEn"], "Bangkok Trading, Ltd.");
    }
}
