//! CSV exports of the NAT survey into store records.

use crate::record::{Record, Score};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Respondents,
    Age,
    Sex,
    Ethnic,
    AcademicPerformance,
    AcademicDescription,
    Iq,
    TypeOfSchool,
    SocioEconomicStatus,
    StudyHabit,
    NatResults,
}

fn column_for(header: &str) -> Option<Column> {
    let key = header
        .trim()
        .trim_start_matches('\u{feff}')
        .to_ascii_lowercase()
        .replace([' ', '-'], "_");
    let col = match key.as_str() {
        "respondents" | "respondent" => Column::Respondents,
        "age" => Column::Age,
        "sex" => Column::Sex,
        "ethnic" => Column::Ethnic,
        "academic_performance" => Column::AcademicPerformance,
        "academic_description" => Column::AcademicDescription,
        "iq" => Column::Iq,
        "type_school" | "type_of_school" => Column::TypeOfSchool,
        "socio_economic_status" => Column::SocioEconomicStatus,
        "study_habit" => Column::StudyHabit,
        "nat_results" => Column::NatResults,
        _ => return None,
    };
    Some(col)
}

fn text(raw: &str) -> Option<String> {
    let t = raw.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn assign(record: &mut Record, col: Column, raw: &str) {
    match col {
        Column::Respondents => record.respondents = text(raw),
        Column::Age => record.age = Score::from_text(raw),
        Column::Sex => record.sex = text(raw),
        Column::Ethnic => record.ethnic = text(raw),
        Column::AcademicPerformance => record.academic_performance = Score::from_text(raw),
        Column::AcademicDescription => record.academic_description = text(raw),
        Column::Iq => record.iq = text(raw),
        Column::TypeOfSchool => record.type_of_school = text(raw),
        Column::SocioEconomicStatus => record.socio_economic_status = text(raw),
        Column::StudyHabit => record.study_habit = text(raw),
        Column::NatResults => record.nat_results = Score::from_text(raw),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCsv {
    pub records: Vec<Record>,
    pub ignored_columns: Vec<String>,
}

pub fn read_csv_file(path: &Path) -> Result<ParsedCsv> {
    let file = std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_csv(file).with_context(|| format!("read {}", path.display()))
}

pub fn parse_csv<R: Read>(input: R) -> Result<ParsedCsv> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(input);

    let headers = reader.headers().context("missing header row")?.clone();
    let mut mapping: Vec<Option<Column>> = Vec::with_capacity(headers.len());
    let mut ignored_columns = Vec::new();
    for h in headers.iter() {
        let col = column_for(h);
        // A repeated column keeps its first occurrence.
        let col = col.filter(|c| !mapping.contains(&Some(*c)));
        if col.is_none() && !h.trim().is_empty() {
            ignored_columns.push(h.trim().to_string());
        }
        mapping.push(col);
    }
    if mapping.iter().all(Option::is_none) {
        anyhow::bail!("no recognised NAT columns in header");
    }

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("data row {}", line + 1))?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut record = Record::default();
        for (cell, col) in row.iter().zip(&mapping) {
            if let Some(col) = col {
                assign(&mut record, *col, cell);
            }
        }
        records.push(record);
    }

    Ok(ParsedCsv {
        records,
        ignored_columns,
    })
}
