//! Aggregations over a record snapshot.
//!
//! Every function here is pure: same records and same field names give the
//! same output, bit for bit. Orderings come from the catalog domain or from
//! first appearance in the snapshot, tracked with a `Vec` plus an index map so
//! hash iteration order never leaks into a result.

use crate::catalog;
use crate::error::EngineError;
use crate::record::Record;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyTable {
    pub field: String,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub total: u64,
    /// Labels appended after the catalog domain, in first-appearance order.
    pub out_of_domain: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTab {
    pub row_field: String,
    pub col_field: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub matrix: Vec<Vec<u64>>,
}

impl CrossTab {
    pub fn row_sums(&self) -> Vec<u64> {
        self.matrix.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn col_sums(&self) -> Vec<u64> {
        let mut sums = vec![0_u64; self.col_labels.len()];
        for row in &self.matrix {
            for (j, n) in row.iter().enumerate() {
                sums[j] += n;
            }
        }
        sums
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedAverages {
    pub group_field: String,
    pub value_field: String,
    pub categories: Vec<String>,
    pub averages: Vec<f64>,
    pub sample_counts: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairedSamples {
    pub x_field: String,
    pub y_field: String,
    pub points: Vec<Point>,
    /// Records skipped because either side was missing or not finite.
    pub dropped: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub field: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Insertion-ordered label set.
#[derive(Default)]
struct LabelIndex {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelIndex {
    fn seeded(domain: &[&str]) -> Self {
        let mut out = Self::default();
        for label in domain {
            out.slot(label);
        }
        out
    }

    fn slot(&mut self, label: &str) -> usize {
        if let Some(&i) = self.index.get(label) {
            return i;
        }
        let i = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), i);
        i
    }
}

pub fn frequency_table(records: &[Record], field: &str) -> Result<FrequencyTable, EngineError> {
    let spec = catalog::categorical_field(field)?;
    let mut labels = LabelIndex::seeded(spec.domain);
    let mut counts = vec![0_u64; labels.labels.len()];

    for r in records {
        let Some(value) = r.category(field) else {
            continue;
        };
        let i = labels.slot(value);
        if i == counts.len() {
            counts.push(0);
        }
        counts[i] += 1;
    }

    let out_of_domain = labels.labels[spec.domain.len()..].to_vec();
    Ok(FrequencyTable {
        field: field.to_string(),
        total: counts.iter().sum(),
        labels: labels.labels,
        counts,
        out_of_domain,
    })
}

pub fn cross_tabulate(
    records: &[Record],
    row_field: &str,
    col_field: &str,
) -> Result<CrossTab, EngineError> {
    catalog::categorical_field(row_field)?;
    catalog::categorical_field(col_field)?;

    let mut rows = LabelIndex::default();
    let mut cols = LabelIndex::default();
    let mut cells: Vec<(usize, usize)> = Vec::new();
    for r in records {
        let (Some(a), Some(b)) = (r.category(row_field), r.category(col_field)) else {
            continue;
        };
        cells.push((rows.slot(a), cols.slot(b)));
    }

    let mut matrix = vec![vec![0_u64; cols.labels.len()]; rows.labels.len()];
    for (i, j) in cells {
        matrix[i][j] += 1;
    }

    Ok(CrossTab {
        row_field: row_field.to_string(),
        col_field: col_field.to_string(),
        row_labels: rows.labels,
        col_labels: cols.labels,
        matrix,
    })
}

pub fn grouped_average(
    records: &[Record],
    group_field: &str,
    value_field: &str,
) -> Result<GroupedAverages, EngineError> {
    catalog::categorical_field(group_field)?;
    catalog::numerical_field(value_field)?;

    let mut groups = LabelIndex::default();
    // (sum, count) per observed group, including groups with no valid value.
    let mut acc: Vec<(f64, u64)> = Vec::new();
    for r in records {
        let Some(group) = r.category(group_field) else {
            continue;
        };
        let i = groups.slot(group);
        if i == acc.len() {
            acc.push((0.0, 0));
        }
        if let Some(v) = r.number(value_field) {
            acc[i].0 += v;
            acc[i].1 += 1;
        }
    }

    let mut categories = Vec::new();
    let mut averages = Vec::new();
    let mut sample_counts = Vec::new();
    for (label, (sum, count)) in groups.labels.into_iter().zip(acc) {
        if count == 0 {
            continue;
        }
        categories.push(label);
        averages.push(sum / count as f64);
        sample_counts.push(count);
    }

    Ok(GroupedAverages {
        group_field: group_field.to_string(),
        value_field: value_field.to_string(),
        categories,
        averages,
        sample_counts,
    })
}

pub fn paired_samples(
    records: &[Record],
    x_field: &str,
    y_field: &str,
) -> Result<PairedSamples, EngineError> {
    catalog::numerical_field(x_field)?;
    catalog::numerical_field(y_field)?;

    let mut points = Vec::new();
    let mut dropped = 0_u64;
    for r in records {
        match (r.number(x_field), r.number(y_field)) {
            (Some(x), Some(y)) => points.push(Point { x, y }),
            _ => dropped += 1,
        }
    }

    Ok(PairedSamples {
        x_field: x_field.to_string(),
        y_field: y_field.to_string(),
        points,
        dropped,
    })
}

/// Per-record series for the trend view. Labels keep the record's 1-based
/// position in the snapshot even when earlier records were skipped.
pub fn trend_series(records: &[Record], field: &str) -> Result<Series, EngineError> {
    catalog::numerical_field(field)?;

    let mut labels = Vec::new();
    let mut values = Vec::new();
    for (i, r) in records.iter().enumerate() {
        if let Some(v) = r.number(field) {
            labels.push(format!("Student {}", i + 1));
            values.push(v);
        }
    }

    Ok(Series {
        field: field.to_string(),
        labels,
        values,
    })
}
