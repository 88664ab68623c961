use crate::record::Record;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAverage {
    /// `None` when no record carries a finite value.
    pub average: Option<f64>,
    pub sample_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_students: usize,
    pub nat_results: MetricAverage,
    pub academic_performance: MetricAverage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecord {
    pub rank: usize,
    /// 1-based position in the snapshot.
    pub position: usize,
    pub nat_results: f64,
    pub record: Record,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub metrics: DashboardMetrics,
    pub top_performers: Vec<RankedRecord>,
}

pub fn dashboard_view(records: &[Record], top_n: usize) -> DashboardView {
    DashboardView {
        metrics: summary_metrics(records),
        top_performers: top_performers(records, top_n),
    }
}

fn average_of(records: &[Record], field: &str) -> MetricAverage {
    let values: Vec<f64> = records.iter().filter_map(|r| r.number(field)).collect();
    let average = if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    };
    MetricAverage {
        average,
        sample_count: values.len(),
    }
}

pub fn summary_metrics(records: &[Record]) -> DashboardMetrics {
    DashboardMetrics {
        total_students: records.len(),
        nat_results: average_of(records, "nat_results"),
        academic_performance: average_of(records, "academic_performance"),
    }
}

/// Highest NAT results first. Ties keep snapshot order.
pub fn top_performers(records: &[Record], limit: usize) -> Vec<RankedRecord> {
    let mut scored: Vec<(usize, f64)> = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.number("nat_results").map(|v| (i, v)))
        .collect();
    // Stable sort on finite values only, so ties never reorder.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(rank, (i, nat))| RankedRecord {
            rank: rank + 1,
            position: i + 1,
            nat_results: nat,
            record: records[i].clone(),
        })
        .collect()
}
