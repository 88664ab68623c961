//! Sentence templates over engine output. Nothing here recomputes an
//! aggregate; it only picks extremes and formats them.
//!
//! Every "largest"/"smallest" lookup keeps the first candidate in the
//! result's own order when values tie.

use crate::aggregate::{CrossTab, FrequencyTable, GroupedAverages, Series};
use crate::catalog;
use crate::correlate::CorrelationResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFinding {
    pub row_label: String,
    pub col_label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginFinding {
    pub label: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesFinding {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Insight {
    #[serde(rename_all = "camelCase")]
    Distribution {
        label: Option<String>,
        count: u64,
        total: u64,
        percentage: f64,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Trend {
        highest: Option<SeriesFinding>,
        lowest: Option<SeriesFinding>,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    CrossTab {
        top_cell: Option<CellFinding>,
        top_row: Option<MarginFinding>,
        top_col: Option<MarginFinding>,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    GroupedAverage {
        category: Option<String>,
        average: Option<f64>,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Correlation {
        coefficient: f64,
        trend: String,
        text: String,
    },
}

impl Insight {
    pub fn text(&self) -> &str {
        match self {
            Insight::Distribution { text, .. }
            | Insight::Trend { text, .. }
            | Insight::CrossTab { text, .. }
            | Insight::GroupedAverage { text, .. }
            | Insight::Correlation { text, .. } => text,
        }
    }
}

fn label_of(field: &str) -> &str {
    catalog::describe(field).map(|f| f.label).unwrap_or(field)
}

/// Index of the first maximum. `None` for an empty slice.
fn first_max_by<T, F>(items: &[T], mut greater: F) -> Option<usize>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut best: Option<usize> = None;
    for (i, item) in items.iter().enumerate() {
        match best {
            Some(b) if !greater(item, &items[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}

pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

pub fn narrate_frequency(table: &FrequencyTable) -> Insight {
    let field = label_of(&table.field);
    // All counts zero: no label is reported, not the first domain entry at 0%.
    let top = first_max_by(&table.counts, |a, b| a > b).filter(|&i| table.counts[i] > 0);

    match top {
        Some(i) => {
            let count = table.counts[i];
            let pct = percentage(count, table.total);
            let label = table.labels[i].clone();
            let text = format!(
                "{label} is the most common {field} value with {count} of {} students ({pct:.2}%).",
                table.total
            );
            Insight::Distribution {
                label: Some(label),
                count,
                total: table.total,
                percentage: pct,
                text,
            }
        }
        None => Insight::Distribution {
            label: None,
            count: 0,
            total: table.total,
            percentage: 0.0,
            text: format!("No students have a recorded {field} value (0 of 0, 0.00%)."),
        },
    }
}

pub fn narrate_series(series: &Series) -> Insight {
    let field = label_of(&series.field);
    let hi = first_max_by(&series.values, |a, b| a > b);
    let lo = first_max_by(&series.values, |a, b| a < b);
    let finding = |i: usize| SeriesFinding {
        label: series.labels[i].clone(),
        value: series.values[i],
    };

    match (hi.map(finding), lo.map(finding)) {
        (Some(h), Some(l)) => {
            let text = format!(
                "{} has the highest {field} at {:.2}; {} has the lowest at {:.2}.",
                h.label, h.value, l.label, l.value
            );
            Insight::Trend {
                highest: Some(h),
                lowest: Some(l),
                text,
            }
        }
        _ => Insight::Trend {
            highest: None,
            lowest: None,
            text: format!("No valid {field} values to chart."),
        },
    }
}

pub fn narrate_cross_tab(tab: &CrossTab) -> Insight {
    let row_field = label_of(&tab.row_field);
    let col_field = label_of(&tab.col_field);

    // Row-major scan so ties resolve to the earliest row, then column.
    let mut top_cell: Option<CellFinding> = None;
    for (i, row) in tab.matrix.iter().enumerate() {
        for (j, &count) in row.iter().enumerate() {
            if count > top_cell.as_ref().map(|c| c.count).unwrap_or(0) {
                top_cell = Some(CellFinding {
                    row_label: tab.row_labels[i].clone(),
                    col_label: tab.col_labels[j].clone(),
                    count,
                });
            }
        }
    }

    let row_sums = tab.row_sums();
    let col_sums = tab.col_sums();
    let top_row = first_max_by(&row_sums, |a, b| a > b).map(|i| MarginFinding {
        label: tab.row_labels[i].clone(),
        total: row_sums[i],
    });
    let top_col = first_max_by(&col_sums, |a, b| a > b).map(|i| MarginFinding {
        label: tab.col_labels[i].clone(),
        total: col_sums[i],
    });

    let text = match (&top_cell, &top_row, &top_col) {
        (Some(cell), Some(row), Some(col)) => format!(
            "The most frequent combination is {row_field} {} with {col_field} {} ({} students). \
             {} leads {row_field} overall with {} students; {} leads {col_field} with {}.",
            cell.row_label, cell.col_label, cell.count, row.label, row.total, col.label, col.total
        ),
        _ => format!("No students have both {row_field} and {col_field} recorded."),
    };

    Insight::CrossTab {
        top_cell,
        top_row,
        top_col,
        text,
    }
}

pub fn narrate_grouped_average(groups: &GroupedAverages) -> Insight {
    let group_field = label_of(&groups.group_field);
    let value_field = label_of(&groups.value_field);
    let top = first_max_by(&groups.averages, |a, b| a > b);

    match top {
        Some(i) => {
            let category = groups.categories[i].clone();
            let average = groups.averages[i];
            let text = format!(
                "{category} has the highest average {value_field} at {average:.2} \
                 across {group_field} groups."
            );
            Insight::GroupedAverage {
                category: Some(category),
                average: Some(average),
                text,
            }
        }
        None => Insight::GroupedAverage {
            category: None,
            average: None,
            text: format!("No {group_field} group has a valid {value_field} value."),
        },
    }
}

pub fn narrate_correlation(x_field: &str, y_field: &str, r: &CorrelationResult) -> Insight {
    let x = label_of(x_field);
    let y = label_of(y_field);
    let text = format!(
        "{x} and {y} show a {} correlation (r = {:.2}).",
        r.trend.as_str(),
        r.coefficient
    );
    Insight::Correlation {
        coefficient: r.coefficient,
        trend: r.trend.as_str().to_string(),
        text,
    }
}
