use crate::aggregate::{
    self, CrossTab, FrequencyTable, GroupedAverages, PairedSamples, Series,
};
use crate::correlate::{self, CorrelationResult};
use crate::error::EngineError;
use crate::narrate::{self, Insight};
use crate::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    Distribution,
    Trend,
    CategoricalCategorical,
    CategoricalNumerical,
    NumericalNumerical,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Distribution => "distribution",
            ViewMode::Trend => "trend",
            ViewMode::CategoricalCategorical => "categoricalCategorical",
            ViewMode::CategoricalNumerical => "categoricalNumerical",
            ViewMode::NumericalNumerical => "numericalNumerical",
        }
    }
}

/// What the dashboard selectors currently point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub mode: ViewMode,
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum AggregationResult {
    FrequencyTable(FrequencyTable),
    Series(Series),
    CrossTab(CrossTab),
    GroupedAverages(GroupedAverages),
    PairedSamples(PairedSamples),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewReport {
    pub selection: Selection,
    pub aggregation: AggregationResult,
    pub correlation: Option<CorrelationResult>,
    pub insight: Insight,
}

impl Selection {
    fn secondary(&self) -> Result<&str, EngineError> {
        self.secondary
            .as_deref()
            .ok_or(EngineError::IncompleteSelection {
                mode: self.mode.as_str(),
            })
    }
}

/// Recomputes one dashboard view from the snapshot.
pub fn analyze(records: &[Record], selection: &Selection) -> Result<ViewReport, EngineError> {
    let primary = selection.primary.as_str();
    let (aggregation, correlation, insight) = match selection.mode {
        ViewMode::Distribution => {
            let t = aggregate::frequency_table(records, primary)?;
            let insight = narrate::narrate_frequency(&t);
            (AggregationResult::FrequencyTable(t), None, insight)
        }
        ViewMode::Trend => {
            let s = aggregate::trend_series(records, primary)?;
            let insight = narrate::narrate_series(&s);
            (AggregationResult::Series(s), None, insight)
        }
        ViewMode::CategoricalCategorical => {
            let t = aggregate::cross_tabulate(records, primary, selection.secondary()?)?;
            let insight = narrate::narrate_cross_tab(&t);
            (AggregationResult::CrossTab(t), None, insight)
        }
        ViewMode::CategoricalNumerical => {
            let g = aggregate::grouped_average(records, primary, selection.secondary()?)?;
            let insight = narrate::narrate_grouped_average(&g);
            (AggregationResult::GroupedAverages(g), None, insight)
        }
        ViewMode::NumericalNumerical => {
            let secondary = selection.secondary()?;
            let p = aggregate::paired_samples(records, primary, secondary)?;
            let r = correlate::correlate(&p);
            let insight = narrate::narrate_correlation(primary, secondary, &r);
            (AggregationResult::PairedSamples(p), Some(r), insight)
        }
    };

    Ok(ViewReport {
        selection: selection.clone(),
        aggregation,
        correlation,
        insight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Score;

    fn sample() -> Vec<Record> {
        vec![
            Record {
                type_of_school: Some("Private".into()),
                nat_results: Some(Score::Number(90.0)),
                academic_performance: Some(Score::Number(88.0)),
                ..Record::default()
            },
            Record {
                type_of_school: Some("Public".into()),
                nat_results: Some(Score::Number(70.0)),
                academic_performance: Some(Score::Number(75.0)),
                ..Record::default()
            },
            Record {
                type_of_school: Some("Private".into()),
                nat_results: Some(Score::Number(80.0)),
                academic_performance: Some(Score::Number(81.0)),
                ..Record::default()
            },
            Record {
                type_of_school: Some("Public".into()),
                nat_results: Some(Score::Text("N/A".into())),
                ..Record::default()
            },
        ]
    }

    fn select(mode: ViewMode, primary: &str, secondary: Option<&str>) -> Selection {
        Selection {
            mode,
            primary: primary.into(),
            secondary: secondary.map(Into::into),
        }
    }

    #[test]
    fn categorical_numerical_end_to_end() {
        let report = analyze(
            &sample(),
            &select(
                ViewMode::CategoricalNumerical,
                "type_of_school",
                Some("nat_results"),
            ),
        )
        .expect("view");
        match &report.aggregation {
            AggregationResult::GroupedAverages(g) => {
                assert_eq!(g.categories, vec!["Private", "Public"]);
                assert_eq!(g.averages, vec![85.0, 70.0]);
            }
            other => panic!("unexpected aggregation {other:?}"),
        }
        assert!(report.correlation.is_none());
        assert!(report.insight.text().starts_with("Private"));
        assert!(report.insight.text().contains("85.00"));
    }

    #[test]
    fn numerical_pair_carries_correlation() {
        let report = analyze(
            &sample(),
            &select(
                ViewMode::NumericalNumerical,
                "nat_results",
                Some("academic_performance"),
            ),
        )
        .expect("view");
        let r = report.correlation.expect("correlation");
        assert_eq!(r.sample_count, 3);
        assert!(r.coefficient > 0.5);
        assert_eq!(r.trend, correlate::Trend::Positive);
    }

    #[test]
    fn two_field_modes_need_secondary() {
        let e = analyze(&sample(), &select(ViewMode::CategoricalCategorical, "sex", None))
            .unwrap_err();
        assert_eq!(e.code(), "incomplete_selection");
    }

    #[test]
    fn unknown_selector_fails_loudly() {
        let e = analyze(&sample(), &select(ViewMode::Distribution, "shoe_size", None))
            .unwrap_err();
        assert_eq!(e, EngineError::UnknownField("shoe_size".into()));
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let sel = select(ViewMode::CategoricalCategorical, "type_of_school", Some("sex"));
        let a = analyze(&sample(), &sel).expect("view");
        let b = analyze(&sample(), &sel).expect("view");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_dataset_degrades_gracefully() {
        for sel in [
            select(ViewMode::Distribution, "sex", None),
            select(ViewMode::Trend, "nat_results", None),
            select(ViewMode::CategoricalCategorical, "sex", Some("ethnic")),
            select(ViewMode::CategoricalNumerical, "sex", Some("age")),
            select(ViewMode::NumericalNumerical, "age", Some("nat_results")),
        ] {
            let report = analyze(&[], &sel).expect("empty view");
            assert!(!report.insight.text().is_empty());
        }
    }
}
