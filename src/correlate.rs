use crate::aggregate::PairedSamples;
use serde::Serialize;

/// |r| above this counts as a trend. Fixed dashboard policy, not a
/// significance test.
pub const TREND_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Trend {
    Positive,
    Negative,
    Weak,
}

impl Trend {
    pub fn classify(r: f64) -> Self {
        if r > TREND_THRESHOLD {
            Trend::Positive
        } else if r < -TREND_THRESHOLD {
            Trend::Negative
        } else {
            Trend::Weak
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
            Trend::Weak => "weak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub trend: Trend,
    pub sample_count: usize,
}

/// Pearson product-moment correlation over the paired points.
pub fn correlate(samples: &PairedSamples) -> CorrelationResult {
    let coefficient = pearson(samples);
    CorrelationResult {
        coefficient,
        trend: Trend::classify(coefficient),
        sample_count: samples.points.len(),
    }
}

fn pearson(samples: &PairedSamples) -> f64 {
    let points = &samples.points;
    if points.is_empty() {
        return 0.0;
    }
    // A constant axis has no variance. Checked on the raw values because a
    // mean that does not round back to the constant leaves tiny residuals.
    let first = points[0];
    if points.iter().all(|p| p.x == first.x) || points.iter().all(|p| p.y == first.y) {
        return 0.0;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut sxy = 0.0_f64;
    let mut sxx = 0.0_f64;
    let mut syy = 0.0_f64;
    for p in points {
        let dx = p.x - mean_x;
        let dy = p.y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return 0.0;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}
