use serde::{Deserialize, Serialize};

/// A numeric cell as it arrives from the store. CSV exports and hand edits
/// leave text behind, so parsing is deferred to aggregation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
}

impl Score {
    /// Finite value, if any. Unparsable or non-finite input yields `None`.
    pub fn as_finite(&self) -> Option<f64> {
        let v = match self {
            Score::Number(v) => *v,
            Score::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }

    /// Keeps parseable text as a number and everything else verbatim.
    pub fn from_text(raw: &str) -> Option<Score> {
        let t = raw.trim();
        if t.is_empty() {
            return None;
        }
        match t.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(Score::Number(v)),
            _ => Some(Score::Text(t.to_string())),
        }
    }
}

/// One respondent row of the NAT dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_performance: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socio_economic_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_habit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_results: Option<Score>,
}

impl Record {
    /// Categorical value by catalog name, trimmed. Blank counts as absent.
    pub fn category(&self, field: &str) -> Option<&str> {
        let raw = match field {
            "sex" => self.sex.as_deref(),
            "ethnic" => self.ethnic.as_deref(),
            "academic_description" => self.academic_description.as_deref(),
            "iq" => self.iq.as_deref(),
            "type_of_school" => self.type_of_school.as_deref(),
            "socio_economic_status" => self.socio_economic_status.as_deref(),
            "study_habit" => self.study_habit.as_deref(),
            _ => None,
        }?;
        let t = raw.trim();
        (!t.is_empty()).then_some(t)
    }

    /// Numeric value by catalog name, only when it parses to a finite number.
    pub fn number(&self, field: &str) -> Option<f64> {
        let score = match field {
            "age" => self.age.as_ref(),
            "academic_performance" => self.academic_performance.as_ref(),
            "nat_results" => self.nat_results.as_ref(),
            _ => None,
        }?;
        score.as_finite()
    }
}
