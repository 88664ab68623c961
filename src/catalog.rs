use crate::error::EngineError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Categorical,
    Numerical,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Canonical display order. Empty for numerical fields.
    pub domain: &'static [&'static str],
}

const fn categorical(
    name: &'static str,
    label: &'static str,
    domain: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Categorical,
        domain,
    }
}

const fn numerical(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Numerical,
        domain: &[],
    }
}

static FIELDS: [FieldSpec; 10] = [
    numerical("age", "Age"),
    categorical("sex", "Sex", &["Male", "Female"]),
    categorical("ethnic", "Ethnic Group", &["Cebuano", "Maranao", "Iliganon"]),
    numerical("academic_performance", "Academic Performance"),
    categorical(
        "academic_description",
        "Academic Description",
        &[
            "Outstanding",
            "Very Satisfactory",
            "Satisfactory",
            "Fairly Satisfactory",
            "Did Not Meet Expectations",
        ],
    ),
    categorical(
        "iq",
        "IQ",
        &["Low", "Below Average", "Average", "Above Average", "High"],
    ),
    categorical("type_of_school", "Type of School", &["Private", "Public"]),
    categorical(
        "socio_economic_status",
        "Socio-Economic Status",
        &[
            "Above poverty line",
            "On poverty line",
            "Below poverty line",
        ],
    ),
    categorical("study_habit", "Study Habit", &["Poor", "Good", "Excellent"]),
    numerical("nat_results", "NAT Results"),
];

pub fn fields() -> &'static [FieldSpec] {
    &FIELDS
}

pub fn describe(name: &str) -> Result<&'static FieldSpec, EngineError> {
    FIELDS
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| EngineError::UnknownField(name.to_string()))
}

pub fn domain_of(name: &str) -> Result<&'static [&'static str], EngineError> {
    let spec = categorical_field(name)?;
    Ok(spec.domain)
}

/// Looks up a field that must be categorical.
pub fn categorical_field(name: &str) -> Result<&'static FieldSpec, EngineError> {
    let spec = describe(name)?;
    match spec.kind {
        FieldKind::Categorical => Ok(spec),
        FieldKind::Numerical => Err(EngineError::NotCategorical(name.to_string())),
    }
}

/// Looks up a field that must be numerical.
pub fn numerical_field(name: &str) -> Result<&'static FieldSpec, EngineError> {
    let spec = describe(name)?;
    match spec.kind {
        FieldKind::Numerical => Ok(spec),
        FieldKind::Categorical => Err(EngineError::NotNumerical(name.to_string())),
    }
}
