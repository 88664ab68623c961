use thiserror::Error;

/// Selection problems raised by the insight engine. These are caller bugs and
/// are returned immediately, never papered over with an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field {0} is not categorical")]
    NotCategorical(String),
    #[error("field {0} is not numerical")]
    NotNumerical(String),
    #[error("view mode {mode} needs a second field")]
    IncompleteSelection { mode: &'static str },
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::UnknownField(_) => "unknown_field",
            EngineError::NotCategorical(_) => "not_categorical",
            EngineError::NotNumerical(_) => "not_numerical",
            EngineError::IncompleteSelection { .. } => "incomplete_selection",
        }
    }
}

/// Failures at the record store boundary. Callers keep their last snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),
    #[error("stored record {id} is not a valid document: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        "store_unavailable"
    }
}
