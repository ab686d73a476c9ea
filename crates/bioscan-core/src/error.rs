use thiserror::Error;

use crate::models::measurement::Field;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{} failed validation", errors.len())]
    Validation { errors: Vec<FieldError> },

    #[error("unknown option '{value}' for {kind}")]
    UnknownOption { kind: &'static str, value: String },
}

/// A single measurement that could not be turned into a number at submission.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}: '{raw}' {reason}", field.label())]
pub struct FieldError {
    pub field: Field,
    pub raw: String,
    pub reason: FieldErrorReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorReason {
    NotANumber,
    Negative,
    NotFinite,
}

impl std::fmt::Display for FieldErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FieldErrorReason::NotANumber => "is not a number",
            FieldErrorReason::Negative => "must not be negative",
            FieldErrorReason::NotFinite => "is not a finite number",
        };
        f.write_str(text)
    }
}
