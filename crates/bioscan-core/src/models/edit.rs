use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::assessment::AssessmentData;
use super::lifestyle::{Alcohol, Gender, PhysicalActivity, Sleep, SmokingStatus};
use super::measurement::{Field, Measurement};
use super::selection::HistoryKind;

/// A single edit a step renderer can make to the assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "edit", rename_all = "snake_case")]
#[ts(export)]
pub enum DataEdit {
    Measurement { field: Field, value: Measurement },
    Gender { value: Option<Gender> },
    SmokingStatus { value: SmokingStatus },
    Alcohol { value: Alcohol },
    Sleep { value: Sleep },
    PhysicalActivity { value: PhysicalActivity },
    ToggleSymptom { label: String },
    ToggleHistory { kind: HistoryKind, label: String },
}

impl DataEdit {
    pub fn measurement(field: Field, value: impl Into<Measurement>) -> Self {
        DataEdit::Measurement {
            field,
            value: value.into(),
        }
    }

    pub fn toggle_history(kind: HistoryKind, label: impl Into<String>) -> Self {
        DataEdit::ToggleHistory {
            kind,
            label: label.into(),
        }
    }

    pub fn toggle_symptom(label: impl Into<String>) -> Self {
        DataEdit::ToggleSymptom {
            label: label.into(),
        }
    }
}

impl AssessmentData {
    /// Apply `edit`, returning the new snapshot. `self` is left untouched.
    pub fn apply(&self, edit: &DataEdit) -> AssessmentData {
        match edit {
            DataEdit::Measurement { field, value } => self.with_measurement(*field, value.clone()),
            DataEdit::Gender { value } => AssessmentData {
                gender: *value,
                ..self.clone()
            },
            DataEdit::SmokingStatus { value } => AssessmentData {
                smoking_status: Some(*value),
                ..self.clone()
            },
            DataEdit::Alcohol { value } => AssessmentData {
                alcohol: Some(*value),
                ..self.clone()
            },
            DataEdit::Sleep { value } => AssessmentData {
                sleep: Some(*value),
                ..self.clone()
            },
            DataEdit::PhysicalActivity { value } => AssessmentData {
                physical_activity: Some(*value),
                ..self.clone()
            },
            DataEdit::ToggleSymptom { label } => AssessmentData {
                symptoms: self.symptoms.toggled(label),
                ..self.clone()
            },
            DataEdit::ToggleHistory { kind, label } => match kind {
                HistoryKind::Family => AssessmentData {
                    family_history: self.family_history.toggled_exclusive(*kind, label),
                    ..self.clone()
                },
                HistoryKind::Medical => AssessmentData {
                    medical_history: self.medical_history.toggled_exclusive(*kind, label),
                    ..self.clone()
                },
            },
        }
    }
}
