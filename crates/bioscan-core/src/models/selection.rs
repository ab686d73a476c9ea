use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const FAMILY_NONE: &str = "None of the above";
pub const MEDICAL_NONE: &str = "None";

pub const FAMILY_HISTORY_OPTIONS: &[&str] = &[
    "Type 2 Diabetes",
    "Hypertension",
    "Heart Disease",
    "Stroke",
    "High Cholesterol",
    "Obesity",
    "Thyroid Disorder",
    FAMILY_NONE,
];

pub const MEDICAL_HISTORY_OPTIONS: &[&str] = &[
    "Pre-diabetes",
    "PCOS (Polycystic Ovary Syndrome)",
    "Fatty Liver",
    "Hypothyroidism",
    "Sleep Apnea",
    "Gout",
    MEDICAL_NONE,
];

pub const SYMPTOM_OPTIONS: &[&str] = &[
    "Fatigue",
    "Frequent Urination",
    "Increased Thirst",
    "Blurred Vision",
    "Slow Healing Sores",
    "Tingling Hands/Feet",
    "Unexplained Weight Loss",
    "Dark Skin Patches",
];

/// Which history checklist a toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum HistoryKind {
    Family,
    Medical,
}

impl HistoryKind {
    /// The "nothing applies" member, mutually exclusive with every other.
    pub fn sentinel(&self) -> &'static str {
        match self {
            HistoryKind::Family => FAMILY_NONE,
            HistoryKind::Medical => MEDICAL_NONE,
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            HistoryKind::Family => FAMILY_HISTORY_OPTIONS,
            HistoryKind::Medical => MEDICAL_HISTORY_OPTIONS,
        }
    }
}

/// An unordered, duplicate-free set of condition or symptom labels.
///
/// Labels outside the option catalogs are accepted; the catalogs describe
/// what the steps offer, not what a record may contain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConditionSet(BTreeSet<String>);

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Plain toggle: add when absent, remove when present.
    pub fn toggled(&self, label: &str) -> Self {
        let mut next = self.0.clone();
        if !next.remove(label) {
            next.insert(label.to_string());
        }
        Self(next)
    }

    /// Toggle honouring the sentinel of `kind`.
    ///
    /// Selecting the sentinel always yields exactly `{sentinel}`. Any other
    /// label first evicts the sentinel, then toggles normally.
    pub fn toggled_exclusive(&self, kind: HistoryKind, label: &str) -> Self {
        let sentinel = kind.sentinel();
        if label == sentinel {
            return Self(BTreeSet::from([sentinel.to_string()]));
        }
        let mut next = self.0.clone();
        next.remove(sentinel);
        if !next.remove(label) {
            next.insert(label.to_string());
        }
        Self(next)
    }

    /// Members other than the sentinel of `kind`.
    pub fn conditions(&self, kind: HistoryKind) -> Vec<&str> {
        self.iter().filter(|l| *l != kind.sentinel()).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
