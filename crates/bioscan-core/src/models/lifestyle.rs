use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Shared behaviour of the closed single-choice options on the intake steps.
pub trait Choice: Sized + Copy + 'static {
    /// Name used in error messages.
    const KIND: &'static str;

    /// Options in the order the step presents them.
    fn options() -> &'static [Self];

    fn label(&self) -> &'static str;

    fn from_label(label: &str) -> Result<Self, CoreError> {
        Self::options()
            .iter()
            .copied()
            .find(|o| o.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| CoreError::UnknownOption {
                kind: Self::KIND,
                value: label.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Choice for Gender {
    const KIND: &'static str = "gender";

    fn options() -> &'static [Self] {
        &[Gender::Male, Gender::Female, Gender::Other]
    }

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

impl Choice for SmokingStatus {
    const KIND: &'static str = "smoking status";

    fn options() -> &'static [Self] {
        &[SmokingStatus::Never, SmokingStatus::Former, SmokingStatus::Current]
    }

    fn label(&self) -> &'static str {
        match self {
            SmokingStatus::Never => "Never",
            SmokingStatus::Former => "Former",
            SmokingStatus::Current => "Current",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Alcohol {
    None,
    Occasional,
    Moderate,
    Heavy,
}

impl Choice for Alcohol {
    const KIND: &'static str = "alcohol consumption";

    fn options() -> &'static [Self] {
        &[
            Alcohol::None,
            Alcohol::Occasional,
            Alcohol::Moderate,
            Alcohol::Heavy,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Alcohol::None => "None",
            Alcohol::Occasional => "Occasional",
            Alcohol::Moderate => "Moderate",
            Alcohol::Heavy => "Heavy",
        }
    }
}

/// Average nightly sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sleep {
    UnderSix,
    SixToEight,
    OverEight,
}

impl Choice for Sleep {
    const KIND: &'static str = "average sleep";

    fn options() -> &'static [Self] {
        &[Sleep::UnderSix, Sleep::SixToEight, Sleep::OverEight]
    }

    fn label(&self) -> &'static str {
        match self {
            Sleep::UnderSix => "< 6 hrs",
            Sleep::SixToEight => "6-8 hrs",
            Sleep::OverEight => "> 8 hrs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PhysicalActivity {
    Sedentary,
    LightlyActive,
    Active,
    VeryActive,
}

impl Choice for PhysicalActivity {
    const KIND: &'static str = "physical activity";

    fn options() -> &'static [Self] {
        &[
            PhysicalActivity::Sedentary,
            PhysicalActivity::LightlyActive,
            PhysicalActivity::Active,
            PhysicalActivity::VeryActive,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            PhysicalActivity::Sedentary => "Sedentary",
            PhysicalActivity::LightlyActive => "Lightly Active",
            PhysicalActivity::Active => "Active",
            PhysicalActivity::VeryActive => "Very Active",
        }
    }
}
