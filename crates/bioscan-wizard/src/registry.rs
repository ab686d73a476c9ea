//! Step registry: what each wizard screen shows.
//!
//! Pure lookups from a [`WizardStep`] to its title, progress indicator,
//! content renderer and primary action. Every step has an entry, so the
//! registry cannot come up empty for a screen the wizard can be on.

use std::sync::LazyLock;

use serde::Serialize;

use bioscan_core::models::edit::DataEdit;
use bioscan_core::models::measurement::Field;
use bioscan_core::models::selection::HistoryKind;

use crate::error::WizardError;
use crate::step::{LabPanel, ResultStage, Section, WizardPosition, WizardStep};

/// Number of steps the questionnaire progress bar counts.
pub const PROGRESS_STEPS: u8 = 8;

/// Which renderer draws a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContentKind {
    Intro,
    Demographics,
    Lifestyle,
    FamilyHistory,
    MedicalHistory,
    VitalSigns,
    Symptoms,
    ReviewSummary,
    LabMethodChooser,
    LabPanel(LabPanel),
    ReviewBiomarkers,
    Analyzing,
    Result(ResultStage),
    MedicalReport,
}

impl ContentKind {
    /// Numeric fields this renderer lets the user type into.
    pub fn editable_fields(&self) -> &'static [Field] {
        match self {
            ContentKind::Demographics => Section::Demographics.fields(),
            ContentKind::VitalSigns => Section::Vitals.fields(),
            ContentKind::LabPanel(p) => p.fields(),
            _ => &[],
        }
    }

    /// Whether this renderer can produce `edit`.
    pub fn accepts(&self, edit: &DataEdit) -> bool {
        match edit {
            DataEdit::Measurement { field, .. } => self.editable_fields().contains(field),
            DataEdit::Gender { .. } => *self == ContentKind::Demographics,
            DataEdit::SmokingStatus { .. }
            | DataEdit::Alcohol { .. }
            | DataEdit::Sleep { .. }
            | DataEdit::PhysicalActivity { .. } => *self == ContentKind::Lifestyle,
            DataEdit::ToggleSymptom { .. } => *self == ContentKind::Symptoms,
            DataEdit::ToggleHistory { kind, .. } => match kind {
                HistoryKind::Family => *self == ContentKind::FamilyHistory,
                HistoryKind::Medical => *self == ContentKind::MedicalHistory,
            },
        }
    }
}

/// The questionnaire progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// The `X` in "Step X of 8".
    pub step: u8,
    pub fraction: f32,
}

impl Progress {
    fn of(step: u8) -> Self {
        Self {
            step,
            fraction: f32::from(step) / f32::from(PROGRESS_STEPS),
        }
    }

    pub fn label(&self) -> String {
        format!("Step {} of {}", self.step, PROGRESS_STEPS)
    }

    /// Whole percent, truncated.
    pub fn percent(&self) -> u8 {
        (self.fraction * 100.0) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepDescriptor {
    pub step: WizardStep,
    pub position: WizardPosition,
    /// Top bar title. `None` when the step has no top bar.
    pub title: Option<&'static str>,
    pub progress: Option<Progress>,
    pub content: ContentKind,
    /// Label of the shared bottom button. `None` hides it.
    pub primary_action: Option<&'static str>,
    /// Buttons the screen draws itself in place of the shared one.
    pub own_actions: &'static [&'static str],
    /// Whether the screen offers a way back.
    pub has_back: bool,
}

pub fn title(step: WizardStep) -> Option<&'static str> {
    match step {
        WizardStep::Intro | WizardStep::Analyzing => None,
        WizardStep::Section(s) => Some(s.title()),
        WizardStep::LabMethod => Some("Lab Reports"),
        WizardStep::LabPanel(p) => Some(p.title()),
        WizardStep::LabReview => Some("Review Biomarkers"),
        WizardStep::Result(r) => Some(r.title()),
        WizardStep::Report => Some("Medical Report"),
    }
}

/// Progress is shown for steps 1–8 only. Inside the lab section the bar
/// tracks the panel number, and the chooser and the review both read full.
pub fn progress(step: WizardStep) -> Option<Progress> {
    match step {
        WizardStep::Section(s) => Some(Progress::of(s.number())),
        WizardStep::LabPanel(p) => Some(Progress::of(p.number())),
        WizardStep::LabMethod | WizardStep::LabReview => Some(Progress::of(PROGRESS_STEPS)),
        _ => None,
    }
}

pub fn content(step: WizardStep) -> ContentKind {
    match step {
        WizardStep::Intro => ContentKind::Intro,
        WizardStep::Section(s) => match s {
            Section::Demographics => ContentKind::Demographics,
            Section::Lifestyle => ContentKind::Lifestyle,
            Section::FamilyHistory => ContentKind::FamilyHistory,
            Section::MedicalHistory => ContentKind::MedicalHistory,
            Section::Vitals => ContentKind::VitalSigns,
            Section::Symptoms => ContentKind::Symptoms,
            Section::Review => ContentKind::ReviewSummary,
        },
        WizardStep::LabMethod => ContentKind::LabMethodChooser,
        WizardStep::LabPanel(p) => ContentKind::LabPanel(p),
        WizardStep::LabReview => ContentKind::ReviewBiomarkers,
        WizardStep::Analyzing => ContentKind::Analyzing,
        WizardStep::Result(r) => ContentKind::Result(r),
        WizardStep::Report => ContentKind::MedicalReport,
    }
}

/// The intro, the lab chooser, the analysis and the report carry their own
/// actions instead of the shared button.
pub fn primary_action(step: WizardStep) -> Option<&'static str> {
    match step {
        WizardStep::Intro
        | WizardStep::LabMethod
        | WizardStep::Analyzing
        | WizardStep::Report => None,
        WizardStep::Result(r) => Some(r.next_label()),
        WizardStep::LabReview => Some("Run AI Analysis"),
        WizardStep::Section(Section::Review) => Some("Confirm & Continue"),
        WizardStep::Section(Section::Symptoms) => Some("Review Data"),
        WizardStep::Section(_) | WizardStep::LabPanel(_) => Some("Next Step"),
    }
}

pub fn own_actions(step: WizardStep) -> &'static [&'static str] {
    match step {
        WizardStep::Intro => &[START_LABEL],
        WizardStep::LabMethod => &[ENTER_MANUALLY_LABEL, EXTRACT_LABEL],
        _ => &[],
    }
}

pub fn describe(step: WizardStep) -> StepDescriptor {
    StepDescriptor {
        step,
        position: step.position(),
        title: title(step),
        progress: progress(step),
        content: content(step),
        primary_action: primary_action(step),
        own_actions: own_actions(step),
        has_back: step != WizardStep::Analyzing,
    }
}

/// Describe an integer address, failing fast when it names no screen.
pub fn describe_position(position: WizardPosition) -> Result<StepDescriptor, WizardError> {
    WizardStep::from_position(position).map(describe)
}

static ALL_DESCRIPTORS: LazyLock<Vec<StepDescriptor>> =
    LazyLock::new(|| WizardStep::all().into_iter().map(describe).collect());

/// Descriptors for every screen, in forward order.
pub fn all_descriptors() -> &'static [StepDescriptor] {
    &ALL_DESCRIPTORS
}

/// Labels of the two actions on the lab chooser.
pub const ENTER_MANUALLY_LABEL: &str = "Enter Manual";
pub const EXTRACT_LABEL: &str = "Upload PDF / Image";
/// Label of the intro's start button.
pub const START_LABEL: &str = "Start Assessment";
