//! The assessment flow as a pure reducer.
//!
//! [`reduce`] maps the current [`WizardState`] and one [`WizardAction`] to a
//! [`Transition`]: the next state plus the side effects the host must carry
//! out. Nothing here touches a clock, a task or the network.

use std::sync::Arc;

use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::edit::DataEdit;
use bioscan_core::models::measurement::{Field, Measurement};
use bioscan_core::models::screening::AnalysisResult;

use crate::analyzing::AnalysisOutcome;
use crate::error::WizardError;
use crate::registry;
use crate::step::{LabPanel, ResultStage, Section, WizardStep};

/// Identifies one external call so its completion can be matched to the
/// request that started it.
pub type Ticket = u64;

/// Values an extraction produced, applied in one edit.
pub type ExtractedValues = Vec<(Field, Measurement)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCall {
    Extraction { ticket: Ticket },
    Analysis { ticket: Ticket },
}

impl PendingCall {
    pub fn name(&self) -> &'static str {
        match self {
            PendingCall::Extraction { .. } => "extraction",
            PendingCall::Analysis { .. } => "analysis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub data: Arc<AssessmentData>,
    /// External call whose completion the flow is waiting for.
    pub pending: Option<PendingCall>,
    /// Result of the last completed analysis, shown by the result stages.
    pub analysis: Option<Arc<AnalysisResult>>,
    /// Message of the last failed extraction or analysis.
    pub failure: Option<String>,
    next_ticket: Ticket,
}

impl WizardState {
    pub fn new(data: AssessmentData) -> Self {
        Self {
            data: Arc::new(data),
            ..Self::default()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        self.next_ticket
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// The intro's start button.
    Start,
    Back,
    /// The shared primary button.
    Next,
    EnterLabsManually,
    BeginExtraction,
    ApplyExtraction {
        ticket: Ticket,
        values: ExtractedValues,
    },
    ExtractionFailed {
        ticket: Ticket,
        message: String,
    },
    /// Edit shortcut on the review step.
    EditSection(Section),
    Edit(DataEdit),
    AnalysisFinished {
        ticket: Ticket,
        outcome: AnalysisOutcome,
    },
    RetryAnalysis,
    Abandon,
}

impl WizardAction {
    pub fn name(&self) -> &'static str {
        match self {
            WizardAction::Start => "start",
            WizardAction::Back => "back",
            WizardAction::Next => "next",
            WizardAction::EnterLabsManually => "enter labs manually",
            WizardAction::BeginExtraction => "begin extraction",
            WizardAction::ApplyExtraction { .. } => "apply extraction",
            WizardAction::ExtractionFailed { .. } => "extraction failed",
            WizardAction::EditSection(_) => "edit section",
            WizardAction::Edit(_) => "edit",
            WizardAction::AnalysisFinished { .. } => "analysis finished",
            WizardAction::RetryAnalysis => "retry analysis",
            WizardAction::Abandon => "abandon",
        }
    }
}

/// Work the host performs after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Leave the wizard without finishing.
    Exit,
    /// The report was acknowledged; the assessment is finished.
    Complete,
    StartAnalysis {
        ticket: Ticket,
        data: Arc<AssessmentData>,
    },
    CancelAnalysis { ticket: Ticket },
    StartExtraction { ticket: Ticket },
    CancelExtraction { ticket: Ticket },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WizardState,
    pub effects: Vec<Effect>,
    /// The action was a completion nobody is waiting for any more.
    pub stale: bool,
}

impl Transition {
    fn to(state: WizardState) -> Self {
        Self {
            state,
            effects: Vec::new(),
            stale: false,
        }
    }

    fn with(state: WizardState, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
            stale: false,
        }
    }

    fn ignored(state: &WizardState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
            stale: true,
        }
    }
}

fn moved(state: &WizardState, step: WizardStep) -> WizardState {
    WizardState {
        step,
        ..state.clone()
    }
}

fn not_available(action: &WizardAction, state: &WizardState) -> WizardError {
    WizardError::ActionNotAvailable {
        action: action.name(),
        step: state.step,
    }
}

fn busy(state: &WizardState) -> Result<(), WizardError> {
    match state.pending {
        Some(pending) => Err(WizardError::Busy {
            pending: pending.name(),
        }),
        None => Ok(()),
    }
}

pub fn reduce(state: &WizardState, action: WizardAction) -> Result<Transition, WizardError> {
    match &action {
        WizardAction::Start => match state.step {
            WizardStep::Intro => Ok(Transition::to(moved(
                state,
                WizardStep::Section(Section::Demographics),
            ))),
            _ => Err(not_available(&action, state)),
        },
        WizardAction::Back => Ok(back(state)),
        WizardAction::Next => next(state, &action),
        WizardAction::EnterLabsManually => {
            if state.step != WizardStep::LabMethod {
                return Err(not_available(&action, state));
            }
            busy(state)?;
            Ok(Transition::to(moved(
                state,
                WizardStep::LabPanel(LabPanel::Glucose),
            )))
        }
        WizardAction::BeginExtraction => {
            if state.step != WizardStep::LabMethod {
                return Err(not_available(&action, state));
            }
            busy(state)?;
            let mut next = state.clone();
            let ticket = next.issue_ticket();
            next.pending = Some(PendingCall::Extraction { ticket });
            next.failure = None;
            Ok(Transition::with(next, Effect::StartExtraction { ticket }))
        }
        WizardAction::ApplyExtraction { ticket, values } => {
            if state.pending != Some(PendingCall::Extraction { ticket: *ticket })
                || state.step != WizardStep::LabMethod
            {
                return Ok(Transition::ignored(state));
            }
            Ok(Transition::to(WizardState {
                step: WizardStep::LabReview,
                data: Arc::new(state.data.with_measurements(values.iter().cloned())),
                pending: None,
                ..state.clone()
            }))
        }
        WizardAction::ExtractionFailed { ticket, message } => {
            if state.pending != Some(PendingCall::Extraction { ticket: *ticket }) {
                return Ok(Transition::ignored(state));
            }
            Ok(Transition::to(WizardState {
                pending: None,
                failure: Some(message.clone()),
                ..state.clone()
            }))
        }
        WizardAction::EditSection(section) => match (state.step, section) {
            (WizardStep::Section(Section::Review), s) if *s != Section::Review => {
                Ok(Transition::to(moved(state, WizardStep::Section(*s))))
            }
            _ => Err(not_available(&action, state)),
        },
        WizardAction::Edit(edit) => {
            if !registry::content(state.step).accepts(edit) {
                return Err(WizardError::FieldNotOnStep {
                    edit: format!("{edit:?}"),
                    step: state.step,
                });
            }
            Ok(Transition::to(WizardState {
                data: Arc::new(state.data.apply(edit)),
                ..state.clone()
            }))
        }
        WizardAction::AnalysisFinished { ticket, outcome } => {
            if state.pending != Some(PendingCall::Analysis { ticket: *ticket })
                || state.step != WizardStep::Analyzing
            {
                return Ok(Transition::ignored(state));
            }
            let settled = WizardState {
                pending: None,
                ..state.clone()
            };
            Ok(Transition::to(match outcome {
                AnalysisOutcome::Completed(result) => WizardState {
                    step: WizardStep::Result(ResultStage::Overview),
                    analysis: result.clone().map(Arc::new),
                    failure: None,
                    ..settled
                },
                AnalysisOutcome::Failed(message) => WizardState {
                    failure: Some(message.clone()),
                    ..settled
                },
                AnalysisOutcome::Cancelled => settled,
            }))
        }
        WizardAction::RetryAnalysis => {
            if state.step != WizardStep::Analyzing {
                return Err(not_available(&action, state));
            }
            busy(state)?;
            Ok(start_analysis(state, WizardStep::Analyzing))
        }
        WizardAction::Abandon => {
            let mut effects: Vec<Effect> = state
                .pending
                .map(|pending| match pending {
                    PendingCall::Analysis { ticket } => Effect::CancelAnalysis { ticket },
                    PendingCall::Extraction { ticket } => Effect::CancelExtraction { ticket },
                })
                .into_iter()
                .collect();
            effects.push(Effect::Exit);
            Ok(Transition {
                state: WizardState {
                    next_ticket: state.next_ticket,
                    ..WizardState::default()
                },
                effects,
                stale: false,
            })
        }
    }
}

fn start_analysis(state: &WizardState, step: WizardStep) -> Transition {
    let mut next = moved(state, step);
    let ticket = next.issue_ticket();
    next.pending = Some(PendingCall::Analysis { ticket });
    next.failure = None;
    let data = Arc::clone(&next.data);
    Transition::with(next, Effect::StartAnalysis { ticket, data })
}

fn next(state: &WizardState, action: &WizardAction) -> Result<Transition, WizardError> {
    let target = match state.step {
        WizardStep::Intro => WizardStep::Section(Section::Demographics),
        WizardStep::Section(Section::Review) => WizardStep::LabMethod,
        WizardStep::Section(s) => s.next().map_or(WizardStep::LabMethod, WizardStep::Section),
        WizardStep::LabMethod => {
            busy(state)?;
            WizardStep::LabPanel(LabPanel::Glucose)
        }
        WizardStep::LabPanel(p) => p.next().map_or(WizardStep::LabReview, WizardStep::LabPanel),
        WizardStep::LabReview => return Ok(start_analysis(state, WizardStep::Analyzing)),
        WizardStep::Analyzing => {
            busy(state)?;
            return Err(not_available(action, state));
        }
        WizardStep::Result(r) => r.next().map_or(WizardStep::Report, WizardStep::Result),
        WizardStep::Report => return Ok(Transition::with(state.clone(), Effect::Complete)),
    };
    Ok(Transition::to(moved(state, target)))
}

fn back(state: &WizardState) -> Transition {
    let target = match state.step {
        WizardStep::Intro | WizardStep::Section(Section::Demographics) => {
            return Transition::with(state.clone(), Effect::Exit);
        }
        WizardStep::Section(s) => s.previous().map_or(WizardStep::Intro, WizardStep::Section),
        WizardStep::LabMethod => WizardStep::Section(Section::Review),
        WizardStep::LabPanel(LabPanel::Glucose) | WizardStep::LabReview => WizardStep::LabMethod,
        WizardStep::LabPanel(p) => p.previous().map_or(WizardStep::LabMethod, WizardStep::LabPanel),
        WizardStep::Analyzing => WizardStep::LabReview,
        WizardStep::Result(ResultStage::Overview) => WizardStep::LabReview,
        WizardStep::Result(r) => r.previous().map_or(WizardStep::LabReview, WizardStep::Result),
        WizardStep::Report => WizardStep::Result(ResultStage::Plan),
    };

    let mut next = moved(state, target);
    let effects = match next.pending.take() {
        Some(PendingCall::Analysis { ticket }) => vec![Effect::CancelAnalysis { ticket }],
        Some(PendingCall::Extraction { ticket }) => vec![Effect::CancelExtraction { ticket }],
        None => Vec::new(),
    };
    next.failure = None;
    Transition {
        state: next,
        effects,
        stale: false,
    }
}
