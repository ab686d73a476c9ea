use std::sync::Arc;

use uuid::Uuid;

use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::screening::AnalysisResult;

use crate::error::WizardError;
use crate::flow::{self, Effect, WizardAction, WizardState};
use crate::registry::{self, StepDescriptor};
use crate::step::{WizardPosition, WizardStep};

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub from: WizardStep,
    pub to: WizardStep,
    pub effects: Vec<Effect>,
    /// A completion arrived for a call nobody waits on; nothing changed.
    pub stale: bool,
}

/// The single state container for one wizard.
///
/// Every change goes through [`WizardStore::dispatch`]; the reducer output
/// replaces the state wholesale, so previously handed-out snapshots never
/// change underneath their holders.
#[derive(Debug)]
pub struct WizardStore {
    id: Uuid,
    state: WizardState,
}

impl Default for WizardStore {
    fn default() -> Self {
        Self::new(AssessmentData::default())
    }
}

impl WizardStore {
    pub fn new(data: AssessmentData) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(wizard = %id, "assessment started");
        Self {
            id,
            state: WizardState::new(data),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn position(&self) -> WizardPosition {
        self.state.step.position()
    }

    /// The current assessment. Later edits produce new values and leave this
    /// one as it is.
    pub fn snapshot(&self) -> Arc<AssessmentData> {
        Arc::clone(&self.state.data)
    }

    pub fn analysis(&self) -> Option<Arc<AnalysisResult>> {
        self.state.analysis.clone()
    }

    pub fn describe(&self) -> StepDescriptor {
        registry::describe(self.state.step)
    }

    pub fn dispatch(&mut self, action: WizardAction) -> Result<Dispatch, WizardError> {
        let from = self.state.step;
        let name = action.name();

        let transition = match flow::reduce(&self.state, action) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(wizard = %self.id, action = name, step = %from, error = %e, "action rejected");
                return Err(e);
            }
        };

        if transition.stale {
            tracing::warn!(wizard = %self.id, action = name, step = %from, "stale completion ignored");
        } else {
            tracing::debug!(
                wizard = %self.id,
                action = name,
                from = %from,
                to = %transition.state.step,
                effects = transition.effects.len(),
                "wizard transition"
            );
        }

        for effect in &transition.effects {
            match effect {
                Effect::Exit => tracing::info!(wizard = %self.id, step = %from, "assessment exited"),
                Effect::Complete => tracing::info!(wizard = %self.id, "assessment completed"),
                Effect::StartAnalysis { ticket, .. } => {
                    tracing::info!(wizard = %self.id, ticket, "analysis requested")
                }
                Effect::StartExtraction { ticket } => {
                    tracing::info!(wizard = %self.id, ticket, "extraction requested")
                }
                Effect::CancelAnalysis { ticket } | Effect::CancelExtraction { ticket } => {
                    tracing::debug!(wizard = %self.id, ticket, "pending call cancelled")
                }
            }
        }

        if let Some(failure) = &transition.state.failure
            && self.state.failure.as_ref() != Some(failure)
        {
            tracing::error!(wizard = %self.id, step = %transition.state.step, error = %failure, "collaborator call failed");
        }

        self.state = transition.state;
        Ok(Dispatch {
            from,
            to: self.state.step,
            effects: transition.effects,
            stale: transition.stale,
        })
    }

    /// Throw the current assessment away and start a blank one at the intro.
    ///
    /// Returns the cancellations for any call still in flight.
    pub fn reset(&mut self) -> Vec<Effect> {
        let effects = match self.dispatch(WizardAction::Abandon) {
            Ok(dispatch) => dispatch
                .effects
                .into_iter()
                .filter(|e| *e != Effect::Exit)
                .collect(),
            Err(_) => Vec::new(),
        };
        self.id = Uuid::new_v4();
        tracing::info!(wizard = %self.id, "assessment started");
        effects
    }
}
