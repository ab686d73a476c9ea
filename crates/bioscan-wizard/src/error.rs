use thiserror::Error;

use crate::step::WizardStep;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("no step is registered at position ({step}, {sub_step})")]
    UnmappedPosition { step: u8, sub_step: u8 },

    #[error("{action} is not available on {step}")]
    ActionNotAvailable {
        action: &'static str,
        step: WizardStep,
    },

    #[error("a {pending} call is already in flight")]
    Busy { pending: &'static str },

    #[error("{edit} cannot be edited on {step}")]
    FieldNotOnStep { edit: String, step: WizardStep },

    #[error("{collaborator} call failed: {message}")]
    Collaborator {
        collaborator: &'static str,
        message: String,
    },

    #[error("invalid analysis timeline: {0}")]
    InvalidTimeline(String),

    #[error("session closed")]
    SessionClosed,
}
