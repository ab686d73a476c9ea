//! Scripted pass through the whole wizard, the way a user taps "next" on
//! every screen.

use std::sync::Arc;

use tracing::info;

use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::screening::AnalysisResult;
use bioscan_wizard::flow::{Effect, WizardAction};
use bioscan_wizard::session::WizardSession;
use bioscan_wizard::step::WizardStep;

/// What a finished walkthrough leaves behind.
#[derive(Debug, Clone)]
pub struct Completed {
    pub data: Arc<AssessmentData>,
    pub analysis: Option<Arc<AnalysisResult>>,
    /// Steps visited, in order.
    pub visited: Vec<WizardStep>,
}

/// Drive `session` from the intro to the report's completion, entering labs
/// manually and waiting out the analyzing step.
pub async fn run(session: &mut WizardSession) -> eyre::Result<Completed> {
    let mut visited = vec![session.store().step()];

    session.dispatch(WizardAction::Start)?;
    record(session.store().step(), &mut visited);

    loop {
        let step = session.store().step();
        let dispatch = match step {
            WizardStep::LabMethod => session.dispatch(WizardAction::EnterLabsManually)?,
            WizardStep::Analyzing => {
                let event = session.next_event().await?;
                if let Some(failure) = &session.store().state().failure {
                    return Err(eyre::eyre!("analysis failed: {failure}"));
                }
                event
            }
            _ => session.dispatch(WizardAction::Next)?,
        };
        record(dispatch.to, &mut visited);

        if dispatch.effects.contains(&Effect::Complete) {
            break;
        }
        if dispatch.effects.contains(&Effect::Exit) {
            return Err(eyre::eyre!("wizard exited at {step}"));
        }
    }

    info!(steps = visited.len(), "walkthrough complete");
    Ok(Completed {
        data: session.store().snapshot(),
        analysis: session.store().analysis(),
        visited,
    })
}

fn record(step: WizardStep, visited: &mut Vec<WizardStep>) {
    if visited.last() != Some(&step) {
        visited.push(step);
    }
}
