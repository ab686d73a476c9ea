//! Async driver around a [`WizardStore`].
//!
//! The session turns reducer effects into running tasks (the analysis
//! sequence and extraction calls) and feeds their completions back through
//! the same store, so the reducer stays the only place state changes.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use bioscan_core::models::assessment::AssessmentData;

use crate::analyzing::{self, AnalysisCanceller, AnalysisOutcome, AnalysisProgress, Timeline};
use crate::error::WizardError;
use crate::flow::{Effect, Ticket, WizardAction};
use crate::ports::{AnalysisPort, ExtractionPort, MockExtraction};
use crate::store::{Dispatch, WizardStore};

pub struct WizardSession {
    store: WizardStore,
    timeline: Timeline,
    analysis: Option<Arc<dyn AnalysisPort>>,
    extraction: Arc<dyn ExtractionPort>,
    completions_tx: mpsc::UnboundedSender<WizardAction>,
    completions_rx: mpsc::UnboundedReceiver<WizardAction>,
    running_analysis: HashMap<Ticket, AnalysisCanceller>,
    running_extraction: HashMap<Ticket, JoinHandle<()>>,
    progress: Option<watch::Receiver<AnalysisProgress>>,
}

impl WizardSession {
    /// A session with the timed sequence only and the demo extraction.
    pub fn new(data: AssessmentData) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            store: WizardStore::new(data),
            timeline: Timeline::default(),
            analysis: None,
            extraction: Arc::new(MockExtraction::default()),
            completions_tx,
            completions_rx,
            running_analysis: HashMap::new(),
            running_extraction: HashMap::new(),
            progress: None,
        }
    }

    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = timeline;
        self
    }

    /// Run `port` behind the analysis sequence.
    pub fn with_analysis(mut self, port: Arc<dyn AnalysisPort>) -> Self {
        self.analysis = Some(port);
        self
    }

    pub fn with_extraction(mut self, port: Arc<dyn ExtractionPort>) -> Self {
        self.extraction = port;
        self
    }

    pub fn store(&self) -> &WizardStore {
        &self.store
    }

    /// Progress of the analysis sequence currently running, if any.
    pub fn progress(&self) -> Option<watch::Receiver<AnalysisProgress>> {
        self.progress.clone()
    }

    /// Apply a user action and start or stop whatever it asks for.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: WizardAction) -> Result<Dispatch, WizardError> {
        let dispatch = self.store.dispatch(action)?;
        self.run_effects(&dispatch.effects);
        Ok(dispatch)
    }

    /// Wait for the next task completion and apply it.
    pub async fn next_event(&mut self) -> Result<Dispatch, WizardError> {
        let action = self
            .completions_rx
            .recv()
            .await
            .ok_or(WizardError::SessionClosed)?;
        self.forget(&action);
        self.dispatch(action)
    }

    /// Start over with a blank assessment, stopping anything in flight.
    pub fn reset(&mut self) {
        let effects = self.store.reset();
        self.run_effects(&effects);
    }

    fn forget(&mut self, action: &WizardAction) {
        match action {
            WizardAction::AnalysisFinished { ticket, .. } => {
                // Completions of cancelled runs were already removed.
                if self.running_analysis.remove(ticket).is_some() {
                    self.progress = None;
                }
            }
            WizardAction::ApplyExtraction { ticket, .. }
            | WizardAction::ExtractionFailed { ticket, .. } => {
                self.running_extraction.remove(ticket);
            }
            _ => {}
        }
    }

    fn run_effects(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::StartAnalysis { ticket, data } => self.start_analysis(*ticket, data),
                Effect::CancelAnalysis { ticket } => {
                    if let Some(canceller) = self.running_analysis.remove(ticket) {
                        canceller.cancel();
                    }
                    self.progress = None;
                }
                Effect::StartExtraction { ticket } => self.start_extraction(*ticket),
                Effect::CancelExtraction { ticket } => {
                    if let Some(task) = self.running_extraction.remove(ticket) {
                        task.abort();
                    }
                }
                // Leaving or finishing is the host's business.
                Effect::Exit | Effect::Complete => {}
            }
        }
    }

    fn start_analysis(&mut self, ticket: Ticket, data: &Arc<AssessmentData>) {
        let backing = self
            .analysis
            .as_ref()
            .map(|port| port.analyze(Arc::clone(data)));
        let mut handle = analyzing::start(self.timeline, backing);

        self.progress = Some(handle.progress());
        self.running_analysis.insert(ticket, handle.canceller());

        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = handle.outcome().await;
            if let AnalysisOutcome::Failed(message) = &outcome {
                tracing::error!(ticket, error = %message, "analysis failed");
            }
            // The receiver only goes away with the session.
            let _ = tx.send(WizardAction::AnalysisFinished { ticket, outcome });
        });
    }

    fn start_extraction(&mut self, ticket: Ticket) {
        let call = self.extraction.extract();
        let tx = self.completions_tx.clone();
        let task = tokio::spawn(async move {
            let action = match call.await {
                Ok(values) => {
                    tracing::info!(ticket, fields = values.len(), "extraction finished");
                    WizardAction::ApplyExtraction { ticket, values }
                }
                Err(e) => WizardAction::ExtractionFailed {
                    ticket,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(action);
        });
        self.running_extraction.insert(ticket, task);
    }
}

impl Drop for WizardSession {
    fn drop(&mut self) {
        for canceller in self.running_analysis.values() {
            canceller.cancel();
        }
        for task in self.running_extraction.values() {
            task.abort();
        }
    }
}
