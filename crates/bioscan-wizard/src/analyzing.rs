//! The timed analysis sequence shown on the analyzing step.
//!
//! Three phases animate a progress bar in small ticks, each followed by a
//! pause. An optional backing analysis future runs alongside; if it fails
//! the animation stops at once. Cancellation is observed at every wait, and
//! always checked before a phase starts and before completion is reported.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use bioscan_core::models::screening::AnalysisResult;

use crate::error::WizardError;

pub const PHASES: [&str; 3] = [
    "Identifying data patterns...",
    "Calculating risk scores...",
    "Generating personalized insights...",
];

/// Pacing of the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    pub tick: Duration,
    /// Progress added per tick.
    pub increment: f32,
    /// Share of the bar each phase fills.
    pub phase_share: f32,
    /// Wait after a phase's bar is filled.
    pub pause: Duration,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(30),
            increment: 0.02,
            phase_share: 0.33,
            pause: Duration::from_secs(1),
        }
    }
}

/// Smallest per-tick increment accepted. Anything finer risks being
/// absorbed by float rounding before the bar fills.
pub const MIN_INCREMENT: f32 = 0.001;

impl Timeline {
    /// Check that every phase can fill its share of the bar in a bounded
    /// number of ticks and that the three shares fit in one bar.
    pub fn validate(&self) -> Result<(), WizardError> {
        if !self.increment.is_finite() || !(MIN_INCREMENT..=1.0).contains(&self.increment) {
            return Err(WizardError::InvalidTimeline(format!(
                "increment {} must be between {MIN_INCREMENT} and 1",
                self.increment
            )));
        }
        let max_share = 1.0 / PHASES.len() as f32;
        if !self.phase_share.is_finite()
            || self.phase_share <= 0.0
            || self.phase_share > max_share + f32::EPSILON
        {
            return Err(WizardError::InvalidTimeline(format!(
                "phase_share {} must be above 0 and at most {max_share:.4}",
                self.phase_share
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisProgress {
    /// 1-based phase number.
    pub phase: u8,
    pub label: &'static str,
    pub fraction: f32,
}

impl AnalysisProgress {
    fn start() -> Self {
        Self {
            phase: 1,
            label: PHASES[0],
            fraction: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// All phases ran. Carries the backing result when there was one.
    Completed(Option<AnalysisResult>),
    Cancelled,
    /// The backing analysis failed; the sequence stopped where it was.
    Failed(String),
}

pub type BackingAnalysis = BoxFuture<'static, Result<AnalysisResult, WizardError>>;

/// Cancels a running sequence from anywhere.
#[derive(Debug, Clone)]
pub struct AnalysisCanceller(std::sync::Arc<watch::Sender<bool>>);

impl AnalysisCanceller {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

/// A running sequence. Dropping the handle cancels it.
#[derive(Debug)]
pub struct AnalysisHandle {
    progress: watch::Receiver<AnalysisProgress>,
    cancel: AnalysisCanceller,
    task: JoinHandle<AnalysisOutcome>,
}

impl AnalysisHandle {
    pub fn progress(&self) -> watch::Receiver<AnalysisProgress> {
        self.progress.clone()
    }

    pub fn canceller(&self) -> AnalysisCanceller {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the sequence to finish.
    pub async fn outcome(&mut self) -> AnalysisOutcome {
        match (&mut self.task).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => AnalysisOutcome::Cancelled,
            Err(e) => AnalysisOutcome::Failed(e.to_string()),
        }
    }
}

impl Drop for AnalysisHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawn the sequence on the current tokio runtime. A timeline that fails
/// [`Timeline::validate`] is replaced by the default one.
pub fn start(timeline: Timeline, backing: Option<BackingAnalysis>) -> AnalysisHandle {
    let timeline = match timeline.validate() {
        Ok(()) => timeline,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to the default analysis timeline");
            Timeline::default()
        }
    };
    let (progress_tx, progress_rx) = watch::channel(AnalysisProgress::start());
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let runner = Runner {
        timeline,
        progress: progress_tx,
        cancel: cancel_rx,
        backing: backing.map(tokio::spawn),
        result: None,
    };

    AnalysisHandle {
        progress: progress_rx,
        cancel: AnalysisCanceller(std::sync::Arc::new(cancel_tx)),
        task: tokio::spawn(runner.run()),
    }
}

enum Wake {
    Elapsed,
    Cancelled,
    Failed(String),
}

struct Runner {
    timeline: Timeline,
    progress: watch::Sender<AnalysisProgress>,
    cancel: watch::Receiver<bool>,
    backing: Option<JoinHandle<Result<AnalysisResult, WizardError>>>,
    result: Option<AnalysisResult>,
}

impl Runner {
    async fn run(mut self) -> AnalysisOutcome {
        let outcome = self.animate().await;
        if let Some(backing) = self.backing.take() {
            backing.abort();
        }
        outcome
    }

    async fn animate(&mut self) -> AnalysisOutcome {
        let mut fraction = 0.0_f32;

        for (index, label) in PHASES.iter().enumerate() {
            if self.cancelled() {
                return AnalysisOutcome::Cancelled;
            }
            let phase = index as u8 + 1;
            let target = f32::from(phase) * self.timeline.phase_share;

            while fraction < target {
                if let Some(outcome) = self.wait(self.timeline.tick).await {
                    return outcome;
                }
                fraction = (fraction + self.timeline.increment).min(target);
                self.progress.send_replace(AnalysisProgress {
                    phase,
                    label,
                    fraction,
                });
            }

            if let Some(outcome) = self.wait(self.timeline.pause).await {
                return outcome;
            }
        }

        if self.cancelled() {
            return AnalysisOutcome::Cancelled;
        }

        // The animation is done but the backing call may still be running.
        if self.backing.is_some() {
            match self.sleep(None).await {
                Wake::Elapsed => {}
                Wake::Cancelled => return AnalysisOutcome::Cancelled,
                Wake::Failed(message) => return AnalysisOutcome::Failed(message),
            }
        }
        if self.cancelled() {
            return AnalysisOutcome::Cancelled;
        }

        AnalysisOutcome::Completed(self.result.take())
    }

    fn cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Sleep for `duration`, returning early with an outcome on cancellation
    /// or backing failure. A backing success is stored and the sleep goes on.
    async fn wait(&mut self, duration: Duration) -> Option<AnalysisOutcome> {
        match self.sleep(Some(duration)).await {
            Wake::Elapsed => None,
            Wake::Cancelled => Some(AnalysisOutcome::Cancelled),
            Wake::Failed(message) => Some(AnalysisOutcome::Failed(message)),
        }
    }

    /// With no duration, waits only for the backing call to settle.
    async fn sleep(&mut self, duration: Option<Duration>) -> Wake {
        let sleep = async {
            match duration {
                Some(d) => tokio::time::sleep(d).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(sleep);

        loop {
            let backing_pending = self.backing.is_some();
            let backing = &mut self.backing;
            let cancel = &mut self.cancel;
            tokio::select! {
                _ = &mut sleep => return Wake::Elapsed,
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        return Wake::Cancelled;
                    }
                }
                joined = async {
                    match backing.as_mut() {
                        Some(handle) => handle.await,
                        None => std::future::pending().await,
                    }
                }, if backing_pending => {
                    *backing = None;
                    match joined {
                        Ok(Ok(result)) => {
                            tracing::debug!(score = result.metabolic_score, "backing analysis finished");
                            self.result = Some(result);
                            if duration.is_none() {
                                return Wake::Elapsed;
                            }
                        }
                        Ok(Err(e)) => return Wake::Failed(e.to_string()),
                        Err(e) => return Wake::Failed(e.to_string()),
                    }
                }
            }
        }
    }
}
