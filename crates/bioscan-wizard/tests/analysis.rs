use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::screening::{AnalysisResult, RiskLevel};
use bioscan_wizard::analyzing::{self, AnalysisOutcome, Timeline, PHASES};
use bioscan_wizard::error::WizardError;
use bioscan_wizard::flow::WizardAction;
use bioscan_wizard::ports::{AnalysisPort, MockExtraction, SimulatedAnalysis};
use bioscan_wizard::session::WizardSession;
use bioscan_wizard::step::{ResultStage, WizardPosition, WizardStep};

fn quick() -> Timeline {
    Timeline {
        tick: Duration::from_millis(1),
        increment: 0.11,
        phase_share: 0.33,
        pause: Duration::from_millis(5),
    }
}

fn result(score: u8) -> AnalysisResult {
    AnalysisResult {
        id: Some(7),
        screening: Some(3),
        metabolic_score: score,
        risk_level: None,
        insights: vec!["Fasting glucose is elevated.".into()],
        diabetes_risk_1yr: None,
        diabetes_risk_5yr: None,
        heart_risk: None,
        fatty_liver_risk: None,
        syndrome_flags: Vec::new(),
        abnormal_markers: Vec::new(),
    }
}

struct Delayed {
    delay: Duration,
    outcome: Result<AnalysisResult, WizardError>,
}

impl AnalysisPort for Delayed {
    fn analyze(
        &self,
        _data: Arc<AssessmentData>,
    ) -> BoxFuture<'static, Result<AnalysisResult, WizardError>> {
        let delay = self.delay;
        let outcome = self.outcome.clone();
        async move {
            tokio::time::sleep(delay).await;
            outcome
        }
        .boxed()
    }
}

#[tokio::test]
async fn sequence_runs_all_three_phases() {
    let mut handle = analyzing::start(quick(), None);
    let progress = handle.progress();

    assert_eq!(handle.outcome().await, AnalysisOutcome::Completed(None));

    let last = *progress.borrow();
    assert_eq!(last.phase, 3);
    assert_eq!(last.label, PHASES[2]);
    assert!((last.fraction - 0.99).abs() < 1e-6);
}

#[test]
fn timelines_must_be_able_to_fill_the_bar() {
    assert_eq!(quick().validate(), Ok(()));
    assert_eq!(Timeline::default().validate(), Ok(()));

    for bad in [
        Timeline { increment: 0.0, ..quick() },
        Timeline { increment: -0.5, ..quick() },
        Timeline { increment: f32::NAN, ..quick() },
        Timeline { increment: 1e-9, ..quick() },
        Timeline { phase_share: 0.0, ..quick() },
        Timeline { phase_share: 0.4, ..quick() },
        Timeline { phase_share: f32::INFINITY, ..quick() },
    ] {
        assert!(
            matches!(bad.validate(), Err(WizardError::InvalidTimeline(_))),
            "{bad:?}"
        );
    }
}

#[tokio::test]
async fn stalled_timeline_falls_back_to_the_default() {
    let mut handle = analyzing::start(Timeline { increment: 0.0, ..quick() }, None);
    let mut progress = handle.progress();

    tokio::time::timeout(Duration::from_secs(2), progress.changed())
        .await
        .unwrap()
        .unwrap();
    let first = *progress.borrow();
    assert!((first.fraction - Timeline::default().increment).abs() < 1e-6);

    handle.cancel();
    assert_eq!(handle.outcome().await, AnalysisOutcome::Cancelled);
}

#[tokio::test]
async fn cancelled_sequence_reports_cancelled() {
    let timeline = Timeline {
        pause: Duration::from_secs(30),
        ..quick()
    };
    let mut handle = analyzing::start(timeline, None);
    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.cancel();

    let outcome = tokio::time::timeout(Duration::from_secs(2), handle.outcome())
        .await
        .unwrap();
    assert_eq!(outcome, AnalysisOutcome::Cancelled);
}

#[tokio::test]
async fn backing_failure_halts_the_sequence() {
    let timeline = Timeline {
        pause: Duration::from_secs(30),
        ..quick()
    };
    let backing = async {
        Err(WizardError::Collaborator {
            collaborator: "analysis",
            message: "502 Bad Gateway".into(),
        })
    }
    .boxed();
    let mut handle = analyzing::start(timeline, Some(backing));

    let outcome = tokio::time::timeout(Duration::from_secs(2), handle.outcome())
        .await
        .unwrap();
    assert_eq!(
        outcome,
        AnalysisOutcome::Failed("analysis call failed: 502 Bad Gateway".into())
    );
}

#[tokio::test]
async fn completion_waits_for_a_slow_backing_call() {
    let backing = async {
        tokio::time::sleep(Duration::from_millis(150)).await;
        Ok(result(72))
    }
    .boxed();
    let mut handle = analyzing::start(quick(), Some(backing));

    assert_eq!(
        handle.outcome().await,
        AnalysisOutcome::Completed(Some(result(72)))
    );
}

#[tokio::test]
async fn session_auto_advances_to_first_result() {
    let mut session = WizardSession::new(AssessmentData::sample()).with_timeline(quick());
    session.dispatch(WizardAction::Start).unwrap();
    while session.store().step() != WizardStep::LabMethod {
        session.dispatch(WizardAction::Next).unwrap();
    }
    session.dispatch(WizardAction::EnterLabsManually).unwrap();
    while session.store().step() != WizardStep::LabReview {
        session.dispatch(WizardAction::Next).unwrap();
    }

    session.dispatch(WizardAction::Next).unwrap();
    assert_eq!(session.store().position(), WizardPosition::new(9, 8));
    assert!(session.progress().is_some());

    let event = session.next_event().await.unwrap();
    assert_eq!(event.from, WizardStep::Analyzing);
    assert_eq!(event.to, WizardStep::Result(ResultStage::Overview));
    assert_eq!(session.store().position(), WizardPosition::new(10, 8));
    assert!(session.store().analysis().is_none());
    assert!(session.progress().is_none());
}

#[tokio::test]
async fn session_carries_the_backing_result() {
    let port = Arc::new(Delayed {
        delay: Duration::from_millis(10),
        outcome: Ok(result(65)),
    });
    let mut session = WizardSession::new(AssessmentData::sample())
        .with_timeline(quick())
        .with_analysis(port);
    drive_to_analysis(&mut session);

    session.next_event().await.unwrap();
    let analysis = session.store().analysis().unwrap();
    assert_eq!(analysis.metabolic_score, 65);
    assert_eq!(analysis.effective_risk_level(), RiskLevel::High);
}

#[tokio::test]
async fn session_surfaces_backing_failure_without_advancing() {
    let port = Arc::new(Delayed {
        delay: Duration::from_millis(1),
        outcome: Err(WizardError::Collaborator {
            collaborator: "analysis",
            message: "timed out".into(),
        }),
    });
    let mut session = WizardSession::new(AssessmentData::sample())
        .with_timeline(quick())
        .with_analysis(port);
    drive_to_analysis(&mut session);

    let event = session.next_event().await.unwrap();
    assert_eq!(event.to, WizardStep::Analyzing);
    assert!(session.store().state().failure.is_some());
    assert!(!session.store().state().is_busy());
    assert!(session.progress().is_none());
}

#[tokio::test]
async fn leaving_the_analysis_step_stops_the_timer() {
    let timeline = Timeline {
        pause: Duration::from_secs(30),
        ..quick()
    };
    let mut session = WizardSession::new(AssessmentData::sample()).with_timeline(timeline);
    drive_to_analysis(&mut session);

    session.dispatch(WizardAction::Back).unwrap();
    assert_eq!(session.store().step(), WizardStep::LabReview);

    let event = tokio::time::timeout(Duration::from_secs(2), session.next_event())
        .await
        .unwrap()
        .unwrap();
    assert!(event.stale);
    assert_eq!(session.store().step(), WizardStep::LabReview);
}

#[tokio::test]
async fn session_extraction_fills_review() {
    let mut session = WizardSession::new(AssessmentData::default())
        .with_extraction(Arc::new(MockExtraction {
            delay: Duration::from_millis(5),
        }));
    session.dispatch(WizardAction::Start).unwrap();
    while session.store().step() != WizardStep::LabMethod {
        session.dispatch(WizardAction::Next).unwrap();
    }

    session.dispatch(WizardAction::BeginExtraction).unwrap();
    let event = session.next_event().await.unwrap();

    assert_eq!(event.to, WizardStep::LabReview);
    assert_eq!(session.store().snapshot().hba1c.raw(), "5.9");
}

#[test]
fn simulated_analysis_flags_the_sample() {
    let result = SimulatedAnalysis::evaluate(&AssessmentData::sample());
    assert_eq!(
        result.abnormal_markers,
        vec!["Fasting Glucose", "LDL Cholesterol", "Triglycerides"]
    );
    assert_eq!(result.syndrome_flags, vec!["Fasting Glucose", "Triglycerides"]);
    assert_eq!(result.metabolic_score, 48);
    assert_eq!(result.risk_level, Some(RiskLevel::Moderate));
}

fn drive_to_analysis(session: &mut WizardSession) {
    session.dispatch(WizardAction::Start).unwrap();
    while session.store().step() != WizardStep::LabMethod {
        session.dispatch(WizardAction::Next).unwrap();
    }
    session.dispatch(WizardAction::EnterLabsManually).unwrap();
    while session.store().step() != WizardStep::Analyzing {
        session.dispatch(WizardAction::Next).unwrap();
    }
}
