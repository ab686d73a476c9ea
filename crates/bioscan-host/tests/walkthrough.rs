use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bioscan_client::client::ApiClient;
use bioscan_client::error::ClientError;
use bioscan_client::transport::{ApiRequest, ApiResponse, Transport};
use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::screening::TokenPair;
use bioscan_export::share::SharePayload;
use bioscan_host::output::write_payload;
use bioscan_host::remote::RemoteAnalysis;
use bioscan_host::walkthrough;
use bioscan_wizard::analyzing::Timeline;
use bioscan_wizard::error::WizardError;
use bioscan_wizard::ports::{AnalysisPort, SimulatedAnalysis};
use bioscan_wizard::session::WizardSession;
use bioscan_wizard::step::WizardStep;

fn quick() -> Timeline {
    Timeline {
        tick: Duration::from_millis(1),
        increment: 0.11,
        phase_share: 0.33,
        pause: Duration::from_millis(2),
    }
}

/// Replays scripted statuses and bodies.
struct Scripted(Mutex<VecDeque<(u16, &'static str)>>);

impl Scripted {
    fn new(responses: Vec<(u16, &'static str)>) -> Self {
        Self(Mutex::new(responses.into()))
    }
}

impl Transport for Scripted {
    fn send(&self, _request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let (status, body) = self
            .0
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Transport("connection refused".into()))?;
        Ok(ApiResponse {
            status,
            body: body.to_string(),
        })
    }
}

fn remote(responses: Vec<(u16, &'static str)>) -> RemoteAnalysis<Scripted> {
    let client = ApiClient::with_transport("https://bioscan.test", Scripted::new(responses)).unwrap();
    client.set_tokens(Some(TokenPair {
        access: "a".into(),
        refresh: None,
    }));
    RemoteAnalysis::new(Arc::new(client))
}

#[tokio::test]
async fn walkthrough_visits_every_screen_once() {
    let mut session = WizardSession::new(AssessmentData::sample())
        .with_timeline(quick())
        .with_analysis(Arc::new(SimulatedAnalysis));

    let completed = walkthrough::run(&mut session).await.unwrap();

    assert_eq!(completed.visited.len(), 27);
    assert_eq!(completed.visited.first(), Some(&WizardStep::Intro));
    assert_eq!(completed.visited.last(), Some(&WizardStep::Report));
    assert!(completed.visited.contains(&WizardStep::Analyzing));
    assert_eq!(completed.analysis.unwrap().metabolic_score, 48);
    assert_eq!(*completed.data, AssessmentData::sample());
}

#[tokio::test]
async fn remote_analysis_submits_through_the_client() {
    let port = remote(vec![
        (
            201,
            r#"{"id": 3, "patient": 1, "doctor": null, "status": "pending", "created_at": "2026-03-01T09:30:00Z"}"#,
        ),
        (201, r#"{"id": 4, "screening": 3, "glucose_fasting": 108.0}"#),
        (200, r#"{"metabolic_score": 71, "insights": ["High triglycerides."]}"#),
    ]);

    let result = port
        .analyze(Arc::new(AssessmentData::sample()))
        .await
        .unwrap();
    assert_eq!(result.metabolic_score, 71);
}

#[tokio::test]
async fn remote_failure_becomes_a_collaborator_error() {
    let port = remote(vec![(503, r#"{"detail": "maintenance"}"#)]);

    let err = port
        .analyze(Arc::new(AssessmentData::sample()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        WizardError::Collaborator {
            collaborator: "analysis",
            message: "API returned 503: maintenance".into(),
        }
    );
}

#[tokio::test]
async fn walkthrough_stops_when_the_remote_analysis_fails() {
    let mut session = WizardSession::new(AssessmentData::sample())
        .with_timeline(quick())
        .with_analysis(Arc::new(remote(Vec::new())));

    let err = walkthrough::run(&mut session).await.unwrap_err();
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(session.store().step(), WizardStep::Analyzing);
}

#[test]
fn payload_is_written_under_its_file_name() {
    let dir = std::env::temp_dir().join(format!("bioscan-host-{}-output", std::process::id()));
    let payload = SharePayload {
        subject: "BioScan AI Medical Report",
        file_name: "BioScan_Report.docx",
        mime_type: "application/octet-stream",
        body: b"PK\x03\x04".to_vec(),
    };

    let path = write_payload(&dir, &payload).unwrap();
    assert_eq!(path, dir.join("BioScan_Report.docx"));
    assert_eq!(std::fs::read(&path).unwrap(), payload.body);

    std::fs::remove_dir_all(&dir).unwrap();
}
