use std::sync::Arc;

use eyre::Result;
use tracing::{info, warn};

use bioscan_client::client::ApiClient;
use bioscan_core::models::assessment::AssessmentData;
use bioscan_export::report::ReportContext;
use bioscan_export::share::share_payload;
use bioscan_export::styles::DocumentStyles;
use bioscan_host::config::{self, HostConfig};
use bioscan_host::remote::RemoteAnalysis;
use bioscan_host::{output, walkthrough};
use bioscan_wizard::ports::{AnalysisPort, SimulatedAnalysis};
use bioscan_wizard::session::WizardSession;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let stored = if config::has_config() {
        config::load_config()?
    } else {
        let fresh = HostConfig::default();
        config::save_config(&fresh)?;
        fresh
    };
    let (config, credentials) = config::apply_env(stored);
    info!(api_url = %config.api_url, "configuration loaded");

    let analysis: Arc<dyn AnalysisPort> = match credentials {
        Some(credentials) => {
            let client = Arc::new(ApiClient::new(&config.api_url, config.request_timeout())?);
            let login_client = Arc::clone(&client);
            tokio::task::spawn_blocking(move || {
                login_client.login(&credentials.username, &credentials.password)
            })
            .await??;
            Arc::new(RemoteAnalysis::new(client))
        }
        None => {
            warn!(
                "no {} / {} set, using the local simulated analysis",
                config::ENV_USERNAME,
                config::ENV_PASSWORD
            );
            Arc::new(SimulatedAnalysis)
        }
    };

    let mut session = WizardSession::new(AssessmentData::sample())
        .with_timeline(config.timeline.into())
        .with_analysis(analysis);
    info!(session = %session.store().id(), "wizard session started");

    let completed = walkthrough::run(&mut session).await?;

    let today = jiff::Zoned::now().date();
    let report = ReportContext::build(&completed.data, completed.analysis.as_deref(), today)
        .with_patient_ref(format!("#{}", &session.store().id().simple().to_string()[..8]));
    let payload = share_payload(&report, &DocumentStyles::default())?;
    let path = output::write_payload(&config.export_dir(), &payload)?;

    println!("{}", payload.subject);
    println!("  Steps visited: {}", completed.visited.len());
    if let Some(analysis) = &completed.analysis {
        println!(
            "  Metabolic score: {} ({} risk)",
            analysis.metabolic_score,
            analysis.effective_risk_level().label()
        );
    }
    println!("  Report: {}", path.display());

    Ok(())
}
