//! Smoke test against a running screening API.
//!
//! Logs in, submits the sample assessment as a screening, runs the remote
//! analysis and prints what came back.
//!
//! Usage:
//!   BIOSCAN_API_URL=http://127.0.0.1:8000 \
//!   BIOSCAN_USERNAME=doctor1 \
//!   BIOSCAN_PASSWORD=... \
//!   cargo run -p bioscan-host --example remote_smoke

use bioscan_client::client::{ApiClient, DEFAULT_TIMEOUT};
use bioscan_client::flows::submit_assessment;
use bioscan_core::models::assessment::AssessmentData;
use bioscan_host::config::{self, HostConfig};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().with_env_filter("info").init();

    let (config, credentials) = config::apply_env(HostConfig::default());
    let credentials = credentials.ok_or_else(|| {
        eyre::eyre!(
            "set {} and {} env vars",
            config::ENV_USERNAME,
            config::ENV_PASSWORD
        )
    })?;

    println!("API:  {}", config.api_url);
    println!("User: {}", credentials.username);
    println!();

    let client = ApiClient::new(&config.api_url, DEFAULT_TIMEOUT)?;
    client.login(&credentials.username, &credentials.password)?;

    let me = client.me()?;
    println!("Logged in as {} ({:?})", me.username, me.role);
    if let Some(profile) = client.doctor_profile()? {
        println!("  Hospital: {}", profile.hospital_name);
    }

    let existing = client.screenings()?;
    println!("  Existing screenings: {}", existing.len());
    println!();

    println!("Submitting sample assessment...");
    let result = submit_assessment(&client, &AssessmentData::sample())?;
    println!(
        "  Score: {} ({} risk)",
        result.metabolic_score,
        result.effective_risk_level().label()
    );
    for insight in &result.insights {
        println!("  - {insight}");
    }

    client.logout();
    Ok(())
}
