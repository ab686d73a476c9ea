use tracing::info;

use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::screening::{AnalysisResult, BiomarkerPanel, NewScreening};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::transport::Transport;

/// Validate a completed assessment, file it as a screening with its
/// biomarker panel, and run the remote analysis on it.
///
/// Validation happens before any request goes out.
pub fn submit_assessment<T: Transport>(
    client: &ApiClient<T>,
    data: &AssessmentData,
) -> Result<AnalysisResult, ClientError> {
    let validated = data.validate()?;

    let screening = client.create_screening(&NewScreening::from_assessment(&validated))?;
    let panel = BiomarkerPanel::from_assessment(&validated);
    client.add_biomarkers(screening.id, &panel)?;
    info!(
        screening = screening.id,
        values = validated.values.len(),
        "biomarkers uploaded"
    );

    client.run_analysis(screening.id)
}
