use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use bioscan_client::client::ApiClient;
use bioscan_client::error::ClientError;
use bioscan_client::flows::submit_assessment;
use bioscan_client::transport::{Transport, UreqTransport};
use bioscan_core::models::assessment::AssessmentData;
use bioscan_core::models::screening::AnalysisResult;
use bioscan_wizard::error::WizardError;
use bioscan_wizard::ports::AnalysisPort;

/// Analysis backed by the screening API.
///
/// The client is blocking, so each submission runs on the blocking pool.
pub struct RemoteAnalysis<T: Transport + 'static = UreqTransport> {
    client: Arc<ApiClient<T>>,
}

impl<T: Transport + 'static> RemoteAnalysis<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }
}

impl<T: Transport + 'static> AnalysisPort for RemoteAnalysis<T> {
    fn analyze(
        &self,
        data: Arc<AssessmentData>,
    ) -> BoxFuture<'static, Result<AnalysisResult, WizardError>> {
        let client = Arc::clone(&self.client);
        async move {
            let joined =
                tokio::task::spawn_blocking(move || submit_assessment(&client, &data)).await;
            match joined {
                Ok(Ok(result)) => Ok(result),
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "remote analysis failed");
                    Err(collaborator_error(&e))
                }
                Err(e) => Err(WizardError::Collaborator {
                    collaborator: "analysis",
                    message: e.to_string(),
                }),
            }
        }
        .boxed()
    }
}

fn collaborator_error(e: &ClientError) -> WizardError {
    WizardError::Collaborator {
        collaborator: "analysis",
        message: e.to_string(),
    }
}
