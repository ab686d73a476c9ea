use std::time::Duration;

use ureq::Agent;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One HTTP exchange, already resolved to an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    /// JSON body for POST requests.
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests. Non-2xx statuses are responses, not errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// [`Transport`] over a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let bearer = request.bearer.as_ref().map(|t| format!("Bearer {t}"));

        let mut response = match request.method {
            Method::Get => {
                let mut req = self.agent.get(&request.url).header("Accept", "application/json");
                if let Some(auth) = &bearer {
                    req = req.header("Authorization", auth);
                }
                req.call()?
            }
            Method::Post => {
                let mut req = self
                    .agent
                    .post(&request.url)
                    .header("Accept", "application/json")
                    .header("Content-Type", "application/json");
                if let Some(auth) = &bearer {
                    req = req.header("Authorization", auth);
                }
                req.send(request.body.as_deref().unwrap_or("{}"))?
            }
        };

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        Ok(ApiResponse { status, body })
    }
}
