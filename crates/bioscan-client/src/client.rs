use std::sync::Mutex;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bioscan_core::models::screening::{
    AnalysisResult, BiomarkerPanel, DoctorProfile, LoginRequest, NewScreening, PatientProfile,
    RegisterRequest, Screening, TokenPair, User,
};

use crate::error::ClientError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport, UreqTransport};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Client for the screening API rooted at `<base>/api/`.
///
/// Holds the session tokens. An authenticated call answered with 401 is
/// retried once after refreshing the access token.
pub struct ApiClient<T: Transport = UreqTransport> {
    api_root: String,
    transport: T,
    tokens: Mutex<Option<TokenPair>>,
}

impl ApiClient<UreqTransport> {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Self::with_transport(base_url, UreqTransport::new(timeout))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self, ClientError> {
        Ok(Self {
            api_root: api_root(base_url)?,
            transport,
            tokens: Mutex::new(None),
        })
    }

    /// Absolute URL of an endpoint path such as `screenings/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path.trim_start_matches('/'))
    }

    pub fn tokens(&self) -> Option<TokenPair> {
        self.lock_tokens().clone()
    }

    pub fn set_tokens(&self, tokens: Option<TokenPair>) {
        *self.lock_tokens() = tokens;
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_tokens().is_some()
    }

    pub fn logout(&self) {
        self.set_tokens(None);
        info!("logged out");
    }

    fn lock_tokens(&self) -> std::sync::MutexGuard<'_, Option<TokenPair>> {
        self.tokens.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ── Auth ─────────────────────────────────────────────────────────────

    pub fn login(&self, username: &str, password: &str) -> Result<TokenPair, ClientError> {
        info!(username, "logging in");
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.exchange(Method::Post, "auth/login/", None, Some(&body))?;
        if response.status == 401 || response.status == 400 {
            return Err(ClientError::AuthFailed(error_message(&response)));
        }
        let tokens: TokenPair = decode(response)?;
        self.set_tokens(Some(tokens.clone()));
        info!(username, "logged in");
        Ok(tokens)
    }

    /// Exchange the refresh token for a new access token.
    pub fn refresh(&self) -> Result<(), ClientError> {
        let refresh = self
            .tokens()
            .and_then(|t| t.refresh)
            .ok_or(ClientError::NotAuthenticated)?;

        let response = self.exchange(
            Method::Post,
            "auth/token/refresh/",
            None,
            Some(&RefreshRequest { refresh: &refresh }),
        )?;
        if response.status == 401 {
            self.set_tokens(None);
            return Err(ClientError::AuthFailed(error_message(&response)));
        }
        let renewed: TokenPair = decode(response)?;
        self.set_tokens(Some(TokenPair {
            access: renewed.access,
            refresh: renewed.refresh.or(Some(refresh)),
        }));
        debug!("access token refreshed");
        Ok(())
    }

    pub fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        info!(username = %request.username, role = ?request.role, "registering account");
        let response = self.exchange(Method::Post, "auth/register/", None, Some(request))?;
        decode(response)
    }

    pub fn me(&self) -> Result<User, ClientError> {
        self.authed(Method::Get, "auth/me/", None::<&()>)
    }

    /// The backend answers profile lookups with a list; the first entry is
    /// the caller's own profile.
    pub fn patient_profile(&self) -> Result<Option<PatientProfile>, ClientError> {
        let profiles: Vec<PatientProfile> =
            self.authed(Method::Get, "patients/profile/", None::<&()>)?;
        Ok(profiles.into_iter().next())
    }

    pub fn doctor_profile(&self) -> Result<Option<DoctorProfile>, ClientError> {
        let profiles: Vec<DoctorProfile> =
            self.authed(Method::Get, "doctors/profile/", None::<&()>)?;
        Ok(profiles.into_iter().next())
    }

    // ── Screenings ───────────────────────────────────────────────────────

    pub fn screenings(&self) -> Result<Vec<Screening>, ClientError> {
        self.authed(Method::Get, "screenings/", None::<&()>)
    }

    pub fn create_screening(&self, screening: &NewScreening) -> Result<Screening, ClientError> {
        let created: Screening = self.authed(Method::Post, "screenings/", Some(screening))?;
        info!(screening = created.id, "screening created");
        Ok(created)
    }

    pub fn add_biomarkers(
        &self,
        screening_id: i64,
        panel: &BiomarkerPanel,
    ) -> Result<BiomarkerPanel, ClientError> {
        self.authed(
            Method::Post,
            &format!("screenings/{screening_id}/add_biomarkers/"),
            Some(panel),
        )
    }

    pub fn run_analysis(&self, screening_id: i64) -> Result<AnalysisResult, ClientError> {
        info!(screening = screening_id, "running analysis");
        let result: AnalysisResult = self.authed(
            Method::Post,
            &format!("analysis/run/{screening_id}/"),
            None::<&()>,
        )?;
        info!(
            screening = screening_id,
            score = result.metabolic_score,
            risk = result.effective_risk_level().label(),
            "analysis received"
        );
        Ok(result)
    }

    // ── Plumbing ─────────────────────────────────────────────────────────

    fn exchange<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        bearer: Option<String>,
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest {
            method,
            url: self.endpoint(path),
            bearer,
            body: body.map(serde_json::to_string).transpose()?,
        };
        debug!(method = ?request.method, url = %request.url, "api request");
        let response = self.transport.send(&request)?;
        debug!(status = response.status, url = %request.url, "api response");
        Ok(response)
    }

    fn authed<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<R, ClientError> {
        let access = self
            .tokens()
            .map(|t| t.access)
            .ok_or(ClientError::NotAuthenticated)?;

        let response = self.exchange(method, path, Some(access), body)?;
        if response.status != 401 {
            return decode(response);
        }

        let can_refresh = self.tokens().and_then(|t| t.refresh).is_some();
        if !can_refresh {
            return Err(ClientError::AuthFailed(error_message(&response)));
        }

        warn!(path, "access token rejected, refreshing");
        self.refresh()?;
        let access = self
            .tokens()
            .map(|t| t.access)
            .ok_or(ClientError::NotAuthenticated)?;
        let retried = self.exchange(method, path, Some(access), body)?;
        if retried.status == 401 {
            return Err(ClientError::AuthFailed(error_message(&retried)));
        }
        decode(retried)
    }
}

fn api_root(base_url: &str) -> Result<String, ClientError> {
    let base = base_url.trim().trim_end_matches('/');
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ClientError::BaseUrl(base_url.to_string()));
    }
    let base = base.strip_suffix("/api").unwrap_or(base);
    Ok(format!("{base}/api/"))
}

fn decode<R: DeserializeOwned>(response: ApiResponse) -> Result<R, ClientError> {
    if !response.is_success() {
        return Err(ClientError::Status {
            status: response.status,
            message: error_message(&response),
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// `detail` from a JSON error body, or the raw body.
fn error_message(response: &ApiResponse) -> String {
    serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| response.body.trim().to_string())
}
