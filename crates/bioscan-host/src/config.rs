use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use bioscan_wizard::analyzing::Timeline;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 2;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "BIOSCAN_API_URL";
pub const ENV_USERNAME: &str = "BIOSCAN_USERNAME";
pub const ENV_PASSWORD: &str = "BIOSCAN_PASSWORD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub api_url: String,
    /// Added in v1.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Added in v2.
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub created_at: jiff::Timestamp,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Pacing of the analyzing step, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub tick_ms: u64,
    pub increment: f32,
    pub phase_share: f32,
    pub pause_ms: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        let timeline = Timeline::default();
        Self {
            tick_ms: timeline.tick.as_millis() as u64,
            increment: timeline.increment,
            phase_share: timeline.phase_share,
            pause_ms: timeline.pause.as_millis() as u64,
        }
    }
}

impl From<TimelineConfig> for Timeline {
    fn from(c: TimelineConfig) -> Self {
        Timeline {
            tick: Duration::from_millis(c.tick_ms),
            increment: c.increment,
            phase_share: c.phase_share,
            pause: Duration::from_millis(c.pause_ms),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            timeline: TimelineConfig::default(),
            export_dir: None,
            username: None,
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl HostConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Where reports are written: the configured directory, else the
    /// user's documents folder, else the working directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::document_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Login details. The password only ever comes from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Apply `BIOSCAN_*` overrides read through `lookup` and pick up
/// credentials when both a username and a password are known.
pub fn apply_overrides(
    mut config: HostConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> (HostConfig, Option<Credentials>) {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_API_URL) {
        tracing::debug!(api_url = %url, "api url overridden from environment");
        config.api_url = url;
    }
    if let Some(username) = non_empty(ENV_USERNAME) {
        config.username = Some(username);
    }

    let credentials = match (&config.username, non_empty(ENV_PASSWORD)) {
        (Some(username), Some(password)) => Some(Credentials {
            username: username.clone(),
            password,
        }),
        _ => None,
    };
    (config, credentials)
}

pub fn apply_env(config: HostConfig) -> (HostConfig, Option<Credentials>) {
    apply_overrides(config, |key| std::env::var(key).ok())
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.bioscan.host"))
}

fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn load_config() -> eyre::Result<HostConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> eyre::Result<HostConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse config JSON of any supported version, migrating it first.
pub fn parse_config(contents: &str) -> eyre::Result<HostConfig> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: HostConfig = serde_json::from_value(migrated)?;
    Timeline::from(config.timeline).validate()?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update BioScan."
        ));
    }

    let obj = json
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

    // v0 → v1: request timeout
    if from_version < 1 {
        obj.entry("request_timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_TIMEOUT_SECS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added request_timeout_secs)");
    }

    // v1 → v2: analysis pacing, previously hard-coded
    if from_version < 2 {
        if !obj.contains_key("timeline") {
            obj.insert(
                "timeline".to_string(),
                serde_json::to_value(TimelineConfig::default())?,
            );
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(2.into()),
        );
        tracing::info!("migrated config v1 → v2 (added timeline)");
    }

    Ok(json)
}

pub fn save_config(config: &HostConfig) -> eyre::Result<()> {
    save_config_in(&config_dir()?, config)
}

/// Write `config.json` under `dir`, creating the directory as needed.
pub fn save_config_in(dir: &Path, config: &HostConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
