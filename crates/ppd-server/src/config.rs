//! Server configuration.
//!
//! Settings come from an optional JSON file named by `PPD_CONFIG`, then
//! individual `PPD_*` environment variables override whatever the file set.
//! The file carries a schema version and older shapes are migrated in place
//! before deserializing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const CONFIG_PATH_VAR: &str = "PPD_CONFIG";
pub const BIND_ADDR_VAR: &str = "PPD_BIND_ADDR";
pub const MODEL_PATH_VAR: &str = "PPD_MODEL_PATH";
pub const SESSION_TTL_VAR: &str = "PPD_SESSION_TTL_SECS";
pub const LOG_FORMAT_VAR: &str = "PPD_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Plain,
}

impl std::str::FromStr for LogFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "plain" | "text" => Ok(Self::Plain),
            other => Err(eyre::eyre!("unknown log format {other:?} (expected json or plain)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    /// Sessions untouched for this long are evicted.
    pub session_ttl_secs: u64,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            model_path: PathBuf::from("models/ppd_model.json"),
            session_ttl_secs: 30 * 60,
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Defaults, then the file named by `PPD_CONFIG`, then `PPD_*` overrides.
    pub fn from_env() -> eyre::Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => load_config(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `PPD_*` overrides from any key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<()> {
        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            self.bind_addr = addr
                .parse()
                .map_err(|e| eyre::eyre!("invalid {BIND_ADDR_VAR} {addr:?}: {e}"))?;
        }
        if let Some(path) = lookup(MODEL_PATH_VAR) {
            self.model_path = PathBuf::from(path);
        }
        if let Some(ttl) = lookup(SESSION_TTL_VAR) {
            self.session_ttl_secs = ttl
                .parse()
                .map_err(|e| eyre::eyre!("invalid {SESSION_TTL_VAR} {ttl:?}: {e}"))?;
        }
        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            self.log_format = format.parse()?;
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> eyre::Result<ServerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(v) => u32::try_from(v)
            .map_err(|_| eyre::eyre!("config_version {v} is out of range"))?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: ServerConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: idle timeout moved from minutes to seconds.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(minutes) = obj.remove("session_ttl_minutes") {
            let minutes = minutes
                .as_u64()
                .ok_or_else(|| eyre::eyre!("session_ttl_minutes must be a whole number"))?;
            let secs = minutes
                .checked_mul(60)
                .ok_or_else(|| eyre::eyre!("session_ttl_minutes {minutes} is too large"))?;
            obj.entry("session_ttl_secs")
                .or_insert(serde_json::Value::Number(secs.into()));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (session_ttl_minutes → session_ttl_secs)");
    }

    Ok(json)
}
