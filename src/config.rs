//! Application-level configuration loading.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PARTY_DRAW_CONFIG_PATH";
/// Environment variable that overrides the token signing secret from the file.
const JWT_SECRET_ENV: &str = "JWT_SECRET";

const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;
const DEFAULT_JWT_SECRET: &str = "party-draw-dev-secret";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Directory receiving uploaded media, served under `/uploads`.
    pub uploads_dir: PathBuf,
    /// Largest accepted upload body.
    pub max_upload_bytes: usize,
    /// Lifetime of admin bearer tokens.
    pub token_ttl: Duration,
    /// HMAC secret used to sign admin bearer tokens.
    pub jwt_secret: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        config.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(secret) = env::var(JWT_SECRET_ENV).ok().filter(|s| !s.is_empty()) {
            self.jwt_secret = secret;
        } else if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("JWT_SECRET not set; admin tokens are signed with the development secret");
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            jwt_secret: DEFAULT_JWT_SECRET.to_owned(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    uploads_dir: Option<PathBuf>,
    max_upload_bytes: Option<usize>,
    token_ttl_secs: Option<u64>,
    jwt_secret: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            uploads_dir: value.uploads_dir.unwrap_or(defaults.uploads_dir),
            max_upload_bytes: value.max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
            token_ttl: value
                .token_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.token_ttl),
            jwt_secret: value.jwt_secret.unwrap_or(defaults.jwt_secret),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
