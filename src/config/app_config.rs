use serde::Deserialize;
use tracing::warn;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Token issuance settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Signing secrets, newest first. Older entries are only used to verify.
    pub secrets: Vec<String>,
    pub access_token_minutes: u64,
    pub refresh_token_days: u64,
    pub store_timeout_ms: u64,
    pub revocation_sweep_seconds: u64,
    pub seed_demo_users: bool,
}

const MIN_RECOMMENDED_SECRET_BYTES: usize = 32;
const MAX_ACCESS_TOKEN_MINUTES: u64 = 24 * 60;
const MAX_REFRESH_TOKEN_DAYS: u64 = 365;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            secrets: vec!["change-me-in-production".to_string()],
            access_token_minutes: 30,
            refresh_token_days: 7,
            store_timeout_ms: 2_000,
            revocation_sweep_seconds: 300,
            seed_demo_users: false,
        }
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secrets", &format!("[{} hidden]", self.secrets.len()))
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .field("store_timeout_ms", &self.store_timeout_ms)
            .field("revocation_sweep_seconds", &self.revocation_sweep_seconds)
            .field("seed_demo_users", &self.seed_demo_users)
            .finish()
    }
}

impl AuthSettings {
    /// Reject settings the token service cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.secrets.is_empty() {
            return Err("auth.secrets must contain at least one secret".to_string());
        }

        if self.secrets.iter().any(|s| s.is_empty()) {
            return Err("auth.secrets cannot contain empty entries".to_string());
        }

        if self.access_token_minutes == 0 || self.access_token_minutes > MAX_ACCESS_TOKEN_MINUTES {
            return Err(format!(
                "auth.access_token_minutes must be between 1 and {}",
                MAX_ACCESS_TOKEN_MINUTES
            ));
        }

        if self.refresh_token_days == 0 || self.refresh_token_days > MAX_REFRESH_TOKEN_DAYS {
            return Err(format!(
                "auth.refresh_token_days must be between 1 and {}",
                MAX_REFRESH_TOKEN_DAYS
            ));
        }

        if self.store_timeout_ms == 0 {
            return Err("auth.store_timeout_ms must be greater than zero".to_string());
        }

        if self.secrets[0].len() < MIN_RECOMMENDED_SECRET_BYTES {
            warn!(
                min_bytes = MIN_RECOMMENDED_SECRET_BYTES,
                "Active signing secret is shorter than recommended"
            );
        }

        Ok(())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.secrets")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
