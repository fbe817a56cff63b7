use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::services::localizer::DEPLOYMENT_KEY_ENV;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub gemini: GeminiConfig,
    pub storage: StorageConfig,
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
    pub file: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Base URL up to and including the API version
    pub api_base: String,
    /// Model used when a request does not name one
    pub default_model: String,
    /// Deployment key. `API_KEY` in the environment takes precedence.
    pub api_key: Option<String>,
    /// Optional request timeout; unset means no client-side timeout
    #[serde(default, deserialize_with = "deserialize_optional_duration_secs")]
    pub timeout_secs: Option<u64>,
}

// Hand-written so the deployment key never reaches logs
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the user-supplied API key
    pub path: String,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_, plus API_KEY)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let mut config = match path {
            Some(path) => Self::from_toml(path)?,
            None => match Self::find_config_file() {
                Some(config_path) => Self::from_toml(Path::new(&config_path))?,
                None => {
                    tracing::warn!("Configuration file not found, using defaults");
                    Config::default()
                },
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 127.0.0.1)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,lendon=debug")
    /// - APP_GEMINI_API_BASE: Gemini API base URL
    /// - APP_GEMINI_DEFAULT_MODEL: Model used by a fresh workbench
    /// - APP_GEMINI_TIMEOUT_SECS: Request timeout (accepts "90", "90s", "2m")
    /// - APP_STORAGE_PATH: Local key store file
    /// - API_KEY: Deployment API key, shadows any user-saved key
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Ok(base) = std::env::var("APP_GEMINI_API_BASE") {
            self.gemini.api_base = base;
            tracing::info!("Override gemini.api_base from env: {}", self.gemini.api_base);
        }

        if let Ok(model) = std::env::var("APP_GEMINI_DEFAULT_MODEL") {
            self.gemini.default_model = model;
            tracing::info!(
                "Override gemini.default_model from env: {}",
                self.gemini.default_model
            );
        }

        if let Ok(timeout) = std::env::var("APP_GEMINI_TIMEOUT_SECS") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.gemini.timeout_secs = Some(val);
                    tracing::info!("Override gemini.timeout_secs from env: {}", val);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_GEMINI_TIMEOUT_SECS '{}': {} (keep {:?})",
                    timeout,
                    e,
                    self.gemini.timeout_secs
                ),
            }
        }

        if let Ok(path) = std::env::var("APP_STORAGE_PATH") {
            self.storage.path = path;
            tracing::info!("Override storage.path from env: {}", self.storage.path);
        }

        if let Ok(key) = std::env::var(DEPLOYMENT_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.gemini.api_key = Some(key);
            tracing::info!("Deployment API key detected in {}", DEPLOYMENT_KEY_ENV);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.gemini.api_base.trim().is_empty() {
            anyhow::bail!("gemini.api_base cannot be empty");
        }

        if self.gemini.default_model.trim().is_empty() {
            anyhow::bail!("gemini.default_model cannot be empty");
        }

        if self.gemini.timeout_secs == Some(0) {
            anyhow::bail!("gemini.timeout_secs must be > 0 when set");
        }

        if self.storage.path.trim().is_empty() {
            anyhow::bail!("storage.path cannot be empty");
        }

        if self.gemini.api_key.is_none() {
            tracing::info!("No deployment API key; users must save their own key in settings");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,lendon=debug".to_string(), file: Some("logs/lendon.log".to_string()) }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            default_model: crate::models::DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: "data/local_storage.json".to_string() }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    let factor: u64 = match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hour" | "hours" => 60 * 60,
        _ => return Err(format!("unsupported unit: {}", unit)),
    };
    n.checked_mul(factor).ok_or_else(|| format!("duration too large: {}", input))
}

// Numeric or human-friendly string ("90s", "2m")
fn deserialize_optional_duration_secs<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = Option<u64>;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '5m', '1h'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(Some(v as u64)) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map(Some).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
