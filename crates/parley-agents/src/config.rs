//! Agent configuration loading from file and environment variables.

use serde::Deserialize;
use thiserror::Error;

use parley_llm::LlmSettings;

/// Top-level configuration shared by every agent binary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Completion service settings.
    #[serde(default)]
    pub llm: LlmSettings,

    /// Record persistence settings.
    #[serde(default)]
    pub records: RecordsConfig,

    /// Fraud-case database settings (fraud agent only).
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where completed-conversation records are written.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsConfig {
    /// Directory for per-agent record files.
    #[serde(default = "default_records_dir")]
    pub dir: String,
}

/// Fraud-case database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "parley_agents=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_records_dir() -> String {
    "records".to_string()
}

fn default_db_path() -> String {
    "transactions.sqlite".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            dir: default_records_dir(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults when the
/// file does not exist.
///
/// Environment variable overrides:
/// - `PARLEY_LLM_BASE_URL` overrides `llm.base_url`
/// - `PARLEY_LLM_API_KEY` overrides `llm.api_key`
/// - `PARLEY_LLM_MODEL` overrides `llm.model`
/// - `PARLEY_RECORDS_DIR` overrides `records.dir`
/// - `PARLEY_DB_PATH` overrides `database.path`
/// - `PARLEY_LOG_LEVEL` overrides `logging.level`
/// - `PARLEY_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) if std::path::Path::new(path).exists() => {
            let text = std::fs::read_to_string(path)?;
            toml::from_str(&text)?
        }
        _ => Config::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(value) = std::env::var("PARLEY_LLM_BASE_URL") {
        config.llm.base_url = value;
    }
    if let Ok(value) = std::env::var("PARLEY_LLM_API_KEY") {
        config.llm.api_key = value;
    }
    if let Ok(value) = std::env::var("PARLEY_LLM_MODEL") {
        config.llm.model = value;
    }
    if let Ok(value) = std::env::var("PARLEY_RECORDS_DIR") {
        config.records.dir = value;
    }
    if let Ok(value) = std::env::var("PARLEY_DB_PATH") {
        config.database.path = value;
    }
    if let Ok(value) = std::env::var("PARLEY_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = std::env::var("PARLEY_LOG_JSON") {
        config.logging.json = value == "true";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // `load_config` reads process-global environment variables, so tests
    // that go through it serialise on this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn missing_file_yields_defaults() {
        let _guard = env_lock();
        let config = load_config(Some("/nonexistent/parley.toml")).unwrap();
        assert_eq!(config.records.dir, "records");
        assert_eq!(config.database.path, "transactions.sqlite");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let _guard = env_lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[llm]\nbase_url = \"http://example.test/v1\"\napi_key = \"k\"\nmodel = \"m\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.llm.base_url, "http://example.test/v1");
        assert_eq!(config.llm.model, "m");
        assert_eq!(config.logging.level, "debug");
        // Untouched sections fall back to defaults.
        assert_eq!(config.records.dir, "records");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let _guard = env_lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [[[").unwrap();
        assert!(matches!(
            load_config(file.path().to_str()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn env_vars_override_file_values() {
        let _guard = env_lock();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[llm]\nbase_url = \"http://example.test/v1\"\nmodel = \"from-file\"\n\n[records]\ndir = \"file-records\""
        )
        .unwrap();

        std::env::set_var("PARLEY_LLM_MODEL", "from-env");
        std::env::set_var("PARLEY_RECORDS_DIR", "env-records");
        std::env::set_var("PARLEY_LOG_JSON", "true");

        let config = load_config(file.path().to_str());

        std::env::remove_var("PARLEY_LLM_MODEL");
        std::env::remove_var("PARLEY_RECORDS_DIR");
        std::env::remove_var("PARLEY_LOG_JSON");

        let config = config.unwrap();
        assert_eq!(config.llm.model, "from-env");
        assert_eq!(config.records.dir, "env-records");
        assert!(config.logging.json);
        // Values without an override keep what the file said.
        assert_eq!(config.llm.base_url, "http://example.test/v1");
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let mut config = Config::default();
        config.llm.api_key = "super-secret".to_string();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
