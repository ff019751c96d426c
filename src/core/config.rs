//! Configuration management for the MCP server.
//!
//! Values come from defaults, then from `MCP_*` environment variables (a
//! `.env` file is loaded first when present).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// SQLite database configuration.
    pub database: DatabaseConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Where the support records live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file. Created with its schema if missing.
    pub path: PathBuf,

    /// Insert demo customers and tickets into an empty database at startup.
    pub seed_demo_data: bool,

    /// How long a connection waits on a locked database.
    pub busy_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("support.db"),
            seed_demo_data: false,
            busy_timeout_ms: 5000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "support-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            database: DatabaseConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_DATABASE_PATH`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(path) = std::env::var("MCP_DATABASE_PATH") {
            config.database.path = PathBuf::from(path);
        }

        if let Ok(seed) = std::env::var("MCP_DATABASE_SEED") {
            config.database.seed_demo_data = parse_flag(&seed);
        }

        if let Ok(timeout) = std::env::var("MCP_DATABASE_BUSY_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => config.database.busy_timeout_ms = ms,
                Err(_) => warn!(
                    "Ignoring invalid MCP_DATABASE_BUSY_TIMEOUT_MS '{}', using {}ms",
                    timeout, config.database.busy_timeout_ms
                ),
            }
        }

        config.transport = TransportConfig::from_env();

        config
    }
}

/// `1`, `true`, `yes` and `on` (any case) enable a flag.
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const DB_VARS: [&str; 3] = [
        "MCP_DATABASE_PATH",
        "MCP_DATABASE_SEED",
        "MCP_DATABASE_BUSY_TIMEOUT_MS",
    ];

    fn clear_db_vars() {
        for var in DB_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_database_defaults() {
        let config = Config::default();
        assert_eq!(config.database.path, PathBuf::from("support.db"));
        assert!(!config.database.seed_demo_data);
        assert_eq!(config.database.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_database_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_DATABASE_PATH", "/tmp/support-test.db");
            std::env::set_var("MCP_DATABASE_SEED", "TRUE");
            std::env::set_var("MCP_DATABASE_BUSY_TIMEOUT_MS", "250");
        }
        let config = Config::from_env();
        clear_db_vars();

        assert_eq!(config.database.path, PathBuf::from("/tmp/support-test.db"));
        assert!(config.database.seed_demo_data);
        assert_eq!(config.database.busy_timeout_ms, 250);
    }

    #[test]
    fn test_invalid_busy_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_DATABASE_BUSY_TIMEOUT_MS", "soon");
        }
        let config = Config::from_env();
        clear_db_vars();

        assert_eq!(config.database.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" yes "));
        assert!(parse_flag("On"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
