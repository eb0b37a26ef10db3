//! Application configuration.
//!
//! Values are resolved with priority: config.toml > .env / environment > defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::paths;

// ==================== File Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<DatabaseConfig>,
    server: Option<ServerConfig>,
    points: Option<PointsConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    port: Option<u16>,
}

/// Points awarded per learning action
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    pub review_passed: i64,
    pub review_failed: i64,
    pub quiz_correct: i64,
    pub word_added: i64,
    pub daily_first_activity: i64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            review_passed: 10,
            review_failed: 2,
            quiz_correct: 5,
            word_added: 1,
            daily_first_activity: 5,
        }
    }
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub server_port: u16,
    pub points: PointsConfig,
}

impl Config {
    /// Load configuration from `config.toml` in the working directory.
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(config_file: &Path) -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let file = match std::fs::read_to_string(config_file) {
            Ok(contents) => parse_file_config(&contents),
            Err(_) => FileConfig::default(),
        };

        let database_path = resolve_database_path(&file);
        let server_port = resolve_server_port(&file);

        Self {
            database_path,
            server_port,
            points: file.points.unwrap_or_default(),
        }
    }

    /// Full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", SERVER_ADDR, self.server_port)
    }
}

fn parse_file_config(contents: &str) -> FileConfig {
    match toml::from_str::<FileConfig>(contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            FileConfig::default()
        }
    }
}

fn resolve_database_path(file: &FileConfig) -> PathBuf {
    // Priority 1: config.toml
    if let Some(path) = file.database.as_ref().and_then(|db| db.path.clone()) {
        tracing::info!("Using database from config.toml: {}", path);
        return PathBuf::from(path);
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    let default = PathBuf::from(paths::db_path());
    tracing::info!("Using default database path: {}", default.display());
    default
}

fn resolve_server_port(file: &FileConfig) -> u16 {
    if let Some(port) = file.server.as_ref().and_then(|s| s.port) {
        return port;
    }

    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_SERVER_PORT)
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port when neither config.toml nor PORT sets one
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// ==================== Query Limits ====================

/// Default number of due cards returned per request
pub const DEFAULT_DUE_LIMIT: usize = 50;

/// Number of users shown on the leaderboard
pub const LEADERBOARD_LIMIT: usize = 20;

// ==================== Quiz Configuration ====================

/// Number of distractor choices in multiple choice mode
pub const DISTRACTOR_COUNT: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let file = parse_file_config(
            r#"
            [database]
            path = "/tmp/words.db"

            [server]
            port = 8080

            [points]
            review_passed = 20
            "#,
        );

        assert_eq!(resolve_database_path(&file), PathBuf::from("/tmp/words.db"));
        assert_eq!(resolve_server_port(&file), 8080);

        let points = file.points.unwrap();
        assert_eq!(points.review_passed, 20);
        // Unset amounts fall back to defaults
        assert_eq!(points.review_failed, 2);
        assert_eq!(points.daily_first_activity, 5);
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let file = parse_file_config("this is [not toml");
        assert!(file.database.is_none());
        assert!(file.points.is_none());
    }

    #[test]
    fn test_load_from_missing_file() {
        let config = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.points, PointsConfig::default());
        assert!(config.bind_addr().starts_with("0.0.0.0:"));
    }
}
