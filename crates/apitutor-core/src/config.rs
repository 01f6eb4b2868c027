//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub tutor: TutorConfig,
    pub cors: CorsConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_payload_limit")]
    pub payload_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_payload_limit() -> usize {
    64 * 1024
}

/// Backing store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Path of the JSON document holding customers and calls
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    ".data/db.json".to_string()
}

/// Tutorial presentation and admin gate
#[derive(Debug, Deserialize, Clone)]
pub struct TutorConfig {
    /// Project display name embedded in every lesson
    #[serde(default = "default_project")]
    pub project: String,

    /// Public host name of the deployed project, shown on the landing lesson
    #[serde(default)]
    pub project_domain: String,

    /// Secret expected in the `admin_key` header. Admin routes are closed when unset.
    #[serde(default)]
    pub admin_secret: Option<String>,
}

fn default_project() -> String {
    "API Tutor".to_string()
}

/// CORS configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Comma separated list of allowed origins, or `*`
    #[serde(default = "default_cors_origins")]
    pub origins: String,
}

fn default_cors_origins() -> String {
    "*".to_string()
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("server.workers", default_workers() as i64)?
            .set_default("server.payload_limit", default_payload_limit() as i64)?
            .set_default("store.path", default_store_path())?
            .set_default("tutor.project", default_project())?
            .set_default("tutor.project_domain", "")?
            .set_default("cors.origins", default_cors_origins())?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with APITUTOR_ prefix
            .add_source(
                Environment::with_prefix("APITUTOR")
                    .separator("__")
                    .try_parsing(true),
            )
            // Support the flat variables hosted deployments set
            .set_override_option("tutor.project", env::var("PROJECT").ok())?
            .set_override_option("tutor.project_domain", env::var("PROJECT_DOMAIN").ok())?
            .set_override_option("tutor.admin_secret", env::var("SECRET").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("server.workers", default_workers() as i64)?
            .set_default("server.payload_limit", default_payload_limit() as i64)?
            .set_default("store.path", default_store_path())?
            .set_default("tutor.project", default_project())?
            .set_default("cors.origins", default_cors_origins())?
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("APITUTOR").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            project_domain: String::new(),
            admin_secret: None,
        }
    }
}

impl TutorConfig {
    /// Greeting placed at the top of every lesson
    pub fn welcome_message(&self) -> String {
        format!(
            "You're using the {} training course! Check out the 'data' object below to see the values \
             returned by this API request. Click **Visualize** to see the 'tutorial' guiding you through \
             next steps - do this for every request in the collection!",
            self.project
        )
    }
}
