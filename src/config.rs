//! Environment-driven configuration.
//!
//! The library never reads the environment itself; the binary loads these
//! structs once at startup and injects them.

use std::env;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_FAST_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_REASONING_MODEL: &str = "gemini-3-pro-preview";

/// Advisory service configuration.
///
/// # Environment Variables
/// - `ADVISORY_API_KEY` (required): API key for the advisory endpoint
/// - `ADVISORY_BASE_URL` (optional): REST base URL
/// - `ADVISORY_FAST_MODEL` (optional): low-latency model name
/// - `ADVISORY_REASONING_MODEL` (optional): reasoning model name
#[derive(Debug, Clone)]
pub struct AdvisoryConfig {
    pub api_key: String,
    pub base_url: String,
    pub fast_model: String,
    pub reasoning_model: String,
}

impl AdvisoryConfig {
    /// # Errors
    /// Returns an error if required variables are not set.
    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("ADVISORY_API_KEY")
            .map_err(|_| "ADVISORY_API_KEY environment variable not set".to_string())?;
        Ok(Self {
            api_key,
            base_url: env::var("ADVISORY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            fast_model: env::var("ADVISORY_FAST_MODEL")
                .unwrap_or_else(|_| DEFAULT_FAST_MODEL.to_string()),
            reasoning_model: env::var("ADVISORY_REASONING_MODEL")
                .unwrap_or_else(|_| DEFAULT_REASONING_MODEL.to_string()),
        })
    }
}

/// Server configuration.
///
/// # Environment Variables
/// - `HOST` (optional, default 0.0.0.0)
/// - `PORT` (optional, default 8080)
/// - `ADMIN_ACCESS_KEY` (required): credential gating the admin node listing
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub admin_access_key: String,
}

impl ServerConfig {
    /// # Errors
    /// Returns an error if required variables are not set or malformed.
    pub fn from_env() -> Result<Self, String> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid port number".to_string())?;
        let admin_access_key = env::var("ADMIN_ACCESS_KEY")
            .map_err(|_| "ADMIN_ACCESS_KEY environment variable not set".to_string())?;
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            admin_access_key,
        })
    }
}
