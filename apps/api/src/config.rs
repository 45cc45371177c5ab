use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Missing required variables fail startup before the listener binds.
#[derive(Debug, Clone)]
pub struct Config {
    pub rapidapi_key: String,
    pub anthropic_api_key: String,
    /// Where the normalized activity feed is dumped as a debug artifact.
    pub activity_cache_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rapidapi_key: require_env("RAPIDAPI_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            activity_cache_path: std::env::var("ACTIVITY_CACHE_PATH")
                .unwrap_or_else(|_| "activities.json".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_all() {
        for key in [
            "RAPIDAPI_KEY",
            "ANTHROPIC_API_KEY",
            "ACTIVITY_CACHE_PATH",
            "PORT",
            "RUST_LOG",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_missing_rapidapi_key_fails() {
        clear_all();
        std::env::set_var("ANTHROPIC_API_KEY", "sk-test");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("RAPIDAPI_KEY"));
    }

    #[test]
    #[serial]
    fn test_missing_anthropic_key_fails() {
        clear_all();
        std::env::set_var("RAPIDAPI_KEY", "rapid-test");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_defaults_applied_when_optional_vars_absent() {
        clear_all();
        std::env::set_var("RAPIDAPI_KEY", "rapid-test");
        std::env::set_var("ANTHROPIC_API_KEY", "sk-test");
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.activity_cache_path, PathBuf::from("activities.json"));
    }

    #[test]
    #[serial]
    fn test_invalid_port_fails() {
        clear_all();
        std::env::set_var("RAPIDAPI_KEY", "rapid-test");
        std::env::set_var("ANTHROPIC_API_KEY", "sk-test");
        std::env::set_var("PORT", "not-a-port");
        assert!(Config::from_env().is_err());
    }
}
