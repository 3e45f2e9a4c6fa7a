use std::env;

use derive_more::{Display, From};
use serde::Deserialize;
use serde_valid::yaml::FromYamlStr;
use serde_valid::Validate;

pub const DEFAULT_BASE_URL: &str = "https://public.jupiterapi.com";
pub const DEFAULT_BASE_URL_ENV: &str = "NEXT_PUBLIC_JUP_SWAP_API";
pub const DEFAULT_TOKENS_URL: &str = "https://cache.jup.ag/tokens";
pub const DEFAULT_TOP_TOKENS_URL: &str = "https://cache.jup.ag/top-tokens";

// Config Type
#[derive(Debug, Clone)]
pub struct Config {
    // Jupiter API configuration
    pub jupiter: JupiterConfig,
    // API Server Configuration
    pub server: ServerConfig,
}

impl Config {
    pub fn from_file(file_path: &str) -> Result<Self, ConfigError> {
        let config_file_content = std::fs::read_to_string(file_path)?;
        Self::from_yaml_str(&config_file_content)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let raw_config = RawConfig::from_yaml_str(s)?;

        if raw_config.jupiter.base_url_env.trim().is_empty() {
            return Err(ConfigError::InvalidEnvironmentVariable(
                raw_config.jupiter.base_url_env.clone(),
            ));
        }

        Ok(Config { jupiter: raw_config.jupiter, server: raw_config.server })
    }
}

#[derive(Debug, From, Display)]
pub enum ConfigError {
    #[display("Invalid environment variable name: '{}'", _0)]
    #[from(ignore)]
    InvalidEnvironmentVariable(String),

    #[display("Serde Error: {}", _0)]
    SerdeError(serde_valid::Error<serde_yaml::Error>),

    #[display("Error Reading Config File: {}", _0)]
    IoError(std::io::Error),
}

impl std::error::Error for ConfigError {}

// Intermediate Config Type as Deserialization Target
#[derive(Debug, Deserialize, Validate)]
pub struct RawConfig {
    #[validate]
    pub jupiter: JupiterConfig,
    #[validate]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct JupiterConfig {
    // Default base URL of the Jupiter swap API, used when the override is unset
    #[validate(
        pattern = r"https?:\/\/(www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_\+.~#?&//=]*)"
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,
    // Environment variable holding the base URL override
    #[serde(default = "default_base_url_env")]
    pub base_url_env: String,
    // Token list endpoint
    #[validate(
        pattern = r"https?:\/\/(www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_\+.~#?&//=]*)"
    )]
    #[serde(default = "default_tokens_url")]
    pub tokens_url: String,
    // Top tokens endpoint
    #[validate(
        pattern = r"https?:\/\/(www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_\+.~#?&//=]*)"
    )]
    #[serde(default = "default_top_tokens_url")]
    pub top_tokens_url: String,
    // Per request timeout, no timeout when unset
    #[validate(minimum = 1)]
    pub request_timeout_sec: Option<u64>,
}

impl JupiterConfig {
    /// Base path for the client handle: the environment override when it is set and
    /// non-empty, the configured default otherwise.
    pub fn resolve_base_path(&self) -> String {
        match env::var(&self.base_url_env) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => self.base_url.clone(),
        }
    }
}

impl Default for JupiterConfig {
    fn default() -> Self {
        JupiterConfig {
            base_url: default_base_url(),
            base_url_env: default_base_url_env(),
            tokens_url: default_tokens_url(),
            top_tokens_url: default_top_tokens_url(),
            request_timeout_sec: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_base_url_env() -> String {
    DEFAULT_BASE_URL_ENV.to_string()
}

fn default_tokens_url() -> String {
    DEFAULT_TOKENS_URL.to_string()
}

fn default_top_tokens_url() -> String {
    DEFAULT_TOP_TOKENS_URL.to_string()
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct ServerConfig {
    // The port the server will listen on
    #[validate(minimum = 1)]
    pub port: u16,

    // The host the server will listen on
    #[validate(min_length = 1)]
    pub host: String,
}

pub fn get_sample_config() -> Config {
    Config::from_file("../../config.yaml.example").unwrap()
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use crate::config::{Config, ConfigError, JupiterConfig, DEFAULT_BASE_URL};
    use crate::get_sample_config;

    const TEST_ENV: &str = "JUP_SWAP_API_CONFIG_TEST";

    #[test]
    fn test_config_parsing() {
        let config = get_sample_config();

        assert_eq!(config.jupiter.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.jupiter.tokens_url, "https://cache.jup.ag/tokens");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_should_fill_jupiter_defaults() {
        let config = Config::from_yaml_str(
            r#"
jupiter: {}
server:
    port: 8080
    host: 'localhost'
"#,
        )
        .unwrap();

        assert_eq!(config.jupiter.base_url, "https://public.jupiterapi.com");
        assert_eq!(config.jupiter.base_url_env, "NEXT_PUBLIC_JUP_SWAP_API");
        assert_eq!(config.jupiter.top_tokens_url, "https://cache.jup.ag/top-tokens");
        assert_eq!(config.jupiter.request_timeout_sec, None);
    }

    #[test]
    fn test_should_not_allow_invalid_base_url() {
        let config = r#"
jupiter:
    base_url: 'not a url'
server:
    port: 8080
    host: 'localhost'
"#;

        assert!(matches!(Config::from_yaml_str(config).unwrap_err(), ConfigError::SerdeError(_)));
    }

    #[test]
    fn test_should_not_allow_zero_port() {
        let config = r#"
jupiter: {}
server:
    port: 0
    host: 'localhost'
"#;

        assert!(matches!(Config::from_yaml_str(config).unwrap_err(), ConfigError::SerdeError(_)));
    }

    #[test]
    fn test_should_not_allow_empty_env_name() {
        let config = r#"
jupiter:
    base_url_env: ''
server:
    port: 8080
    host: 'localhost'
"#;

        assert!(matches!(
            Config::from_yaml_str(config).unwrap_err(),
            ConfigError::InvalidEnvironmentVariable(_)
        ));
    }

    #[test]
    #[serial]
    fn test_base_path_uses_env_override() {
        let jupiter =
            JupiterConfig { base_url_env: TEST_ENV.to_string(), ..JupiterConfig::default() };

        env::set_var(TEST_ENV, "https://quote-api.example.com");
        assert_eq!(jupiter.resolve_base_path(), "https://quote-api.example.com");
        env::remove_var(TEST_ENV);
    }

    #[test]
    #[serial]
    fn test_base_path_falls_back_when_env_missing_or_empty() {
        let jupiter =
            JupiterConfig { base_url_env: TEST_ENV.to_string(), ..JupiterConfig::default() };

        env::remove_var(TEST_ENV);
        assert_eq!(jupiter.resolve_base_path(), DEFAULT_BASE_URL);

        env::set_var(TEST_ENV, "");
        assert_eq!(jupiter.resolve_base_path(), DEFAULT_BASE_URL);
        env::remove_var(TEST_ENV);
    }
}
