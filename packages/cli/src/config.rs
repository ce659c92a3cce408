use std::num::ParseIntError;
use thiserror::Error;

use persona_config::{
    backend_base_url, var_or, CORS_ORIGIN, DEFAULT_CORS_ORIGIN, DEFAULT_HOST, DEFAULT_PORT,
    PERSONA_HOST, PORT,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid backend URL '{0}': expected an http:// or https:// address")]
    InvalidBackendUrl(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub cors_origin: String,
    pub backend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = var_or(PORT, &DEFAULT_PORT.to_string()).parse::<u16>()?;

        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let host = var_or(PERSONA_HOST, DEFAULT_HOST);
        let cors_origin = var_or(CORS_ORIGIN, DEFAULT_CORS_ORIGIN);
        let backend_url = validate_backend_url(&backend_base_url())?;

        Ok(Config {
            port,
            host,
            cors_origin,
            backend_url,
        })
    }

    /// Replace the backend the proxy forwards to
    pub fn with_backend_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.backend_url = validate_backend_url(url)?;
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accept only absolute http(s) URLs, returned without a trailing slash
pub fn validate_backend_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');

    let has_host = ["http://", "https://"]
        .iter()
        .any(|scheme| trimmed.len() > scheme.len() && trimmed.starts_with(scheme));

    if !has_host {
        return Err(ConfigError::InvalidBackendUrl(url.to_string()));
    }

    Ok(trimmed.to_string())
}
