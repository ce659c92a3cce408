// ABOUTME: Configuration and environment variable helpers for Persona
// ABOUTME: Re-exports the variable names and resolves values with logged fallbacks

pub mod constants;

pub use constants::*;

use std::env;
use tracing::debug;

/// Read an environment variable, falling back to `default` when unset or blank
pub fn var_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => {
            debug!("{} not set, using default {}", name, default);
            default.to_string()
        }
    }
}

/// Base URL for direct client calls, without a trailing slash
pub fn api_base_url() -> String {
    var_or(PERSONA_API_URL, DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Base URL of the backend the proxy forwards to, without a trailing slash
pub fn backend_base_url() -> String {
    var_or(PERSONA_BACKEND_URL, DEFAULT_BACKEND_URL)
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_or_default_and_override() {
        let name = "PERSONA_CONFIG_TEST_VAR_OR";

        env::remove_var(name);
        assert_eq!(var_or(name, "fallback"), "fallback");

        env::set_var(name, "   ");
        assert_eq!(var_or(name, "fallback"), "fallback");

        env::set_var(name, " http://example.test ");
        assert_eq!(var_or(name, "fallback"), "http://example.test");

        env::remove_var(name);
    }

    #[test]
    fn test_base_urls_drop_trailing_slash() {
        env::set_var(PERSONA_API_URL, "http://api.test:9000/");
        assert_eq!(api_base_url(), "http://api.test:9000");
        env::remove_var(PERSONA_API_URL);
        assert_eq!(api_base_url(), DEFAULT_API_URL);

        env::set_var(PERSONA_BACKEND_URL, "http://upstream.test//");
        assert_eq!(backend_base_url(), "http://upstream.test");
        env::remove_var(PERSONA_BACKEND_URL);
        assert_eq!(backend_base_url(), DEFAULT_BACKEND_URL);
    }
}
