use crate::config::{validate_backend_url, Config, ConfigError};
use persona_config::{CORS_ORIGIN, PERSONA_BACKEND_URL, PERSONA_HOST, PORT};
use rstest::rstest;
use serial_test::serial;
use std::env;

fn clear_env() {
    for name in [PORT, PERSONA_HOST, CORS_ORIGIN, PERSONA_BACKEND_URL] {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.port, 3000);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.cors_origin, "http://localhost:3000");
    assert_eq!(config.backend_url, "http://backend:8000");
    assert_eq!(config.bind_address(), "127.0.0.1:3000");
}

#[test]
#[serial]
fn test_config_from_env_with_all_custom() {
    clear_env();
    env::set_var(PORT, "8080");
    env::set_var(PERSONA_HOST, "0.0.0.0");
    env::set_var(CORS_ORIGIN, "https://app.example.com");
    env::set_var(PERSONA_BACKEND_URL, "http://sim-backend:9000/");

    let config = Config::from_env().unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.cors_origin, "https://app.example.com");
    assert_eq!(config.backend_url, "http://sim-backend:9000");

    clear_env();
}

#[test]
#[serial]
fn test_config_invalid_port() {
    clear_env();
    env::set_var(PORT, "not-a-number");

    let result = Config::from_env();

    assert!(matches!(result.unwrap_err(), ConfigError::InvalidPort(_)));

    clear_env();
}

#[test]
#[serial]
fn test_config_port_zero() {
    clear_env();
    env::set_var(PORT, "0");

    let result = Config::from_env();

    assert!(matches!(result.unwrap_err(), ConfigError::PortOutOfRange(0)));

    clear_env();
}

#[test]
#[serial]
fn test_config_port_too_large() {
    clear_env();
    env::set_var(PORT, "70000");

    let result = Config::from_env();

    assert!(matches!(result.unwrap_err(), ConfigError::InvalidPort(_)));

    clear_env();
}

#[test]
#[serial]
fn test_config_rejects_backend_without_scheme() {
    clear_env();
    env::set_var(PERSONA_BACKEND_URL, "backend:8000");

    let result = Config::from_env();

    assert!(matches!(
        result.unwrap_err(),
        ConfigError::InvalidBackendUrl(url) if url == "backend:8000"
    ));

    clear_env();
}

#[test]
#[serial]
fn test_with_backend_url_override() {
    clear_env();

    let config = Config::from_env()
        .unwrap()
        .with_backend_url("https://api.example.com/")
        .unwrap();

    assert_eq!(config.backend_url, "https://api.example.com");
    assert!(Config::from_env().unwrap().with_backend_url("ftp://x").is_err());
}

#[rstest]
#[case("http://backend:8000", true)]
#[case("https://api.example.com/", true)]
#[case("  http://localhost:8000  ", true)]
#[case("http://", false)]
#[case("backend:8000", false)]
#[case("", false)]
fn test_validate_backend_url(#[case] url: &str, #[case] valid: bool) {
    assert_eq!(validate_backend_url(url).is_ok(), valid);
}
