// ABOUTME: Environment variable name constants and their defaults
// ABOUTME: Centralized definitions of all environment variable names used across Persona

// Server Configuration
pub const PORT: &str = "PORT";
pub const PERSONA_HOST: &str = "PERSONA_HOST";

// CORS Configuration
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

// Upstream backend used by the proxy endpoints
pub const PERSONA_BACKEND_URL: &str = "PERSONA_BACKEND_URL";

// Backend used by direct (non-proxied) client calls
pub const PERSONA_API_URL: &str = "PERSONA_API_URL";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_BACKEND_URL: &str = "http://backend:8000";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_FILTER: &str = "info";
// Interactive commands keep request logging out of the prompts
pub const DEFAULT_CLI_LOG_FILTER: &str = "warn";
