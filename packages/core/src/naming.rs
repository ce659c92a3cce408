// ABOUTME: Name normalization required by the downstream backend
// ABOUTME: Lowercases names and collapses whitespace runs into single underscores

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Request body is missing a 'name' field")]
    MissingName,

    #[error("Field 'name' must be a string")]
    NameNotString,
}

/// Lowercase the name and replace every run of whitespace with one underscore.
///
/// Already-normalized names come back unchanged.
pub fn normalize_name(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "_")
        .into_owned()
}

/// Normalize the `name` field of a JSON request body in place
pub fn normalize_name_field(body: &mut Value) -> Result<String, NamingError> {
    let object = body.as_object_mut().ok_or(NamingError::NotAnObject)?;
    let name = object.get_mut("name").ok_or(NamingError::MissingName)?;

    let normalized = match name {
        Value::String(raw) => normalize_name(raw),
        _ => return Err(NamingError::NameNotString),
    };

    *name = Value::String(normalized.clone());
    Ok(normalized)
}
