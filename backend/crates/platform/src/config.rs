//! Environment configuration helpers
//!
//! Small readers used by the binaries to build their config structs from
//! the process environment (after `dotenvy` has loaded `.env`).

use std::str::FromStr;

/// Process environment lookup, the usual source for the `env_*` readers
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read a variable, falling back to `default` when unset or blank
pub fn env_or(key: &str, default: &str) -> String {
    value_or(env_var(key), default)
}

/// Parse a variable, falling back to `default` when unset or unparsable
pub fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    parse_or(key, env_var(key), default)
}

/// Interpret a variable as a boolean flag, see [`parse_bool`]
pub fn env_bool(key: &str) -> Option<bool> {
    env_var(key).as_deref().and_then(parse_bool)
}

/// Comma-separated list, blanks dropped
pub fn env_list(key: &str, default: &str) -> Vec<String> {
    split_list(&env_or(key, default))
}

// ============================================================================
// Value parsing
// ============================================================================

/// Trimmed `raw`, or `default` when missing or blank
pub fn value_or(raw: Option<String>, default: &str) -> String {
    match raw {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Parsed `raw`, or `default` when missing or unparsable; `key` is for the log
pub fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable environment value");
            default
        }
    }
}

/// Accepts `1/true/yes/on` and `0/false/no/off` (case-insensitive).
/// Anything else is `None`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
