//! # Input Validation
//!
//! Validates data source inputs before any network call is made.

use regex::Regex;
use std::sync::LazyLock;

/// Azure resource group names: 1-90 of letters, digits, `_`, `-`, `.`, `(`, `)`
static RESOURCE_GROUP_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-\w.()]{1,90}$").expect("resource group regex is valid")
});

/// HCS managed application names
static SLUG_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-\da-zA-Z]{3,36}$").expect("slug regex is valid"));

/// Validate an Azure resource group name
///
/// # Errors
/// Returns a message describing the violated rule.
pub fn validate_resource_group_name(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("resource group name cannot be empty".to_string());
    }
    if value.chars().count() > 90 {
        return Err(format!(
            "resource group name must be at most 90 characters, got {}",
            value.chars().count()
        ));
    }
    if !RESOURCE_GROUP_NAME_REGEX.is_match(value) {
        return Err(format!(
            "invalid resource group name {value:?}: may only contain alphanumerics, underscores, parentheses, hyphens and periods"
        ));
    }
    if value.ends_with('.') {
        return Err(format!(
            "invalid resource group name {value:?}: cannot end with a period"
        ));
    }
    Ok(())
}

/// Validate a slug id: 3-36 ASCII letters, digits and hyphens
///
/// # Errors
/// Returns a message describing the violated rule.
pub fn validate_slug_id(value: &str) -> Result<(), String> {
    if SLUG_ID_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(format!(
            "invalid value {value:?}: must be 3-36 characters and contain only letters, digits and hyphens"
        ))
    }
}

/// Validate that a string is not empty
///
/// # Errors
/// Returns a message if the value is empty or only whitespace.
pub fn validate_string_not_empty(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("value cannot be empty".to_string())
    } else {
        Ok(())
    }
}

/// Validate a free-form ARM resource name used as one URL path segment
///
/// Any non-empty name is accepted except `.` and `..`, which URL parsing
/// collapses into the parent path even when percent-encoded.
///
/// # Errors
/// Returns a message if the value is empty or a dot segment.
pub fn validate_resource_name(value: &str) -> Result<(), String> {
    validate_string_not_empty(value)?;
    if matches!(value, "." | "..") {
        return Err(format!("invalid resource name {value:?}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_group_names_valid() {
        for name in ["rg", "my-rg", "my_rg.prod", "rg(1)", "a", "Ünïcode-rg"] {
            assert!(validate_resource_group_name(name).is_ok(), "{name}");
        }
        assert!(validate_resource_group_name(&"a".repeat(90)).is_ok());
    }

    #[test]
    fn test_resource_group_names_invalid() {
        for name in ["", "rg.", "rg name", "rg/x", "rg#1"] {
            assert!(validate_resource_group_name(name).is_err(), "{name}");
        }
        let err = validate_resource_group_name(&"a".repeat(91)).unwrap_err();
        assert!(err.contains("at most 90"));
    }

    #[test]
    fn test_slug_ids() {
        for slug in ["abc", "MyApp", "hcs-cluster-1", "a".repeat(36).as_str()] {
            assert!(validate_slug_id(slug).is_ok(), "{slug}");
        }
        for slug in ["", "ab", "my_app", "my app", "a".repeat(37).as_str()] {
            assert!(validate_slug_id(slug).is_err(), "{slug}");
        }
    }

    #[test]
    fn test_string_not_empty() {
        assert!(validate_string_not_empty("aks").is_ok());
        assert!(validate_string_not_empty("").is_err());
        assert!(validate_string_not_empty("   ").is_err());
    }

    #[test]
    fn test_resource_names() {
        for name in ["aks", "aks#x", "aks?x=1", "my aks", "a/b", "...", ".aks"] {
            assert!(validate_resource_name(name).is_ok(), "{name}");
        }
        for name in ["", " ", ".", ".."] {
            assert!(validate_resource_name(name).is_err(), "{name}");
        }
    }
}
