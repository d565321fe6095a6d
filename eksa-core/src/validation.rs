//! Kubernetes naming rules
//!
//! Object names, namespaces, label and annotation keys all follow the
//! syntax enforced by the Kubernetes API server. Manifests that break these
//! rules are rejected at apply time, so they are checked before rendering.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a DNS-1123 subdomain (object names, key prefixes)
pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

/// Maximum length of a DNS-1123 label (namespaces)
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;

/// Maximum length of the name part of a qualified key, and of label values
pub const QUALIFIED_NAME_MAX_LENGTH: usize = 63;

const DNS1123_LABEL_FMT: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?";
const QUALIFIED_NAME_FMT: &str = "([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]";

static DNS1123_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}$", DNS1123_LABEL_FMT)).unwrap());

static DNS1123_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "^{}(\\.{})*$",
        DNS1123_LABEL_FMT, DNS1123_LABEL_FMT
    ))
    .unwrap()
});

static QUALIFIED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}$", QUALIFIED_NAME_FMT)).unwrap());

/// Validate an object name (DNS-1123 subdomain)
pub fn validate_dns1123_subdomain(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        return Err(format!(
            "must be no more than {} characters, got {}",
            DNS1123_SUBDOMAIN_MAX_LENGTH,
            value.len()
        ));
    }
    if !DNS1123_SUBDOMAIN.is_match(value) {
        return Err(format!(
            "'{}' must consist of lower case alphanumeric characters, '-' or '.', \
             and must start and end with an alphanumeric character",
            value
        ));
    }
    Ok(())
}

/// Validate a namespace (DNS-1123 label)
pub fn validate_dns1123_label(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.len() > DNS1123_LABEL_MAX_LENGTH {
        return Err(format!(
            "must be no more than {} characters, got {}",
            DNS1123_LABEL_MAX_LENGTH,
            value.len()
        ));
    }
    if !DNS1123_LABEL.is_match(value) {
        return Err(format!(
            "'{}' must consist of lower case alphanumeric characters or '-', \
             and must start and end with an alphanumeric character",
            value
        ));
    }
    Ok(())
}

/// Validate a label or annotation key (`[prefix/]name`)
pub fn validate_qualified_name(key: &str) -> Result<(), String> {
    let name = match key.split_once('/') {
        Some((prefix, name)) => {
            if prefix.is_empty() {
                return Err(format!("'{}': prefix part must not be empty", key));
            }
            validate_dns1123_subdomain(prefix)
                .map_err(|e| format!("'{}': prefix part {}", key, e))?;
            name
        }
        None => key,
    };

    if name.is_empty() {
        return Err(format!("'{}': name part must not be empty", key));
    }
    if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        return Err(format!(
            "'{}': name part must be no more than {} characters",
            key, QUALIFIED_NAME_MAX_LENGTH
        ));
    }
    if !QUALIFIED_NAME.is_match(name) {
        return Err(format!(
            "'{}': name part must consist of alphanumeric characters, '-', '_' or '.', \
             and must start and end with an alphanumeric character",
            key
        ));
    }
    Ok(())
}

/// Validate a label value (may be empty)
pub fn validate_label_value(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > QUALIFIED_NAME_MAX_LENGTH {
        return Err(format!(
            "'{}' must be no more than {} characters",
            value, QUALIFIED_NAME_MAX_LENGTH
        ));
    }
    if !QUALIFIED_NAME.is_match(value) {
        return Err(format!(
            "'{}' must consist of alphanumeric characters, '-', '_' or '.', \
             and must start and end with an alphanumeric character",
            value
        ));
    }
    Ok(())
}
