//! The validators that are shared by every kind. Kubernetes itself would reject these values, but
//! checking them during validation gives a much better error message, pointing right at the
//! offending attribute.
use crate::diag::{AttributePath, Diagnostics};

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
const LABEL_VALUE_MAX_LENGTH: usize = 63;

lazy_static! {
    static ref DNS1123_SUBDOMAIN: Regex =
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap();
    static ref DNS1123_LABEL: Regex = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap();
    static ref QUALIFIED_NAME: Regex =
        Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// `metadata.name`: a DNS subdomain
    Name,
    /// `metadata.namespace`: a DNS label
    Namespace,
    /// `metadata.labels`: qualified names as keys, and short values
    Labels,
    /// `metadata.annotations`: qualified names as keys
    Annotations,
}

impl Validator {
    pub fn validate(&self, path: &AttributePath, value: &Value, diags: &mut Diagnostics) {
        match self {
            Validator::Name => validate_str(path, value, validate_name, diags),
            Validator::Namespace => validate_str(path, value, validate_namespace, diags),
            Validator::Labels => validate_map(path, value, true, diags),
            Validator::Annotations => validate_map(path, value, false, diags),
        }
    }
}

fn invalid_value(path: &AttributePath, message: String, diags: &mut Diagnostics) {
    diags.add_attribute_error(
        path,
        "Invalid Attribute Value",
        format!("Attribute {} {}", path, message),
    );
}

fn validate_str(
    path: &AttributePath,
    value: &Value,
    check: fn(&str) -> Result<(), String>,
    diags: &mut Diagnostics,
) {
    if let Some(s) = value.as_str() {
        if let Err(message) = check(s) {
            invalid_value(path, message, diags);
        }
    }
}

fn validate_map(path: &AttributePath, value: &Value, check_values: bool, diags: &mut Diagnostics) {
    let entries = match value.as_object() {
        Some(entries) => entries,
        None => return,
    };
    for (key, entry) in entries.iter() {
        let entry_path = path.key(key);
        if let Err(message) = validate_qualified_name(key) {
            invalid_value(&entry_path, format!("has an invalid key: {}", message), diags);
            continue;
        }
        if check_values {
            if let Some(Err(message)) = entry.as_str().map(validate_label_value) {
                invalid_value(&entry_path, message, diags);
            }
        }
    }
}

/// Object names must be non-empty DNS subdomains
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("must not be empty".to_owned());
    }
    validate_dns1123_subdomain(name)
}

/// Namespaces must be non-empty DNS labels
pub fn validate_namespace(namespace: &str) -> Result<(), String> {
    if namespace.is_empty() {
        return Err("must not be empty".to_owned());
    }
    if namespace.len() > DNS1123_LABEL_MAX_LENGTH {
        return Err(format!(
            "must be no more than {} characters, got: {}",
            DNS1123_LABEL_MAX_LENGTH,
            namespace.len()
        ));
    }
    if !DNS1123_LABEL.is_match(namespace) {
        return Err(format!(
            "must consist of lower case alphanumeric characters or '-', and must start and end with an alphanumeric character, got: {}",
            namespace
        ));
    }
    Ok(())
}

fn validate_dns1123_subdomain(value: &str) -> Result<(), String> {
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        return Err(format!(
            "must be no more than {} characters, got: {}",
            DNS1123_SUBDOMAIN_MAX_LENGTH,
            value.len()
        ));
    }
    if !DNS1123_SUBDOMAIN.is_match(value) {
        return Err(format!(
            "must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character, got: {}",
            value
        ));
    }
    Ok(())
}

/// Label and annotation keys are an optional DNS subdomain prefix and a name, separated by a '/'
pub fn validate_qualified_name(key: &str) -> Result<(), String> {
    let mut parts = key.splitn(3, '/');
    let (prefix, name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => (None, name),
        (Some(prefix), Some(name), None) => (Some(prefix), name),
        _ => {
            return Err(format!(
                "a qualified name may contain at most one '/', got: {}",
                key
            ))
        }
    };

    if let Some(prefix) = prefix {
        if prefix.is_empty() {
            return Err(format!("prefix part must not be empty, got: {}", key));
        }
        validate_dns1123_subdomain(prefix).map_err(|e| format!("prefix part {}", e))?;
    }

    if name.is_empty() {
        return Err(format!("name part must not be empty, got: {}", key));
    }
    if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        return Err(format!(
            "name part must be no more than {} characters, got: {}",
            QUALIFIED_NAME_MAX_LENGTH, key
        ));
    }
    if !QUALIFIED_NAME.is_match(name) {
        return Err(format!(
            "name part must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character, got: {}",
            key
        ));
    }
    Ok(())
}

/// Label values may be empty, otherwise they follow the same rules as the name part of a key
pub fn validate_label_value(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > LABEL_VALUE_MAX_LENGTH {
        return Err(format!(
            "must have values of no more than {} characters, got: {}",
            LABEL_VALUE_MAX_LENGTH, value
        ));
    }
    if !QUALIFIED_NAME.is_match(value) {
        return Err(format!(
            "must have values consisting of alphanumeric characters, '-', '_' or '.', got: {}",
            value
        ));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn names_must_be_dns_subdomains() {
        assert!(validate_name("mnist-training.v2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("Upper").is_err());
        assert!(validate_name("-leading").is_err());
        assert!(validate_name(&"a".repeat(254)).is_err());
        assert!(validate_name(&"a".repeat(253)).is_ok());
    }

    #[test]
    fn namespaces_must_be_dns_labels() {
        assert!(validate_namespace("kubedl-system").is_ok());
        assert!(validate_namespace("").is_err());
        assert!(validate_namespace("has.dots").is_err());
        assert!(validate_namespace(&"a".repeat(64)).is_err());
    }

    #[test]
    fn qualified_names_allow_an_optional_prefix() {
        assert!(validate_qualified_name("app").is_ok());
        assert!(validate_qualified_name("app.kubernetes.io/name").is_ok());
        assert!(validate_qualified_name("Some_Key.v1").is_ok());
        assert!(validate_qualified_name("/name").is_err());
        assert!(validate_qualified_name("prefix/").is_err());
        assert!(validate_qualified_name("a/b/c").is_err());
        assert!(validate_qualified_name("UPPER.io/name").is_err());
        assert!(validate_qualified_name("name-").is_err());
    }

    #[test]
    fn label_values_may_be_empty() {
        assert!(validate_label_value("").is_ok());
        assert!(validate_label_value("v1.2_3").is_ok());
        assert!(validate_label_value("has space").is_err());
        assert!(validate_label_value(&"a".repeat(64)).is_err());
    }

    #[test]
    fn annotation_values_are_not_restricted() {
        let path = AttributePath::root("metadata").attribute("annotations");
        let mut diags = Diagnostics::new();
        let value = json!({ "example.com/config": "{\"any\": \"thing at all\"}" });
        Validator::Annotations.validate(&path, &value, &mut diags);
        assert!(diags.is_empty());

        Validator::Labels.validate(&path, &value, &mut diags);
        assert_eq!(1, diags.len());
    }

    #[test]
    fn namespace_validator_reports_the_attribute_path() {
        let path = AttributePath::root("metadata").attribute("namespace");
        let mut diags = Diagnostics::new();
        Validator::Namespace.validate(&path, &json!(""), &mut diags);
        let diag = diags.iter().next().expect("expected a diagnostic");
        assert_eq!("Attribute metadata.namespace must not be empty", diag.detail);
        assert_eq!(Some(path), diag.attribute);
    }
}
