//! Client-side form validation
//!
//! Every form is checked before a request is built, so invalid input never
//! reaches the network. Field rules live next to the form types in
//! [`crate::models`]; this module holds the shared checks.

use reqwest::Url;
use std::fmt;
use thiserror::Error;

/// A single rejected field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

/// All rejected fields of one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(ValidationError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Message for one field, if it was rejected
    pub fn field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing was rejected
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Forms that can be checked before submission
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Reject blank values
pub fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "is required");
    }
}

/// Reject values shorter than `min` characters (after trimming)
pub fn min_chars(errors: &mut ValidationErrors, field: &'static str, value: &str, min: usize) {
    if value.trim().chars().count() < min {
        errors.add(field, format!("must be at least {} characters", min));
    }
}

/// Reject values that are not `local@domain`
pub fn email(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "is required");
        return;
    }

    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        errors.add(field, "is not a valid email address");
    }
}

/// Accept an empty value or an absolute http(s) URL
pub fn url_or_empty(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {}
        _ => errors.add(field, "is not a valid URL"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        let mut errors = ValidationErrors::new();
        required(&mut errors, "name", "  ");
        required(&mut errors, "email", "a@b.c");
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.field("name"), Some("is required"));
    }

    #[test]
    fn test_min_chars_counts_characters() {
        let mut errors = ValidationErrors::new();
        min_chars(&mut errors, "name", "é", 2);
        min_chars(&mut errors, "other", "éé", 2);
        assert!(errors.field("name").is_some());
        assert!(errors.field("other").is_none());
    }

    #[test]
    fn test_email() {
        for valid in ["student@school.be", "a@b"] {
            let mut errors = ValidationErrors::new();
            email(&mut errors, "email", valid);
            assert!(errors.is_empty(), "{} should be valid", valid);
        }
        for invalid in ["student", "@school.be", "student@", "a b@c.d", "a@b@c"] {
            let mut errors = ValidationErrors::new();
            email(&mut errors, "email", invalid);
            assert!(!errors.is_empty(), "{} should be rejected", invalid);
        }
    }

    #[test]
    fn test_url_or_empty() {
        let mut errors = ValidationErrors::new();
        url_or_empty(&mut errors, "a", "");
        url_or_empty(&mut errors, "b", "https://github.com/student/repo");
        url_or_empty(&mut errors, "c", "github.com/student/repo");
        url_or_empty(&mut errors, "d", "ftp://files.example.org");
        assert!(errors.field("a").is_none());
        assert!(errors.field("b").is_none());
        assert_eq!(errors.field("c"), Some("is not a valid URL"));
        assert!(errors.field("d").is_some());
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "is required");
        errors.add("password", "Passwords do not match");
        assert_eq!(
            errors.to_string(),
            "name: is required; password: Passwords do not match"
        );
        assert!(errors.into_result().is_err());
    }
}
