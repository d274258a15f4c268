//! Client-side form validation.
//!
//! Checks run before any network call. All failing fields are collected so a
//! form can report everything at once.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("email pattern is valid")
});

/// Rule a field failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    Pattern,
    /// Must equal the named field
    Mismatch(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: Rule,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            Rule::Required => write!(f, "{} is required", self.field),
            Rule::Pattern => write!(f, "{} is not valid", self.field),
            Rule::Mismatch(other) => write!(f, "{} does not match {}", self.field, other),
        }
    }
}

/// Collected field failures for one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, rule: Rule) -> Self {
        let mut errors = Self::new();
        errors.push(field, rule);
        errors
    }

    pub fn push(&mut self, field: &'static str, rule: Rule) {
        self.errors.push(FieldError { field, rule });
    }

    /// Record `Required` when the trimmed value is empty. Returns whether the value is present.
    pub fn required(&mut self, field: &'static str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, Rule::Required);
            false
        } else {
            true
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if self.required(field, value) && !EMAIL_PATTERN.is_match(value.trim()) {
            self.push(field, Rule::Pattern);
        }
    }

    /// Cross-field equality check; only reported when the confirmation itself is present.
    pub fn matches(&mut self, field: &'static str, value: &str, other_field: &'static str, other: &str) {
        if self.required(field, value) && value != other {
            self.push(field, Rule::Mismatch(other_field));
        }
    }

    /// An email confirmation: required, then the email pattern, then equal to
    /// `other` once both are trimmed. Reports at most one rule.
    pub fn email_confirmation(
        &mut self,
        field: &'static str,
        value: &str,
        other_field: &'static str,
        other: &str,
    ) {
        let before = self.errors.len();
        self.email(field, value);
        if self.errors.len() == before && value.trim() != other.trim() {
            self.push(field, Rule::Mismatch(other_field));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}
