//! Validation error accumulation
//!
//! Every parameter is validated; rejections are collected in detection order
//! instead of stopping at the first one.

use std::collections::HashMap;

use serde::Serialize;

use super::rules::FilterRule;
use super::validate::{validate, ValidationOutcome};
use crate::repository::FilterCondition;

/// One user-facing validation message, serialized as `{"message": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Ordered, append-only list of validation messages for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<ErrorMessage>);

impl ErrorList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(ErrorMessage {
            message: message.into(),
        });
    }

    /// Append every message of `other`, keeping its order
    pub fn append(&mut self, mut other: ErrorList) {
        self.0.append(&mut other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages in detection order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|error| error.message.as_str())
    }
}

/// Fold outcomes into a predicate set and the list of rejections
pub fn accumulate(
    outcomes: impl IntoIterator<Item = ValidationOutcome>,
) -> (Vec<FilterCondition>, ErrorList) {
    let mut filters = Vec::new();
    let mut errors = ErrorList::new();

    for outcome in outcomes {
        match outcome {
            ValidationOutcome::Accepted(condition) => filters.push(condition),
            ValidationOutcome::Rejected(message) => errors.push(message),
        }
    }

    (filters, errors)
}

/// Validate every registry rule against the request's query parameters
///
/// Rules are evaluated in registry order. Parameters not named by a rule are
/// ignored.
pub fn evaluate(
    params: &HashMap<String, String>,
    rules: &[FilterRule],
) -> (Vec<FilterCondition>, ErrorList) {
    accumulate(
        rules
            .iter()
            .filter_map(|rule| validate(params.get(rule.param).map(String::as_str), rule)),
    )
}
