//! Query parameter filters
//!
//! Each list endpoint owns a static registry of [`FilterRule`]s. A single
//! generic [`validate`] turns one raw parameter into a predicate or a
//! rejection message, and [`evaluate`] folds a whole request's parameters into
//! a predicate set plus an [`ErrorList`] without stopping at the first failure.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use roster_service::filters::{evaluate, STUDENT_FILTERS};
//!
//! let params = HashMap::from([
//!     ("lastName".to_string(), "Al%".to_string()),
//!     ("lefty".to_string(), "sometimes".to_string()),
//! ]);
//! let (filters, errors) = evaluate(&params, STUDENT_FILTERS);
//! assert_eq!(filters.len(), 1);
//! assert_eq!(errors.messages().next(), Some("Lefty should be either true or false"));
//! ```

mod accumulate;
mod rules;
mod validate;

pub use accumulate::{accumulate, evaluate, ErrorList, ErrorMessage};
pub use rules::{FilterRule, RangeMessages, RuleKind, CLASSROOM_FILTERS, STUDENT_FILTERS};
pub use validate::{validate, ValidationOutcome};
