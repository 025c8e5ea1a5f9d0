//! Parameter validation against a single rule

use super::rules::{FilterRule, RangeMessages, RuleKind};
use crate::repository::FilterCondition;

/// Result of checking one present parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The value produced a predicate
    Accepted(FilterCondition),
    /// The value broke the rule; carries the user-facing message
    Rejected(String),
}

/// Validate one raw parameter value
///
/// Returns `None` when the rule contributes nothing: the parameter is absent,
/// or it is an empty fuzzy-text or range value. An empty `ExactBool` value is
/// present and therefore rejected.
///
/// # Example
///
/// ```rust
/// use roster_service::filters::{validate, ValidationOutcome, CLASSROOM_FILTERS};
///
/// let limit = &CLASSROOM_FILTERS[1];
/// assert!(matches!(validate(Some("5,10"), limit), Some(ValidationOutcome::Accepted(_))));
/// assert!(matches!(validate(Some("5,5"), limit), Some(ValidationOutcome::Rejected(_))));
/// assert_eq!(validate(None, limit), None);
/// ```
pub fn validate(raw: Option<&str>, rule: &FilterRule) -> Option<ValidationOutcome> {
    let raw = raw?;

    match rule.kind {
        RuleKind::ExactBool { message } => Some(match raw {
            "true" => ValidationOutcome::Accepted(FilterCondition::eq(rule.target, true)),
            "false" => ValidationOutcome::Accepted(FilterCondition::eq(rule.target, false)),
            _ => ValidationOutcome::Rejected(message.to_string()),
        }),
        RuleKind::FuzzyText if raw.is_empty() => None,
        RuleKind::FuzzyText => Some(ValidationOutcome::Accepted(FilterCondition::like(
            rule.target,
            raw,
        ))),
        RuleKind::NumericRangeOrMax(_) if raw.is_empty() => None,
        RuleKind::NumericRangeOrMax(messages) => Some(range_or_max(raw, rule.target, messages)),
    }
}

fn parse_integer(token: &str) -> Option<i64> {
    token.trim().parse().ok()
}

fn range_or_max(raw: &str, target: &'static str, messages: RangeMessages) -> ValidationOutcome {
    let tokens: Vec<&str> = raw.split(',').collect();

    match tokens.as_slice() {
        [max] => match parse_integer(max) {
            Some(max) => ValidationOutcome::Accepted(FilterCondition::lte(target, max)),
            None => ValidationOutcome::Rejected(messages.not_integer.to_string()),
        },
        [min, max] => match (parse_integer(min), parse_integer(max)) {
            (Some(min), Some(max)) if max > min => {
                ValidationOutcome::Accepted(FilterCondition::between(target, min, max))
            }
            _ => ValidationOutcome::Rejected(messages.not_range.to_string()),
        },
        _ => ValidationOutcome::Rejected(messages.too_many.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{CLASSROOM_FILTERS, STUDENT_FILTERS};
    use crate::repository::{FilterOperator, FilterValue};

    fn rule(registry: &'static [FilterRule], param: &str) -> &'static FilterRule {
        registry.iter().find(|rule| rule.param == param).unwrap()
    }

    fn rejected(outcome: Option<ValidationOutcome>) -> String {
        match outcome {
            Some(ValidationOutcome::Rejected(message)) => message,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    fn accepted(outcome: Option<ValidationOutcome>) -> FilterCondition {
        match outcome {
            Some(ValidationOutcome::Accepted(condition)) => condition,
            other => panic!("expected predicate, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_bool() {
        let lefty = rule(STUDENT_FILTERS, "lefty");

        let condition = accepted(validate(Some("true"), lefty));
        assert_eq!(condition, FilterCondition::eq("leftHanded", true));

        let condition = accepted(validate(Some("false"), lefty));
        assert_eq!(condition.value, FilterValue::Boolean(false));

        assert_eq!(
            rejected(validate(Some("yes"), lefty)),
            "Lefty should be either true or false"
        );
        assert_eq!(validate(None, lefty), None);
    }

    #[test]
    fn test_exact_bool_is_case_sensitive_and_rejects_empty() {
        let lefty = rule(STUDENT_FILTERS, "lefty");
        rejected(validate(Some("True"), lefty));
        rejected(validate(Some(""), lefty));
    }

    #[test]
    fn test_fuzzy_text_passes_value_verbatim() {
        let first_name = rule(STUDENT_FILTERS, "firstName");
        let condition = accepted(validate(Some("C%"), first_name));
        assert_eq!(condition.operator, FilterOperator::Like);
        assert_eq!(condition.value, FilterValue::String("C%".to_string()));

        let condition = accepted(validate(Some(" Cam "), first_name));
        assert_eq!(condition.value, FilterValue::String(" Cam ".to_string()));
    }

    #[test]
    fn test_fuzzy_text_empty_adds_nothing() {
        assert_eq!(validate(Some(""), rule(STUDENT_FILTERS, "lastName")), None);
    }

    #[test]
    fn test_range_single_token_is_max() {
        let limit = rule(CLASSROOM_FILTERS, "studentLimit");
        let condition = accepted(validate(Some("7"), limit));
        assert_eq!(condition, FilterCondition::lte("studentLimit", 7_i64));

        assert_eq!(
            rejected(validate(Some("abc"), limit)),
            "Student Limit should be an integer"
        );
        assert_eq!(
            rejected(validate(Some("7.5"), limit)),
            "Student Limit should be an integer"
        );
    }

    #[test]
    fn test_range_two_tokens_requires_strictly_increasing() {
        let limit = rule(CLASSROOM_FILTERS, "studentLimit");
        let condition = accepted(validate(Some("5,10"), limit));
        assert_eq!(condition, FilterCondition::between("studentLimit", 5, 10));

        for raw in ["10,5", "5,5", "5,x", "5,"] {
            assert_eq!(
                rejected(validate(Some(raw), limit)),
                "Student Limit should be two numbers: min,max",
                "{raw}"
            );
        }
    }

    #[test]
    fn test_range_three_tokens_rejected() {
        let limit = rule(CLASSROOM_FILTERS, "studentLimit");
        assert_eq!(
            rejected(validate(Some("1,2,3"), limit)),
            "Student Limit should be two or less numbers: max or min,max"
        );
    }

    #[test]
    fn test_range_empty_adds_nothing() {
        assert_eq!(validate(Some(""), rule(CLASSROOM_FILTERS, "studentLimit")), None);
    }
}
