//! Declarative per-endpoint filter rules

/// Rejection messages for a numeric range-or-max parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeMessages {
    /// Single token that is not an integer
    pub not_integer: &'static str,
    /// Two tokens that are not integers, or `max <= min`
    pub not_range: &'static str,
    /// Three or more tokens
    pub too_many: &'static str,
}

/// How a parameter is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Literal `true` or `false`, compared for equality
    ExactBool {
        /// Message for any other present value
        message: &'static str,
    },
    /// Non-empty text passed through verbatim as a LIKE pattern
    FuzzyText,
    /// `max` becomes `<= max`; `min,max` becomes an inclusive BETWEEN
    NumericRangeOrMax(RangeMessages),
}

/// One accepted query parameter and the column it filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRule {
    /// Query parameter name
    pub param: &'static str,
    /// Interpretation of the raw value
    pub kind: RuleKind,
    /// Column the resulting predicate applies to
    pub target: &'static str,
}

impl FilterRule {
    /// Create a rule
    pub const fn new(param: &'static str, kind: RuleKind, target: &'static str) -> Self {
        Self {
            param,
            kind,
            target,
        }
    }
}

/// Parameters accepted by `GET /students`, in evaluation order
pub const STUDENT_FILTERS: &[FilterRule] = &[
    FilterRule::new("firstName", RuleKind::FuzzyText, "firstName"),
    FilterRule::new("lastName", RuleKind::FuzzyText, "lastName"),
    FilterRule::new(
        "lefty",
        RuleKind::ExactBool {
            message: "Lefty should be either true or false",
        },
        "leftHanded",
    ),
];

/// Parameters accepted by `GET /classrooms`, in evaluation order
pub const CLASSROOM_FILTERS: &[FilterRule] = &[
    FilterRule::new("name", RuleKind::FuzzyText, "name"),
    FilterRule::new(
        "studentLimit",
        RuleKind::NumericRangeOrMax(RangeMessages {
            not_integer: "Student Limit should be an integer",
            not_range: "Student Limit should be two numbers: min,max",
            too_many: "Student Limit should be two or less numbers: max or min,max",
        }),
        "studentLimit",
    ),
];
