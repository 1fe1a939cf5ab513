//! Table-driven request validation.
//!
//! Each request type declares a static rule table: one row per constrained
//! field, holding the wire name, an accessor and the ordered rules. Rules run
//! in order and the first failing rule is the field's only violation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty.
    Required,
    /// At least N characters.
    Min(usize),
    /// At most N characters.
    Max(usize),
}

impl Rule {
    pub fn tag(self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
        }
    }

    pub fn param(self) -> Option<usize> {
        match self {
            Rule::Required => None,
            Rule::Min(n) | Rule::Max(n) => Some(n),
        }
    }

    fn is_satisfied_by(self, value: &str) -> bool {
        match self {
            Rule::Required => !value.is_empty(),
            Rule::Min(n) => value.chars().count() >= n,
            Rule::Max(n) => value.chars().count() <= n,
        }
    }
}

/// One rule-table row.
pub struct FieldRules<T> {
    pub field: &'static str,
    pub value: fn(&T) -> &str,
    pub rules: &'static [Rule],
    /// Secret values are never echoed back in a violation.
    pub secret: bool,
}

/// A single failed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub error: bool,
    pub field: String,
    pub tag: String,
    pub param: Option<String>,
    pub value: Value,
}

impl Violation {
    fn new(field: &str, rule: Rule, value: Value) -> Self {
        Self {
            error: true,
            field: field.to_string(),
            tag: rule.tag().to_string(),
            param: rule.param().map(|n| n.to_string()),
            value,
        }
    }
}

pub trait Validate: Sized + 'static {
    fn rule_table() -> &'static [FieldRules<Self>];

    fn validate(&self) -> Vec<Violation> {
        validate(self)
    }
}

/// Run `req`'s rule table. An empty vector means the request is valid.
pub fn validate<T: Validate>(req: &T) -> Vec<Violation> {
    T::rule_table()
        .iter()
        .filter_map(|row| {
            let value = (row.value)(req);
            row.rules
                .iter()
                .copied()
                .find(|rule| !rule.is_satisfied_by(value))
                .map(|rule| {
                    let echoed = if row.secret {
                        Value::Null
                    } else {
                        Value::String(value.to_string())
                    };
                    Violation::new(row.field, rule, echoed)
                })
        })
        .collect()
}
