use serde::{Deserialize, Serialize};

/// Boolean combinator for a [`Query`]'s terms (spec.md §4.6).
///
/// Parsing from a raw string is case-insensitive; anything other than
/// `"AND"` is treated as `Or`, matching the reference engine's
/// `operator.upper()` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Or,
    And,
}

impl Operator {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("and") {
            Operator::And
        } else {
            Operator::Or
        }
    }
}

impl Default for Operator {
    fn default() -> Self {
        Operator::Or
    }
}

/// A boolean term query: raw (not yet analyzed) terms plus a combinator.
#[derive(Debug, Clone)]
pub struct Query {
    pub terms: Vec<String>,
    pub operator: Operator,
}

impl Query {
    pub fn new(terms: Vec<String>, operator: Operator) -> Self {
        Self { terms, operator }
    }

    pub fn or(terms: Vec<String>) -> Self {
        Self::new(terms, Operator::Or)
    }

    pub fn and(terms: Vec<String>) -> Self {
        Self::new(terms, Operator::And)
    }
}
