//! Odoo domain filter construction.
//!
//! An Odoo domain is a flat list mixing condition triples with prefix
//! operator tokens. The only combinator used here is binary OR: for N
//! conditions there are exactly N-1 `"|"` tokens, one immediately before
//! every condition except the last.
//!
//! ```text
//! []                       -> []
//! [a]                      -> [a]
//! [a, b]                   -> ["|", a, b]
//! [a, b, c]                -> ["|", a, "|", b, c]
//! ```

use serde::Serialize;
use serde_json::Value;

/// One term of a domain expression: a prefix operator token or a
/// `(field, operator, value)` condition triple.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainTerm {
    Operator(&'static str),
    Condition(String, &'static str, Value),
}

pub const OR: DomainTerm = DomainTerm::Operator("|");

pub fn condition(field: &str, op: &'static str, value: impl Into<Value>) -> DomainTerm {
    DomainTerm::Condition(field.to_string(), op, value.into())
}

/// Domain selecting `ir.model` rows by model name. Order-preserving,
/// duplicates permitted, never fails; an empty input yields an empty
/// domain (which Odoo reads as "match everything").
pub fn models_by_name<S: AsRef<str>>(names: &[S]) -> Vec<DomainTerm> {
    let clauses = names
        .iter()
        .map(|n| condition("model", "=", n.as_ref()))
        .collect();
    or_combine(clauses)
}

/// Combine condition clauses with prefix binary OR.
pub fn or_combine(clauses: Vec<DomainTerm>) -> Vec<DomainTerm> {
    if clauses.len() < 2 {
        return clauses;
    }
    let mut combined = Vec::with_capacity(2 * clauses.len() - 1);
    let mut rest = clauses.into_iter().peekable();
    while let Some(clause) = rest.next() {
        if rest.peek().is_some() {
            combined.push(OR);
        }
        combined.push(clause);
    }
    combined
}
