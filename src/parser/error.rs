use thiserror::Error;

use super::Reference;
use crate::grammar::RuleName;

/// No prefix of the input matches the target rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "input does not match '{}' (furthest match at line {}, column {})",
    .rule,
    .reach.line,
    .reach.column
)]
pub struct ParseError {
    pub rule: RuleName,
    pub reach: Reference,
    pub reach_bytes: usize,
}
