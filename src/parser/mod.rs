//! Parser Engine over the [`grammar`](crate::grammar) definition.
//!
//! The public entry points are [`parse_address`] (target `addr_spec`) and
//! [`parse`] / [`parse_with`] for any named production. A failed parse is a
//! [`ParseError`] value carrying the furthest position reached; an input
//! whose strict prefix matches is reported as a success with `is_partial`.

mod addr;
mod engine;
mod error;
mod types;

pub use addr::{AddrSpec, Cfws, DomainLiteral, DomainPart, DotAtom, LocalPart, QuotedString};
pub use error::ParseError;
pub use types::{
    NodeKind, NodeValue, ParseOptions, ParseSuccess, Reference, ReferenceRange, SyntaxNode,
};

use engine::{Engine, LineIndex};

use crate::grammar::{Grammar, RuleName};

/// Parse `input` as an RFC 5322 `addr-spec`.
pub fn parse_address(input: &str) -> Result<ParseSuccess, ParseError> {
    parse(RuleName::AddrSpec, input)
}

pub fn parse(rule: RuleName, input: &str) -> Result<ParseSuccess, ParseError> {
    parse_with(rule, input, ParseOptions::default())
}

pub fn parse_with(
    rule: RuleName,
    input: &str,
    options: ParseOptions,
) -> Result<ParseSuccess, ParseError> {
    let mut engine = Engine::new(Grammar::addr_spec(), input, options.ref_mapping);
    let len = input.len();

    let mut prefix_end = None;
    let complete = engine.start(rule, &mut |_, end| {
        if end == len {
            return true;
        }
        prefix_end.get_or_insert(end);
        false
    });

    // a match covering only a prefix is replayed to rebuild its tree
    let outcome = if complete {
        Some(false)
    } else if let Some(stop) = prefix_end {
        engine.start(rule, &mut |_, end| end == stop).then_some(true)
    } else {
        None
    };

    let reach_bytes = engine.reach();
    let reach = LineIndex::new(input).locate(input, reach_bytes);

    match outcome.and_then(|partial| engine.take_root().map(|root| (root, partial))) {
        Some((root, is_partial)) => {
            trace_debug!(%rule, is_partial, reach_bytes, "parse matched");
            Ok(ParseSuccess {
                root,
                reach,
                reach_bytes,
                is_partial,
            })
        }
        None => {
            trace_debug!(%rule, reach_bytes, "parse failed");
            Err(ParseError {
                rule,
                reach,
                reach_bytes,
            })
        }
    }
}

impl ParseSuccess {
    /// Typed view of an `addr_spec` root; `None` for other target rules.
    pub fn addr_spec<'i>(&self, input: &'i str) -> Option<AddrSpec<'i>> {
        AddrSpec::from_tree(&self.root, input)
    }
}
