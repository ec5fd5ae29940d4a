//! Declarative description of the RFC 5322 `addr-spec` grammar.
//!
//! Every production is a [`Rule`] tree stored under a stable [`RuleName`].
//! The grammar is built once, on first use, and shared read-only by every
//! parse ([`Grammar::addr_spec`]).

mod error;
mod rules;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub use error::UnknownRule;

/// Set of codepoints accepted by a [`Rule::Literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Char(char),
    /// Inclusive range.
    Range(char, char),
    /// Any character of the string.
    OneOf(&'static str),
}

impl CharClass {
    pub fn contains(&self, ch: char) -> bool {
        match *self {
            Self::Char(c) => c == ch,
            Self::Range(lo, hi) => (lo..=hi).contains(&ch),
            Self::OneOf(set) => set.contains(ch),
        }
    }
}

/// One production of the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Literal(CharClass),
    Sequence(Vec<Rule>),
    /// Ordered: the first alternative that lets the parse continue wins.
    Choice(Vec<Rule>),
    Optional(Box<Rule>),
    ZeroOrMore(Box<Rule>),
    OneOrMore(Box<Rule>),
    Reference(RuleName),
}

/// Stable names of the productions, spelled as in RFC 5322.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleName {
    AddrSpec,
    LocalPart,
    Domain,
    DotAtom,
    DotAtomText,
    Atext,
    DomainLiteral,
    Dtext,
    QuotedString,
    Qcontent,
    Qtext,
    QuotedPair,
    Comment,
    Ccontent,
    Ctext,
    Cfws,
    Fws,
    Crlf,
    Alpha,
    Digit,
    Utf8NonAscii,
    Dquote,
    Vchar,
    Wsp,
}

impl RuleName {
    pub const ALL: [RuleName; 24] = [
        Self::AddrSpec,
        Self::LocalPart,
        Self::Domain,
        Self::DotAtom,
        Self::DotAtomText,
        Self::Atext,
        Self::DomainLiteral,
        Self::Dtext,
        Self::QuotedString,
        Self::Qcontent,
        Self::Qtext,
        Self::QuotedPair,
        Self::Comment,
        Self::Ccontent,
        Self::Ctext,
        Self::Cfws,
        Self::Fws,
        Self::Crlf,
        Self::Alpha,
        Self::Digit,
        Self::Utf8NonAscii,
        Self::Dquote,
        Self::Vchar,
        Self::Wsp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddrSpec => "addr_spec",
            Self::LocalPart => "local_part",
            Self::Domain => "domain",
            Self::DotAtom => "dot_atom",
            Self::DotAtomText => "dot_atom_text",
            Self::Atext => "atext",
            Self::DomainLiteral => "domain_literal",
            Self::Dtext => "dtext",
            Self::QuotedString => "quoted_string",
            Self::Qcontent => "qcontent",
            Self::Qtext => "qtext",
            Self::QuotedPair => "quoted_pair",
            Self::Comment => "comment",
            Self::Ccontent => "ccontent",
            Self::Ctext => "ctext",
            Self::Cfws => "CFWS",
            Self::Fws => "FWS",
            Self::Crlf => "CRLF",
            Self::Alpha => "ALPHA",
            Self::Digit => "DIGIT",
            Self::Utf8NonAscii => "UTF8_NON_ASCII",
            Self::Dquote => "DQUOTE",
            Self::Vchar => "VCHAR",
            Self::Wsp => "WSP",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleName {
    type Err = UnknownRule;

    /// Accepts the RFC spelling with either `_` or `-` (`addr-spec`, `addr_spec`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownRule::new(s))
    }
}

/// The full production table, indexed by [`RuleName`].
#[derive(Debug)]
pub struct Grammar {
    rules: Vec<Rule>,
}

static ADDR_SPEC_GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::build);

impl Grammar {
    /// Process-wide grammar instance.
    pub fn addr_spec() -> &'static Grammar {
        &ADDR_SPEC_GRAMMAR
    }

    fn build() -> Self {
        let rules = RuleName::ALL.into_iter().map(rules::production).collect();
        Self { rules }
    }

    /// Ad-hoc grammar for engine tests; `rules` must follow [`RuleName::ALL`] order.
    #[cfg(test)]
    pub(crate) fn from_rules(rules: Vec<Rule>) -> Self {
        assert_eq!(rules.len(), RuleName::ALL.len());
        Self { rules }
    }

    pub fn rule(&self, name: RuleName) -> &Rule {
        &self.rules[name as usize]
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleName, &Rule)> {
        RuleName::ALL.into_iter().zip(self.rules.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references(rule: &Rule, out: &mut Vec<RuleName>) {
        match rule {
            Rule::Literal(_) => {}
            Rule::Sequence(items) | Rule::Choice(items) => {
                items.iter().for_each(|item| references(item, out))
            }
            Rule::Optional(inner) | Rule::ZeroOrMore(inner) | Rule::OneOrMore(inner) => {
                references(inner, out)
            }
            Rule::Reference(name) => out.push(*name),
        }
    }

    /// Walks the reference graph from `name`; any cycle would revisit `name`.
    fn reaches(grammar: &Grammar, from: RuleName, target: RuleName, seen: &mut Vec<RuleName>) -> bool {
        let mut refs = Vec::new();
        references(grammar.rule(from), &mut refs);
        refs.into_iter().any(|next| {
            if next == target {
                return true;
            }
            if seen.contains(&next) {
                return false;
            }
            seen.push(next);
            reaches(grammar, next, target, seen)
        })
    }

    #[test]
    fn table_is_indexed_by_name() {
        let grammar = Grammar::addr_spec();
        assert_eq!(grammar.rules().count(), RuleName::ALL.len());
        for (idx, name) in RuleName::ALL.iter().enumerate() {
            assert_eq!(*name as usize, idx);
        }
    }

    #[test]
    fn grammar_has_no_recursion() {
        let grammar = Grammar::addr_spec();
        for name in RuleName::ALL {
            assert!(
                !reaches(grammar, name, name, &mut Vec::new()),
                "{name} is recursive"
            );
        }
    }

    #[test]
    fn comment_does_not_nest() {
        let grammar = Grammar::addr_spec();
        let mut refs = Vec::new();
        references(grammar.rule(RuleName::Ccontent), &mut refs);
        assert!(!refs.contains(&RuleName::Comment));
    }

    #[test]
    fn names_round_trip() {
        for name in RuleName::ALL {
            assert_eq!(name.as_str().parse::<RuleName>().unwrap(), name);
        }
        assert_eq!("addr-spec".parse::<RuleName>().unwrap(), RuleName::AddrSpec);
        assert!("mailbox".parse::<RuleName>().is_err());
    }

    #[test]
    fn char_classes() {
        assert!(CharClass::Range('a', 'z').contains('q'));
        assert!(!CharClass::Range('a', 'z').contains('Q'));
        assert!(CharClass::OneOf(" \t").contains('\t'));
        assert!(CharClass::Char('@').contains('@'));
        assert!(CharClass::Range('\u{80}', char::MAX).contains('中'));
    }
}
