//! Typed view over an `addr_spec` tree.
//!
//! The positional layout of each production is read here, once; callers get
//! named fields instead of walking `children[n]`.

use super::SyntaxNode;
use crate::grammar::RuleName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrSpec<'i> {
    pub local_part: LocalPart<'i>,
    pub domain: DomainPart<'i>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalPart<'i> {
    DotAtom(DotAtom<'i>),
    QuotedString(QuotedString<'i>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPart<'i> {
    DotAtom(DotAtom<'i>),
    Literal(DomainLiteral<'i>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotAtom<'i> {
    pub leading: Option<Cfws<'i>>,
    pub text: &'i str,
    pub trailing: Option<Cfws<'i>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedString<'i> {
    pub leading: Option<Cfws<'i>>,
    /// Quoted text, enclosing `"` included.
    pub text: &'i str,
    pub trailing: Option<Cfws<'i>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainLiteral<'i> {
    pub leading: Option<Cfws<'i>>,
    /// Text between the brackets, surrounding whitespace removed.
    pub text: &'i str,
    /// Text between the brackets as written.
    pub raw: &'i str,
    pub trailing: Option<Cfws<'i>>,
}

/// Comments and folding whitespace around a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cfws<'i> {
    pub text: &'i str,
    /// Comment bodies, parentheses stripped, in input order.
    pub comments: Vec<&'i str>,
}

impl<'i> AddrSpec<'i> {
    pub fn from_tree(root: &SyntaxNode, input: &'i str) -> Option<Self> {
        if !root.is_rule(RuleName::AddrSpec) {
            return None;
        }
        Some(Self {
            local_part: LocalPart::from_node(root.child(0)?, input)?,
            domain: DomainPart::from_node(root.child(2)?, input)?,
        })
    }
}

impl<'i> LocalPart<'i> {
    fn from_node(node: &SyntaxNode, input: &'i str) -> Option<Self> {
        let inner = node.child(0)?;
        if inner.is_rule(RuleName::DotAtom) {
            DotAtom::from_node(inner, input).map(Self::DotAtom)
        } else if inner.is_rule(RuleName::QuotedString) {
            QuotedString::from_node(inner, input).map(Self::QuotedString)
        } else {
            None
        }
    }

    /// Local part as written, comments excluded.
    pub fn text(&self) -> &'i str {
        match self {
            Self::DotAtom(atom) => atom.text,
            Self::QuotedString(quoted) => quoted.text,
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, Self::QuotedString(_))
    }

    pub fn leading(&self) -> Option<&Cfws<'i>> {
        match self {
            Self::DotAtom(atom) => atom.leading.as_ref(),
            Self::QuotedString(quoted) => quoted.leading.as_ref(),
        }
    }

    pub fn trailing(&self) -> Option<&Cfws<'i>> {
        match self {
            Self::DotAtom(atom) => atom.trailing.as_ref(),
            Self::QuotedString(quoted) => quoted.trailing.as_ref(),
        }
    }
}

impl<'i> DomainPart<'i> {
    fn from_node(node: &SyntaxNode, input: &'i str) -> Option<Self> {
        let inner = node.child(0)?;
        if inner.is_rule(RuleName::DotAtom) {
            DotAtom::from_node(inner, input).map(Self::DotAtom)
        } else if inner.is_rule(RuleName::DomainLiteral) {
            DomainLiteral::from_node(inner, input).map(Self::Literal)
        } else {
            None
        }
    }

    pub fn leading(&self) -> Option<&Cfws<'i>> {
        match self {
            Self::DotAtom(atom) => atom.leading.as_ref(),
            Self::Literal(literal) => literal.leading.as_ref(),
        }
    }

    pub fn trailing(&self) -> Option<&Cfws<'i>> {
        match self {
            Self::DotAtom(atom) => atom.trailing.as_ref(),
            Self::Literal(literal) => literal.trailing.as_ref(),
        }
    }
}

impl<'i> DotAtom<'i> {
    // [CFWS] dot_atom_text [CFWS]
    fn from_node(node: &SyntaxNode, input: &'i str) -> Option<Self> {
        Some(Self {
            leading: Cfws::from_optional(node.child(0)?, input),
            text: node.child(1)?.text(input),
            trailing: Cfws::from_optional(node.child(2)?, input),
        })
    }
}

impl<'i> QuotedString<'i> {
    // [CFWS] DQUOTE *([FWS] qcontent) [FWS] DQUOTE [CFWS]
    fn from_node(node: &SyntaxNode, input: &'i str) -> Option<Self> {
        let open = node.child(1)?;
        let close = node.child(4)?;
        Some(Self {
            leading: Cfws::from_optional(node.child(0)?, input),
            text: &input[open.start..close.end],
            trailing: Cfws::from_optional(node.child(5)?, input),
        })
    }

    /// Text between the quotes, quoted-pairs resolved.
    pub fn content(&self) -> String {
        let inner = &self.text[1..self.text.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => out.extend(chars.next()),
                other => out.push(other),
            }
        }
        out
    }
}

impl<'i> DomainLiteral<'i> {
    // [CFWS] "[" *([FWS] dtext) [FWS] "]" [CFWS]
    fn from_node(node: &SyntaxNode, input: &'i str) -> Option<Self> {
        let open = node.child(1)?;
        let close = node.child(4)?;
        let inner = &input[open.end..close.start];
        Some(Self {
            leading: Cfws::from_optional(node.child(0)?, input),
            text: inner.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n')),
            raw: inner,
            trailing: Cfws::from_optional(node.child(5)?, input),
        })
    }
}

impl<'i> Cfws<'i> {
    fn from_optional(node: &SyntaxNode, input: &'i str) -> Option<Self> {
        let cfws = node.child(0)?;
        let comments = cfws
            .find_all(RuleName::Comment)
            .into_iter()
            .map(|comment| &input[comment.start + 1..comment.end - 1])
            .collect();
        Some(Self {
            text: cfws.text(input),
            comments,
        })
    }

    /// Non-empty comment bodies joined by a space; `None` when nothing but
    /// whitespace and `()` was present.
    pub fn comment_text(&self) -> Option<String> {
        let comments: Vec<&str> = self
            .comments
            .iter()
            .copied()
            .filter(|comment| !comment.is_empty())
            .collect();
        (!comments.is_empty()).then(|| comments.join(" "))
    }
}
