use crate::grammar::RuleName;

#[cfg(feature = "with-serde")]
use serde::Serialize;

/// What produced a [`SyntaxNode`]: a named rule or an anonymous grammar construct.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Rule(RuleName),
    /// Anonymous sequence, `(...)`.
    Group,
    /// `(...)?`
    Optional,
    /// `(...)*`
    ZeroOrMore,
    /// `(...)+`
    OneOrMore,
    /// A single matched character.
    Literal,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rule(name) => name.as_str(),
            Self::Group => "(...)",
            Self::Optional => "(...)?",
            Self::ZeroOrMore => "(...)*",
            Self::OneOrMore => "(...)+",
            Self::Literal => "literal",
        }
    }
}

/// Line/column position of an input offset. Lines and columns start at 1,
/// `offset` and `column` count codepoints.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reference {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRange {
    pub start: Reference,
    pub end: Reference,
}

/// One matched rule occurrence. `start..end` is a half-open span of UTF-8
/// byte offsets into the parsed input; children spans are ordered and nested
/// inside it.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub start: usize,
    pub end: usize,
    pub children: Vec<SyntaxNode>,
    pub reference: Option<ReferenceRange>,
}

/// Contents of a node: children for composite nodes, matched text for leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeValue<'n, 'i> {
    Children(&'n [SyntaxNode]),
    Text(&'i str),
}

impl SyntaxNode {
    pub fn count(&self) -> usize {
        self.children.len()
    }

    pub fn is_rule(&self, name: RuleName) -> bool {
        self.kind == NodeKind::Rule(name)
    }

    pub fn text<'i>(&self, input: &'i str) -> &'i str {
        &input[self.start..self.end]
    }

    pub fn value<'n, 'i>(&'n self, input: &'i str) -> NodeValue<'n, 'i> {
        match self.kind {
            NodeKind::Literal => NodeValue::Text(self.text(input)),
            _ => NodeValue::Children(&self.children),
        }
    }

    pub fn child(&self, idx: usize) -> Option<&SyntaxNode> {
        self.children.get(idx)
    }

    /// First node named `name` in depth-first order, `self` included.
    pub fn find(&self, name: RuleName) -> Option<&SyntaxNode> {
        if self.is_rule(name) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Every node named `name`, outermost first; matches are not searched inside.
    pub fn find_all(&self, name: RuleName) -> Vec<&SyntaxNode> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'n>(&'n self, name: RuleName, found: &mut Vec<&'n SyntaxNode>) {
        if self.is_rule(name) {
            found.push(self);
            return;
        }
        for child in &self.children {
            child.collect(name, found);
        }
    }
}

/// Successful parse of a target rule.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSuccess {
    pub root: SyntaxNode,
    /// Furthest position any attempt matched, abandoned branches included.
    pub reach: Reference,
    pub reach_bytes: usize,
    /// The rule matched a strict prefix of the input only.
    pub is_partial: bool,
}

/// Knobs for [`parse_with`](super::parse_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Attach a line/column [`ReferenceRange`] to every node.
    pub ref_mapping: bool,
}
