//! Backtracking interpreter over a [`Grammar`].
//!
//! Matching is written in continuation-passing style: every rule pushes the
//! node it matched onto `stack`, then hands the end position to `next`. When
//! `next` refuses, the rule pops its node and tries its next candidate
//! (the following alternative of a choice, one repetition fewer, the empty
//! branch of an optional). Repetitions collect their iterations in a loop, so
//! recursion depth follows grammar nesting and not the input length.

use super::types::{NodeKind, Reference, ReferenceRange, SyntaxNode};
use crate::grammar::{CharClass, Grammar, Rule, RuleName};

pub(crate) type Next<'n, 'g, 'i> = dyn FnMut(&mut Engine<'g, 'i>, usize) -> bool + 'n;

pub(crate) struct Engine<'g, 'i> {
    grammar: &'g Grammar,
    input: &'i str,
    lines: Option<LineIndex>,
    stack: Vec<SyntaxNode>,
    reach: usize,
}

impl<'g, 'i> Engine<'g, 'i> {
    pub(crate) fn new(grammar: &'g Grammar, input: &'i str, ref_mapping: bool) -> Self {
        Self {
            grammar,
            input,
            lines: ref_mapping.then(|| LineIndex::new(input)),
            stack: Vec::new(),
            reach: 0,
        }
    }

    /// Furthest byte offset any literal matched so far.
    pub(crate) fn reach(&self) -> usize {
        self.reach
    }

    /// Root left on the stack by an accepted match.
    pub(crate) fn take_root(&mut self) -> Option<SyntaxNode> {
        let root = self.stack.pop();
        self.stack.clear();
        root
    }

    /// Match `name` at offset 0, offering each candidate end to `accept`.
    pub(crate) fn start(&mut self, name: RuleName, accept: &mut Next<'_, 'g, 'i>) -> bool {
        self.stack.clear();
        self.reference(name, 0, accept)
    }

    fn run(&mut self, rule: &'g Rule, pos: usize, next: &mut Next<'_, 'g, 'i>) -> bool {
        match rule {
            Rule::Literal(class) => self.literal(class, pos, next),
            Rule::Sequence(items) => self.sequence(items, 0, pos, pos, next),
            Rule::Choice(alternatives) => {
                for alternative in alternatives {
                    if self.run(alternative, pos, next) {
                        return true;
                    }
                }
                false
            }
            Rule::Optional(inner) => self.optional(inner, pos, next),
            Rule::ZeroOrMore(inner) => self.repeat(inner, 0, pos, next),
            Rule::OneOrMore(inner) => self.repeat(inner, 1, pos, next),
            Rule::Reference(name) => self.reference(*name, pos, next),
        }
    }

    fn literal(&mut self, class: &CharClass, pos: usize, next: &mut Next<'_, 'g, 'i>) -> bool {
        let Some(ch) = self.input[pos..].chars().next() else {
            return false;
        };
        if !class.contains(ch) {
            return false;
        }
        let end = pos + ch.len_utf8();
        self.reach = self.reach.max(end);
        let node = self.node(NodeKind::Literal, pos, end, Vec::new());
        self.stack.push(node);
        if next(self, end) {
            return true;
        }
        self.stack.pop();
        false
    }

    fn sequence(
        &mut self,
        items: &'g [Rule],
        idx: usize,
        start: usize,
        pos: usize,
        next: &mut Next<'_, 'g, 'i>,
    ) -> bool {
        let Some(item) = items.get(idx) else {
            // all items matched: fold their nodes into one group
            self.wrap(NodeKind::Group, start, pos, items.len());
            if next(self, pos) {
                return true;
            }
            self.unwrap_last();
            return false;
        };
        self.run(item, pos, &mut |eng, end| {
            eng.sequence(items, idx + 1, start, end, next)
        })
    }

    fn optional(&mut self, inner: &'g Rule, pos: usize, next: &mut Next<'_, 'g, 'i>) -> bool {
        let matched = self.run(inner, pos, &mut |eng, end| {
            eng.wrap(NodeKind::Optional, pos, end, 1);
            if next(eng, end) {
                return true;
            }
            eng.unwrap_last();
            false
        });
        if matched {
            return true;
        }
        let empty = self.node(NodeKind::Optional, pos, pos, Vec::new());
        self.stack.push(empty);
        if next(self, pos) {
            return true;
        }
        self.stack.pop();
        false
    }

    /// Greedy repetition; on refusal, retries with one iteration fewer until
    /// `min` is reached.
    fn repeat(
        &mut self,
        inner: &'g Rule,
        min: usize,
        pos: usize,
        next: &mut Next<'_, 'g, 'i>,
    ) -> bool {
        let kind = if min == 0 {
            NodeKind::ZeroOrMore
        } else {
            NodeKind::OneOrMore
        };
        let base = self.stack.len();
        let mut cursor = pos;
        loop {
            let mut reached = None;
            let matched = self.run(inner, cursor, &mut |_, end| {
                reached = Some(end);
                true
            });
            let Some(end) = reached.filter(|_| matched) else {
                break;
            };
            if end == cursor {
                // zero-width iteration would loop forever
                self.stack.pop();
                break;
            }
            cursor = end;
        }

        let mut items = self.stack.split_off(base);
        loop {
            if items.len() < min {
                return false;
            }
            let end = items.last().map_or(pos, |item| item.end);
            let node = self.node(kind, pos, end, items);
            self.stack.push(node);
            if next(self, end) {
                return true;
            }
            items = match self.stack.pop() {
                Some(node) => node.children,
                None => return false,
            };
            if items.pop().is_none() {
                return false;
            }
        }
    }

    fn reference(&mut self, name: RuleName, pos: usize, next: &mut Next<'_, 'g, 'i>) -> bool {
        let grammar = self.grammar;
        let body = grammar.rule(name);
        // a sequence body lends its items to the named node directly
        let flatten = matches!(body, Rule::Sequence(_));
        self.run(body, pos, &mut |eng, end| {
            let Some(inner) = eng.stack.pop() else {
                return false;
            };
            let children = if flatten { inner.children } else { vec![inner] };
            let named = eng.node(NodeKind::Rule(name), pos, end, children);
            eng.stack.push(named);
            if next(eng, end) {
                return true;
            }
            if let Some(named) = eng.stack.pop() {
                let mut children = named.children;
                let inner = if flatten {
                    eng.node(NodeKind::Group, pos, end, children)
                } else {
                    match children.pop() {
                        Some(inner) => inner,
                        None => return false,
                    }
                };
                eng.stack.push(inner);
            }
            false
        })
    }

    fn node(&self, kind: NodeKind, start: usize, end: usize, children: Vec<SyntaxNode>) -> SyntaxNode {
        let reference = self.lines.as_ref().map(|lines| ReferenceRange {
            start: lines.locate(self.input, start),
            end: lines.locate(self.input, end),
        });
        SyntaxNode {
            kind,
            start,
            end,
            children,
            reference,
        }
    }

    fn wrap(&mut self, kind: NodeKind, start: usize, end: usize, count: usize) {
        let children = self.stack.split_off(self.stack.len() - count);
        let node = self.node(kind, start, end, children);
        self.stack.push(node);
    }

    fn unwrap_last(&mut self) {
        if let Some(node) = self.stack.pop() {
            self.stack.extend(node.children);
        }
    }
}

/// Byte offsets of line starts, for [`Reference`] computation.
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(input: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(input.match_indices('\n').map(|(idx, _)| idx + 1));
        Self { starts }
    }

    pub(crate) fn locate(&self, input: &str, offset: usize) -> Reference {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line.saturating_sub(1)];
        Reference {
            line,
            column: input[line_start..offset].chars().count() + 1,
            offset: input[..offset].chars().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::CharClass;

    fn grammar_with(addr_spec: Rule) -> Grammar {
        Grammar::from_rules(
            RuleName::ALL
                .into_iter()
                .map(|name| match name {
                    RuleName::AddrSpec => addr_spec.clone(),
                    RuleName::Alpha => Rule::Literal(CharClass::Range('a', 'z')),
                    _ => Rule::Literal(CharClass::Char('#')),
                })
                .collect(),
        )
    }

    fn full_match(grammar: &Grammar, input: &str) -> Option<SyntaxNode> {
        let mut engine = Engine::new(grammar, input, false);
        let len = input.len();
        if engine.start(RuleName::AddrSpec, &mut |_, end| end == len) {
            engine.take_root()
        } else {
            None
        }
    }

    #[test]
    fn repetition_gives_back_iterations() {
        // 1*ALPHA "z": the greedy run must release its last "z"
        let grammar = grammar_with(Rule::Sequence(vec![
            Rule::OneOrMore(Box::new(Rule::Reference(RuleName::Alpha))),
            Rule::Literal(CharClass::Char('z')),
        ]));
        let root = full_match(&grammar, "abz").expect("match");
        assert_eq!(root.count(), 2);
        assert_eq!(root.children[0].kind, NodeKind::OneOrMore);
        assert_eq!(root.children[0].count(), 2);
        assert_eq!((root.children[1].start, root.children[1].end), (2, 3));
    }

    #[test]
    fn choice_is_ordered_but_backtracks() {
        // ("a" / "ab") "c" only succeeds through the second alternative
        let grammar = grammar_with(Rule::Sequence(vec![
            Rule::Choice(vec![
                Rule::Literal(CharClass::Char('a')),
                Rule::Sequence(vec![
                    Rule::Literal(CharClass::Char('a')),
                    Rule::Literal(CharClass::Char('b')),
                ]),
            ]),
            Rule::Literal(CharClass::Char('c')),
        ]));
        let root = full_match(&grammar, "abc").expect("match");
        assert_eq!(root.children[0].kind, NodeKind::Group);
        assert!(full_match(&grammar, "ac").is_some());
        assert!(full_match(&grammar, "abd").is_none());
    }

    #[test]
    fn optional_falls_back_to_empty() {
        let grammar = grammar_with(Rule::Sequence(vec![
            Rule::Optional(Box::new(Rule::Reference(RuleName::Alpha))),
            Rule::Literal(CharClass::Range('a', 'z')),
        ]));
        let root = full_match(&grammar, "q").expect("match");
        let optional = &root.children[0];
        assert_eq!(optional.kind, NodeKind::Optional);
        assert_eq!(optional.count(), 0);
        assert_eq!((optional.start, optional.end), (0, 0));
    }

    #[test]
    fn reach_covers_abandoned_branches() {
        let grammar = grammar_with(Rule::Sequence(vec![
            Rule::OneOrMore(Box::new(Rule::Reference(RuleName::Alpha))),
            Rule::Literal(CharClass::Char('!')),
        ]));
        let mut engine = Engine::new(&grammar, "abcd?", false);
        assert!(!engine.start(RuleName::AddrSpec, &mut |_, _| true));
        assert_eq!(engine.reach(), 4);
    }

    #[test]
    fn line_index_counts_codepoints() {
        let input = "ab\nçd";
        let lines = LineIndex::new(input);
        let at = lines.locate(input, input.len());
        assert_eq!(at.line, 2);
        assert_eq!(at.column, 3);
        assert_eq!(at.offset, 5);
        assert_eq!(lines.locate(input, 0).column, 1);
    }
}
