//! RFC 5322 §3.2 / §3.4.1 productions, with the RFC 6532 `UTF8_NON_ASCII`
//! extension folded into `atext`, `qtext`, `ctext` and `dtext`.
//!
//! Obsolete (`obs-*`) forms are not part of the grammar. `comment` is
//! flattened to one level: `ccontent` never refers back to `comment`.

use super::{CharClass, Rule, RuleName};

const ATEXT_PUNCTUATION: &str = "!#$%&'*+-/=?^_`{|}~";

fn r(name: RuleName) -> Rule {
    Rule::Reference(name)
}

fn ch(c: char) -> Rule {
    Rule::Literal(CharClass::Char(c))
}

fn range(lo: char, hi: char) -> Rule {
    Rule::Literal(CharClass::Range(lo, hi))
}

fn seq<const N: usize>(items: [Rule; N]) -> Rule {
    Rule::Sequence(items.into())
}

fn choice<const N: usize>(items: [Rule; N]) -> Rule {
    Rule::Choice(items.into())
}

fn opt(rule: Rule) -> Rule {
    Rule::Optional(Box::new(rule))
}

fn star(rule: Rule) -> Rule {
    Rule::ZeroOrMore(Box::new(rule))
}

fn plus(rule: Rule) -> Rule {
    Rule::OneOrMore(Box::new(rule))
}

pub(super) fn production(name: RuleName) -> Rule {
    use RuleName::*;

    match name {
        // local-part "@" domain
        AddrSpec => seq([r(LocalPart), ch('@'), r(Domain)]),
        LocalPart => choice([r(DotAtom), r(QuotedString)]),
        Domain => choice([r(DotAtom), r(DomainLiteral)]),

        DotAtom => seq([opt(r(Cfws)), r(DotAtomText), opt(r(Cfws))]),
        DotAtomText => seq([plus(r(Atext)), star(seq([ch('.'), plus(r(Atext))]))]),
        Atext => choice([
            r(Alpha),
            r(Digit),
            r(Utf8NonAscii),
            Rule::Literal(CharClass::OneOf(ATEXT_PUNCTUATION)),
        ]),

        // [CFWS] "[" *([FWS] dtext) [FWS] "]" [CFWS]
        DomainLiteral => seq([
            opt(r(Cfws)),
            ch('['),
            star(seq([opt(r(Fws)), r(Dtext)])),
            opt(r(Fws)),
            ch(']'),
            opt(r(Cfws)),
        ]),
        // %d33-90 / %d94-126, i.e. printable ASCII without "[", "]" and "\"
        Dtext => choice([range('\x21', '\x5a'), range('\x5e', '\x7e'), r(Utf8NonAscii)]),

        // [CFWS] DQUOTE *([FWS] qcontent) [FWS] DQUOTE [CFWS]
        QuotedString => seq([
            opt(r(Cfws)),
            r(Dquote),
            star(seq([opt(r(Fws)), r(Qcontent)])),
            opt(r(Fws)),
            r(Dquote),
            opt(r(Cfws)),
        ]),
        Qcontent => choice([r(Qtext), r(QuotedPair)]),
        Qtext => choice([
            ch('\x21'),
            range('\x23', '\x5b'),
            range('\x5d', '\x7e'),
            r(Utf8NonAscii),
        ]),
        QuotedPair => seq([ch('\\'), choice([r(Vchar), r(Wsp)])]),

        Comment => seq([
            ch('('),
            star(seq([opt(r(Fws)), r(Ccontent)])),
            opt(r(Fws)),
            ch(')'),
        ]),
        Ccontent => choice([r(Ctext), r(QuotedPair)]),
        Ctext => choice([
            range('\x21', '\x27'),
            range('\x2a', '\x5b'),
            range('\x5d', '\x7e'),
            r(Utf8NonAscii),
        ]),
        // (1*([FWS] comment) [FWS]) / FWS
        Cfws => choice([
            seq([plus(seq([opt(r(Fws)), r(Comment)])), opt(r(Fws))]),
            r(Fws),
        ]),
        // ([*WSP CRLF] 1*WSP)
        Fws => seq([opt(seq([star(r(Wsp)), r(Crlf)])), plus(r(Wsp))]),
        Crlf => seq([ch('\r'), ch('\n')]),

        Alpha => choice([range('A', 'Z'), range('a', 'z')]),
        Digit => range('0', '9'),
        Utf8NonAscii => range('\u{80}', char::MAX),
        Dquote => ch('"'),
        Vchar => range('\x21', '\x7e'),
        Wsp => Rule::Literal(CharClass::OneOf(" \t")),
    }
}
