#[cfg(feature = "with-serde")]
use serde::Serialize;

/// Outcome of one [`validate_email`](super::validate_email) call.
///
/// Exactly one of `domain` / `domain_literal` is set once the address parsed;
/// on a short-circuit (absent input, parse failure) only `is_valid` and
/// `issues` are filled.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// `username@domain` with the domain lower-cased, or `username@[literal]`.
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub address: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub comment_local_part_prefix: Option<String>,
    /// Local part as written, quotes included, comments excluded.
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub username: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub comment_local_part_suffix: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub comment_domain_prefix: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub domain: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub domain_literal: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub comment_domain_suffix: Option<String>,
    pub issues: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn rejected(issue: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            issues: vec![issue.into()],
            ..Self::default()
        }
    }

    pub(crate) fn push_issue(&mut self, issue: impl Into<String>) {
        self.is_valid = false;
        self.issues.push(issue.into());
    }
}

/// Value handed to [`validate_input`](super::validate_input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailInput<'a> {
    Absent,
    Text(&'a str),
    /// Anything other than a string; carries a type name for diagnostics.
    Other(&'static str),
}

impl<'a> From<&'a str> for EmailInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for EmailInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> From<Option<&'a str>> for EmailInput<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(Self::Absent, Self::Text)
    }
}

#[cfg(feature = "with-serde")]
impl<'a> From<&'a serde_json::Value> for EmailInput<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Absent,
            Value::String(text) => Self::Text(text),
            Value::Bool(_) => Self::Other("boolean"),
            Value::Number(_) => Self::Other("number"),
            Value::Array(_) => Self::Other("array"),
            Value::Object(_) => Self::Other("object"),
        }
    }
}

/// Answer of a custom hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookVerdict {
    Pass,
    /// Appended verbatim to the issues.
    Issue(String),
    /// Appends the generic "failed custom ... validation" issue.
    Fail,
}

impl From<bool> for HookVerdict {
    fn from(pass: bool) -> Self {
        if pass { Self::Pass } else { Self::Fail }
    }
}

impl From<String> for HookVerdict {
    fn from(issue: String) -> Self {
        Self::Issue(issue)
    }
}

impl From<&str> for HookVerdict {
    fn from(issue: &str) -> Self {
        Self::Issue(issue.to_string())
    }
}

impl From<Option<String>> for HookVerdict {
    fn from(issue: Option<String>) -> Self {
        issue.map_or(Self::Pass, Self::Issue)
    }
}

/// Answer of the result hook: a verdict applied to the (possibly edited)
/// result, or a replacement used as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultHookOutcome {
    Verdict(HookVerdict),
    Replace(ValidationResult),
}

impl From<()> for ResultHookOutcome {
    fn from(_: ()) -> Self {
        Self::Verdict(HookVerdict::Pass)
    }
}

impl From<HookVerdict> for ResultHookOutcome {
    fn from(verdict: HookVerdict) -> Self {
        Self::Verdict(verdict)
    }
}

impl From<bool> for ResultHookOutcome {
    fn from(pass: bool) -> Self {
        Self::Verdict(pass.into())
    }
}

impl From<String> for ResultHookOutcome {
    fn from(issue: String) -> Self {
        Self::Verdict(issue.into())
    }
}

impl From<&str> for ResultHookOutcome {
    fn from(issue: &str) -> Self {
        Self::Verdict(issue.into())
    }
}

impl From<ValidationResult> for ResultHookOutcome {
    fn from(result: ValidationResult) -> Self {
        Self::Replace(result)
    }
}
