use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Deserializer};

use super::types::{HookVerdict, ResultHookOutcome, ValidationResult};
use crate::tld::TldAllowList;

/// Called with the raw input once the built-in checks ran.
pub type InputHook = Arc<dyn Fn(&str, &ValidationConfig) -> HookVerdict + Send + Sync>;

/// Called with the assembled result; may edit it in place or replace it.
pub type ResultHook =
    Arc<dyn Fn(&mut ValidationResult, &ValidationConfig) -> ResultHookOutcome + Send + Sync>;

/// Characters or sequences refused in the local part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExcludeChars {
    #[default]
    None,
    /// Every character of the string is checked on its own.
    Chars(String),
    /// Every entry is checked as a whole.
    Sequences(Vec<String>),
}

impl ExcludeChars {
    pub(crate) fn entries(&self) -> Vec<Cow<'_, str>> {
        match self {
            Self::None => Vec::new(),
            Self::Chars(chars) => chars.chars().map(|c| Cow::Owned(c.to_string())).collect(),
            Self::Sequences(list) => list
                .iter()
                .filter(|entry| !entry.is_empty())
                .map(|entry| Cow::Borrowed(entry.as_str()))
                .collect(),
        }
    }
}

impl From<&str> for ExcludeChars {
    fn from(chars: &str) -> Self {
        Self::Chars(chars.to_string())
    }
}

impl From<String> for ExcludeChars {
    fn from(chars: String) -> Self {
        Self::Chars(chars)
    }
}

impl<S: Into<String>> From<Vec<S>> for ExcludeChars {
    fn from(list: Vec<S>) -> Self {
        Self::Sequences(list.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for ExcludeChars {
    fn from(list: &[&str]) -> Self {
        Self::Sequences(list.iter().map(|entry| entry.to_string()).collect())
    }
}

/// Options of one validation call. Every field is independent; the default
/// is the strictest setting with the IANA TLD list.
#[cfg_attr(feature = "with-serde", derive(Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default, rename_all = "camelCase"))]
#[derive(Clone, Default)]
pub struct ValidationConfig {
    pub allow_comments: bool,
    /// Accept domain names that look like IPv4 addresses.
    pub allow_any_domain: bool,
    /// Accept any domain literal, IP or not.
    pub allow_any_domain_literal: bool,
    #[cfg_attr(feature = "with-serde", serde(rename = "allowIPV4"))]
    pub allow_ipv4: bool,
    #[cfg_attr(feature = "with-serde", serde(rename = "allowIPV6"))]
    pub allow_ipv6: bool,
    pub allow_localhost: bool,
    pub allow_quoted_local_part: bool,
    #[cfg_attr(
        feature = "with-serde",
        serde(rename = "allowedTLDs", deserialize_with = "null_as_default")
    )]
    pub allowed_tlds: TldAllowList,
    /// Skip the allow-list lookup; TLD naming rules still apply.
    #[cfg_attr(feature = "with-serde", serde(rename = "arbitraryTLDs"))]
    pub arbitrary_tlds: bool,
    pub exclude_chars: ExcludeChars,
    /// Each entry also excludes its subdomains.
    #[cfg_attr(feature = "with-serde", serde(deserialize_with = "null_as_default"))]
    pub exclude_domains: Vec<String>,
    pub no_domain_specific_validation: bool,
    pub no_length_check: bool,
    pub no_plus_emails: bool,
    #[cfg_attr(feature = "with-serde", serde(rename = "noTLDOnly"))]
    pub no_tld_only: bool,
    #[cfg_attr(feature = "with-serde", serde(rename = "noNonASCIILocalPart"))]
    pub no_non_ascii_local_part: bool,
    #[cfg_attr(feature = "with-serde", serde(skip))]
    pub validate_input: Option<InputHook>,
    #[cfg_attr(feature = "with-serde", serde(skip))]
    pub validate_result: Option<ResultHook>,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_hook<F, V>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &ValidationConfig) -> V + Send + Sync + 'static,
        V: Into<HookVerdict>,
    {
        self.validate_input = Some(Arc::new(
            move |input: &str, config: &ValidationConfig| -> HookVerdict {
                hook(input, config).into()
            },
        ));
        self
    }

    pub fn with_result_hook<F, R>(mut self, hook: F) -> Self
    where
        F: Fn(&mut ValidationResult, &ValidationConfig) -> R + Send + Sync + 'static,
        R: Into<ResultHookOutcome>,
    {
        self.validate_result = Some(Arc::new(
            move |result: &mut ValidationResult, config: &ValidationConfig| -> ResultHookOutcome {
                hook(result, config).into()
            },
        ));
        self
    }

    pub fn with_allowed_tlds(mut self, tlds: impl Into<TldAllowList>) -> Self {
        self.allowed_tlds = tlds.into();
        self
    }

    pub fn with_exclude_chars(mut self, chars: impl Into<ExcludeChars>) -> Self {
        self.exclude_chars = chars.into();
        self
    }

    pub fn with_exclude_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Read a config from its JSON form (`{"allowIPV4": true, ...}`).
    /// Hooks are never part of it.
    #[cfg(feature = "with-serde")]
    pub fn from_json(json: &str) -> Result<Self, super::ConfigError> {
        serde_json::from_str(json).map_err(super::ConfigError::json)
    }
}

impl fmt::Debug for ValidationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hook = |present: bool| if present { Some("<fn>") } else { None };
        f.debug_struct("ValidationConfig")
            .field("allow_comments", &self.allow_comments)
            .field("allow_any_domain", &self.allow_any_domain)
            .field("allow_any_domain_literal", &self.allow_any_domain_literal)
            .field("allow_ipv4", &self.allow_ipv4)
            .field("allow_ipv6", &self.allow_ipv6)
            .field("allow_localhost", &self.allow_localhost)
            .field("allow_quoted_local_part", &self.allow_quoted_local_part)
            .field("allowed_tlds", &self.allowed_tlds)
            .field("arbitrary_tlds", &self.arbitrary_tlds)
            .field("exclude_chars", &self.exclude_chars)
            .field("exclude_domains", &self.exclude_domains)
            .field(
                "no_domain_specific_validation",
                &self.no_domain_specific_validation,
            )
            .field("no_length_check", &self.no_length_check)
            .field("no_plus_emails", &self.no_plus_emails)
            .field("no_tld_only", &self.no_tld_only)
            .field("no_non_ascii_local_part", &self.no_non_ascii_local_part)
            .field("validate_input", &hook(self.validate_input.is_some()))
            .field("validate_result", &hook(self.validate_result.is_some()))
            .finish()
    }
}

#[cfg(feature = "with-serde")]
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// String (per character), array (per entry) or `null`.
#[cfg(feature = "with-serde")]
impl<'de> Deserialize<'de> for ExcludeChars {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Chars(String),
            Sequences(Vec<String>),
        }

        Ok(match Option::<Repr>::deserialize(deserializer)? {
            None => Self::None,
            Some(Repr::Chars(chars)) => Self::Chars(chars),
            Some(Repr::Sequences(list)) => Self::Sequences(list),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_excludes_each_char() {
        let chars = ExcludeChars::from("#%");
        assert_eq!(chars.entries(), vec!["#", "%"]);
    }

    #[test]
    fn list_excludes_whole_entries() {
        let chars = ExcludeChars::from(vec!["#%", ""]);
        assert_eq!(chars.entries(), vec!["#%"]);
    }

    #[test]
    fn debug_hides_hooks() {
        let config = ValidationConfig::new().with_input_hook(|_, _| true);
        let shown = format!("{config:?}");
        assert!(shown.contains("validate_input: Some(\"<fn>\")"));
        assert!(shown.contains("validate_result: None"));
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn json_option_names() {
        let config = ValidationConfig::from_json(
            r##"{
                "allowIPV4": true,
                "allowedTLDs": { "notatld": true },
                "excludeChars": "#%",
                "excludeDomains": null,
                "noTLDOnly": true,
                "noNonASCIILocalPart": true
            }"##,
        )
        .expect("config");
        assert!(config.allow_ipv4);
        assert!(!config.allow_ipv6);
        assert!(config.allowed_tlds.contains("notatld"));
        assert_eq!(config.exclude_chars, ExcludeChars::Chars("#%".into()));
        assert!(config.exclude_domains.is_empty());
        assert!(config.no_tld_only);
        assert!(config.no_non_ascii_local_part);
        assert!(config.validate_input.is_none());
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn json_null_and_lists() {
        let config =
            ValidationConfig::from_json(r#"{"excludeChars": null, "allowedTLDs": ["foo"]}"#)
                .expect("config");
        assert_eq!(config.exclude_chars, ExcludeChars::None);
        assert!(config.allowed_tlds.contains("FOO"));
        assert!(!config.allowed_tlds.contains("com"));

        let config = ValidationConfig::from_json(r##"{"excludeChars": ["#%"]}"##).expect("config");
        assert_eq!(config.exclude_chars, ExcludeChars::Sequences(vec!["#%".into()]));

        assert!(ValidationConfig::from_json(r#"{"allowIPV4": "yes"}"#).is_err());
    }
}
