//! Top-level domain allow-lists.
//!
//! [`TldAllowList::Iana`] uses a compiled-in snapshot of the IANA registry;
//! [`TldSet`] holds a caller-supplied list (for example one refreshed from
//! <https://data.iana.org/TLD/tlds-alpha-by-domain.txt> and parsed with
//! [`TldSet::from_iana_list`]). Both are immutable once handed to the
//! validator and compare case-insensitively. Internationalized TLDs are
//! stored in both their decoded and `xn--` forms.

mod iana;

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use iana::IANA_TLDS;

/// Decoded forms of the `xn--` entries of the snapshot, computed on first use.
static IANA_DECODED: LazyLock<HashSet<String>> = LazyLock::new(|| {
    IANA_TLDS
        .iter()
        .filter_map(|tld| alternate_form(tld))
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TldSet {
    entries: HashSet<String>,
}

impl TldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the IANA registry text: one TLD per line, `#` comments and blank
    /// lines ignored.
    pub fn from_iana_list(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    pub fn insert(&mut self, tld: &str) {
        let Some(tld) = normalize(tld) else {
            return;
        };
        if let Some(alternate) = alternate_form(&tld) {
            self.entries.insert(alternate);
        }
        self.entries.insert(tld);
    }

    pub fn contains(&self, tld: &str) -> bool {
        normalize(tld).is_some_and(|tld| self.entries.contains(&tld))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for tld in iter {
            set.insert(tld.as_ref());
        }
        set
    }
}

impl<S: AsRef<str>> From<Vec<S>> for TldSet {
    fn from(list: Vec<S>) -> Self {
        list.into_iter().collect()
    }
}

impl From<&[&str]> for TldSet {
    fn from(list: &[&str]) -> Self {
        list.iter().collect()
    }
}

impl From<HashSet<String>> for TldSet {
    fn from(set: HashSet<String>) -> Self {
        set.into_iter().collect()
    }
}

/// Object form: keys mapped to `true` are allowed.
impl From<HashMap<String, bool>> for TldSet {
    fn from(map: HashMap<String, bool>) -> Self {
        map.into_iter()
            .filter_map(|(tld, allowed)| allowed.then_some(tld))
            .collect()
    }
}

/// TLDs accepted by the domain-name policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TldAllowList {
    #[default]
    Iana,
    Custom(TldSet),
}

impl TldAllowList {
    pub fn contains(&self, tld: &str) -> bool {
        match self {
            Self::Iana => normalize(tld).is_some_and(|tld| {
                IANA_TLDS.contains(tld.as_str())
                    || IANA_DECODED.contains(&tld)
                    || alternate_form(&tld).is_some_and(|ascii| IANA_TLDS.contains(ascii.as_str()))
            }),
            Self::Custom(set) => set.contains(tld),
        }
    }
}

impl From<TldSet> for TldAllowList {
    fn from(set: TldSet) -> Self {
        Self::Custom(set)
    }
}

impl<S: AsRef<str>> From<Vec<S>> for TldAllowList {
    fn from(list: Vec<S>) -> Self {
        Self::Custom(list.into())
    }
}

impl From<&[&str]> for TldAllowList {
    fn from(list: &[&str]) -> Self {
        Self::Custom(list.into())
    }
}

impl From<HashMap<String, bool>> for TldAllowList {
    fn from(map: HashMap<String, bool>) -> Self {
        Self::Custom(map.into())
    }
}

fn normalize(tld: &str) -> Option<String> {
    let tld = tld.trim().trim_start_matches('.');
    (!tld.is_empty()).then(|| tld.to_lowercase())
}

/// `xn--` label to Unicode, Unicode label to `xn--`; `None` for plain ASCII.
fn alternate_form(tld: &str) -> Option<String> {
    if tld.starts_with("xn--") {
        let (decoded, result) = idna::domain_to_unicode(tld);
        result.ok().filter(|_| decoded != tld).map(|_| decoded.to_lowercase())
    } else if !tld.is_ascii() {
        idna::domain_to_ascii(tld).ok()
    } else {
        None
    }
}

#[cfg(feature = "with-serde")]
mod serde_impl {
    use std::collections::HashMap;

    use serde::{Deserialize, Deserializer};

    use super::{TldAllowList, TldSet};

    /// Array or `{ "tld": true }` object.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TldListRepr {
        List(Vec<String>),
        Map(HashMap<String, bool>),
    }

    impl<'de> Deserialize<'de> for TldSet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match TldListRepr::deserialize(deserializer)? {
                TldListRepr::List(list) => list.into(),
                TldListRepr::Map(map) => map.into(),
            })
        }
    }

    impl<'de> Deserialize<'de> for TldAllowList {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            TldSet::deserialize(deserializer).map(TldAllowList::Custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iana_list_is_lowercased() {
        let set = TldSet::from_iana_list("FOO\nBAR\n");
        assert!(set.contains("foo"));
        assert!(set.contains("bar"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn iana_list_ignores_comments() {
        let set = TldSet::from_iana_list(
            "# Version 2024010100, Last Updated Mon Jan  1 07:07:01 2024 UTC\nFOO\n\nBAR\n",
        );
        assert_eq!(set.len(), 2);
        assert!(!set.iter().any(|tld| tld.starts_with('#')));
    }

    #[test]
    fn iana_list_decodes_idn() {
        let set = TldSet::from_iana_list("XN--11B4C3D");
        assert!(set.contains("कॉम"));
        assert!(set.contains("xn--11b4c3d"));
    }

    #[test]
    fn unicode_entries_gain_ascii_form() {
        let set: TldSet = vec!["рф"].into();
        assert!(set.contains("xn--p1ai"));
        assert!(set.contains("РФ"));
    }

    #[test]
    fn object_form_keeps_true_keys() {
        let map = HashMap::from([("notatld".to_string(), true), ("off".to_string(), false)]);
        let set = TldSet::from(map);
        assert!(set.contains("notatld"));
        assert!(!set.contains("off"));
    }

    #[test]
    fn snapshot_lookup_is_case_insensitive() {
        let list = TldAllowList::default();
        assert!(list.contains("com"));
        assert!(list.contains("COM"));
        assert!(list.contains("xn--11b4c3d"));
        assert!(list.contains("कॉम"));
        assert!(!list.contains("notatld"));
        assert!(!list.contains("localhost"));
    }

    #[test]
    fn custom_list_replaces_snapshot() {
        let list = TldAllowList::from(vec!["notatld"]);
        assert!(list.contains("NotATld"));
        assert!(!list.contains("com"));
    }
}
