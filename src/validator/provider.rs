//! Local-part rules of large mailbox providers.

use phf::phf_map;

pub(crate) struct Provider {
    pub name: &'static str,
    /// Punctuation accepted besides ASCII letters and digits.
    pub punctuation: &'static str,
    pub allowed: &'static str,
}

static PROVIDERS: phf::Map<&'static str, Provider> = phf_map! {
    "google.com" => Provider {
        name: "Google",
        punctuation: "_'.+-",
        allowed: "letters (a-z), numbers (0-9), dashes (-), underscores (_), apostrophes ('), periods (.), and the plus sign (+) for plus addressing",
    },
    "hotmail.com" => Provider {
        name: "Hotmail",
        punctuation: "_.+-",
        allowed: "letters (a-z), numbers (0-9), dashes (-), underscores (_), periods (.), and the plus sign (+) for plus addressing",
    },
};

/// Provider owning `domain` or one of its parents.
pub(crate) fn lookup(domain: &str) -> Option<&'static Provider> {
    let domain = domain.to_lowercase();
    let mut rest = domain.as_str();
    loop {
        if let Some(provider) = PROVIDERS.get(rest) {
            return Some(provider);
        }
        rest = rest.split_once('.')?.1;
    }
}

pub(crate) fn check_provider(
    username: &str,
    quoted: bool,
    domain: &str,
    issues: &mut Vec<String>,
) {
    let Some(provider) = lookup(domain) else {
        return;
    };
    if quoted {
        issues.push(format!(
            "{} does not support quoted email addresses",
            provider.name
        ));
    } else if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || provider.punctuation.contains(c))
    {
        issues.push(format!(
            "{} email addresses may only contain {}.",
            provider.name, provider.allowed
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_subdomains_only() {
        assert_eq!(lookup("google.com").map(|p| p.name), Some("Google"));
        assert_eq!(lookup("mail.Google.COM").map(|p| p.name), Some("Google"));
        assert!(lookup("notgoogle.com").is_none());
        assert!(lookup("com").is_none());
    }

    #[test]
    fn apostrophe_only_for_google() {
        let mut issues = vec![];
        check_provider("o'neil", false, "google.com", &mut issues);
        assert!(issues.is_empty());
        check_provider("o'neil", false, "hotmail.com", &mut issues);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("Hotmail email addresses"));
    }
}
