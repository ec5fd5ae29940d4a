use std::borrow::Cow;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

use super::ValidationConfig;
use super::messages;

static IPV4_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}(?:\.[0-9]{1,3}){3}$").expect("IPv4 pattern")
});

static TLD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z]{2,63}|xn--[a-z0-9-]{1,59})$").expect("TLD pattern")
});

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("label pattern")
});

/// Valide un domain literal (`[...]`) selon les options IPv4/IPv6.
pub(crate) fn check_domain_literal(
    literal: &str,
    config: &ValidationConfig,
    issues: &mut Vec<String>,
) {
    let ip = parse_literal(literal);

    if config.allow_any_domain_literal {
        let localhost =
            literal.eq_ignore_ascii_case("localhost") || ip.is_some_and(|ip| is_loopback(&ip));
        if localhost && !config.allow_localhost {
            issues.push(messages::LITERAL_LOCALHOST_ANY.to_string());
        }
        return;
    }

    if !config.allow_ipv4 && !config.allow_ipv6 {
        issues.push(messages::DOMAIN_LITERAL.to_string());
        return;
    }

    match ip {
        Some(IpAddr::V4(v4)) if config.allow_ipv4 => {
            if is_non_host(&v4) {
                issues.push(messages::LITERAL_NON_HOST.to_string());
            } else if v4.is_loopback() && !config.allow_localhost {
                issues.push(messages::LITERAL_LOCALHOST.to_string());
            }
        }
        Some(IpAddr::V6(v6)) if config.allow_ipv6 => {
            if is_loopback(&IpAddr::V6(v6)) && !config.allow_localhost {
                issues.push(messages::LITERAL_LOCALHOST.to_string());
            }
        }
        _ => issues.push(
            match (config.allow_ipv4, config.allow_ipv6) {
                (true, true) => messages::LITERAL_NOT_IP,
                (true, false) => messages::LITERAL_NOT_IPV4,
                _ => messages::LITERAL_NOT_IPV6,
            }
            .to_string(),
        ),
    }
}

/// Valide un nom de domaine: forme IPv4, localhost, TLD puis labels.
/// Push des raisons invalidantes dans `issues`.
pub(crate) fn check_domain_name(domain: &str, config: &ValidationConfig, issues: &mut Vec<String>) {
    let domain = domain.to_lowercase();

    if IPV4_LIKE.is_match(&domain) {
        if !config.allow_any_domain {
            issues.push(messages::DOMAIN_IPV4.to_string());
        }
        let loopback = domain.parse::<Ipv4Addr>().is_ok_and(|ip| ip.is_loopback());
        if loopback && !config.allow_localhost {
            issues.push(
                if config.allow_any_domain {
                    messages::DOMAIN_LOCALHOST_NAME
                } else {
                    messages::DOMAIN_LOCALHOST_ADDRESS
                }
                .to_string(),
            );
        }
        return;
    }

    if domain == "localhost" {
        if !config.allow_localhost {
            issues.push(messages::DOMAIN_LOCALHOST_NAME.to_string());
        }
        return;
    }

    let mut labels: Vec<&str> = domain.split('.').collect();
    let Some(tld) = labels.pop() else {
        return;
    };

    if !is_tld_name(tld) {
        issues.push(messages::TLD_NAMING.to_string());
    } else if !is_valid_label(tld) {
        issues.push(messages::invalid_label(tld));
    } else if !config.arbitrary_tlds && !config.allowed_tlds.contains(tld) {
        issues.push(messages::unknown_tld(tld));
    }

    for label in labels {
        if !is_valid_label(label) {
            issues.push(messages::invalid_label(label));
        }
    }
}

/// Domaines exclus: l'entrée et tous ses sous-domaines. Seule la première
/// entrée qui correspond est rapportée.
pub(crate) fn check_excluded_domains(
    domain: &str,
    config: &ValidationConfig,
    issues: &mut Vec<String>,
) {
    let domain = domain.to_lowercase();
    let excluded = config
        .exclude_domains
        .iter()
        .map(|entry| entry.trim().trim_start_matches('.').to_lowercase())
        .filter(|entry| !entry.is_empty())
        .find(|entry| {
            domain == *entry
                || domain
                    .strip_suffix(entry.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        });
    if let Some(entry) = excluded {
        issues.push(messages::excluded_domain(&entry));
    }
}

pub(crate) fn check_tld_only(domain: &str, issues: &mut Vec<String>) {
    if !domain.contains('.') {
        issues.push(messages::TLD_ONLY.to_string());
    }
}

/// IPv4 literal, or IPv6 with an optional RFC 5321 `IPv6:` tag.
fn parse_literal(literal: &str) -> Option<IpAddr> {
    if let Ok(v4) = literal.parse::<Ipv4Addr>() {
        return Some(IpAddr::V4(v4));
    }
    let v6 = match literal.get(..5) {
        Some(tag) if tag.eq_ignore_ascii_case("ipv6:") => &literal[5..],
        _ => literal,
    };
    v6.parse::<Ipv6Addr>().ok().map(IpAddr::V6)
}

fn is_loopback(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback(),
        IpAddr::V6(v6) => {
            v6.is_loopback() || v6.to_ipv4_mapped().is_some_and(|v4| v4.is_loopback())
        }
    }
}

/// `0.0.0.0/8`, multicast, reserved and broadcast ranges.
fn is_non_host(ip: &Ipv4Addr) -> bool {
    let first = ip.octets()[0];
    first == 0 || first >= 224
}

fn to_ascii(label: &str) -> Option<Cow<'_, str>> {
    if label.is_ascii() {
        Some(Cow::Borrowed(label))
    } else {
        idna::domain_to_ascii(label).ok().map(Cow::Owned)
    }
}

fn is_tld_name(tld: &str) -> bool {
    to_ascii(tld).is_some_and(|ascii| TLD_NAME.is_match(&ascii))
}

fn is_valid_label(label: &str) -> bool {
    to_ascii(label).is_some_and(|ascii| {
        ascii.len() <= 63
            && LABEL.is_match(&ascii)
            && !ascii.bytes().all(|b| b.is_ascii_digit())
            && (!ascii.starts_with("xn--") || is_a_label(&ascii))
    })
}

/// `xn--` label that decodes and encodes back to itself.
fn is_a_label(label: &str) -> bool {
    let (decoded, result) = idna::domain_to_unicode(label);
    result.is_ok()
        && decoded != label
        && idna::domain_to_ascii(&decoded).is_ok_and(|ascii| ascii == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_issues(domain: &str, config: &ValidationConfig) -> Vec<String> {
        let mut issues = vec![];
        check_domain_name(domain, config, &mut issues);
        issues
    }

    fn literal_issues(literal: &str, config: &ValidationConfig) -> Vec<String> {
        let mut issues = vec![];
        check_domain_literal(literal, config, &mut issues);
        issues
    }

    #[test]
    fn basic_domain_ok() {
        let issues = name_issues("example.com", &ValidationConfig::default());
        assert!(issues.is_empty(), "{:?}", issues);
    }

    #[test]
    fn label_too_long() {
        let long = "a".repeat(64);
        let issues = name_issues(&format!("{}.com", long), &ValidationConfig::default());
        assert_eq!(issues, vec![messages::invalid_label(&long)]);
    }

    #[test]
    fn label_rules() {
        assert!(is_valid_label("a-b"));
        assert!(is_valid_label("exämple"));
        assert!(is_valid_label(&"a".repeat(63)));
        assert!(!is_valid_label("-ab"));
        assert!(!is_valid_label("ab-"));
        assert!(!is_valid_label("123"));
        assert!(!is_valid_label("a_b"));
        assert!(is_valid_label("xn--bcher-kva"));
        assert!(!is_valid_label("xn--zz"));
    }

    #[test]
    fn tld_is_a_label_too() {
        let config = ValidationConfig {
            arbitrary_tlds: true,
            ..ValidationConfig::default()
        };
        for tld in ["xn--abc-", "xn--zz"] {
            assert_eq!(
                name_issues(&format!("bar.{tld}"), &config),
                vec![messages::invalid_label(tld)],
                "{tld}"
            );
        }
        assert!(name_issues("bar.xn--p1ai", &config).is_empty());
        assert!(name_issues("bar.рф", &config).is_empty());
    }

    #[test]
    fn tld_names() {
        assert!(is_tld_name("com"));
        assert!(is_tld_name("xn--11b4c3d"));
        assert!(is_tld_name("कॉम"));
        assert!(!is_tld_name("123"));
        assert!(!is_tld_name("c"));
    }

    #[test]
    fn uppercase_tld_is_known() {
        assert!(name_issues("BAR.COM", &ValidationConfig::default()).is_empty());
    }

    #[test]
    fn ipv6_tag_is_stripped() {
        let config = ValidationConfig {
            allow_ipv6: true,
            ..ValidationConfig::default()
        };
        assert!(literal_issues("IPv6:2001:db8::1", &config).is_empty());
        assert_eq!(
            literal_issues("IPv6:::1", &config),
            vec![messages::LITERAL_LOCALHOST]
        );
    }

    #[test]
    fn non_host_ranges() {
        let config = ValidationConfig {
            allow_ipv4: true,
            ..ValidationConfig::default()
        };
        for literal in ["0.1.2.3", "224.0.0.1", "255.255.255.255"] {
            assert_eq!(
                literal_issues(literal, &config),
                vec![messages::LITERAL_NON_HOST],
                "{literal}"
            );
        }
        assert!(literal_issues("192.0.2.1", &config).is_empty());
    }

    #[test]
    fn localhost_literal_with_any_literal() {
        let config = ValidationConfig {
            allow_any_domain_literal: true,
            ..ValidationConfig::default()
        };
        assert_eq!(
            literal_issues("localhost", &config),
            vec![messages::LITERAL_LOCALHOST_ANY]
        );
        assert!(literal_issues("whatever", &config).is_empty());
    }

    #[test]
    fn exclusion_is_suffix_closed() {
        let config = ValidationConfig::default().with_exclude_domains([".Foo.com"]);
        for (domain, excluded) in [
            ("foo.com", true),
            ("bar.foo.com", true),
            ("barfoo.com", false),
            ("foo.com.au", false),
        ] {
            let mut issues = vec![];
            check_excluded_domains(domain, &config, &mut issues);
            assert_eq!(!issues.is_empty(), excluded, "{domain}");
        }
    }
}
