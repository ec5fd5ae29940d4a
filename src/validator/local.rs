use super::ValidationConfig;
use super::messages;

/// Caractères exclus du local part: chaque entrée trouvée est rapportée,
/// `no_plus_emails` ajoute `+`.
pub(crate) fn check_excluded_chars(
    username: &str,
    config: &ValidationConfig,
    issues: &mut Vec<String>,
) {
    let mut entries = config.exclude_chars.entries();
    if config.no_plus_emails && !entries.iter().any(|entry| entry == "+") {
        entries.push("+".into());
    }
    for entry in entries {
        if username.contains(&*entry) {
            issues.push(messages::excluded_chars(&entry));
        }
    }
}

pub(crate) fn check_quoted(quoted: bool, config: &ValidationConfig, issues: &mut Vec<String>) {
    if quoted && !config.allow_quoted_local_part {
        issues.push(messages::QUOTED_LOCAL_PART.to_string());
    }
}

pub(crate) fn check_non_ascii(username: &str, issues: &mut Vec<String>) {
    if !username.is_ascii() {
        issues.push(messages::NON_ASCII_LOCAL_PART.to_string());
    }
}

/// Octets UTF-8, pas de caractères.
/// `address_len`: bytes of `local@domain` or `local@[literal]` as written.
pub(crate) fn check_lengths(username: &str, address_len: usize, issues: &mut Vec<String>) {
    if username.len() > 64 {
        issues.push(messages::local_part_too_long(username.len()));
    }
    if address_len > 254 {
        issues.push(messages::address_too_long(address_len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excluded(username: &str, config: &ValidationConfig) -> Vec<String> {
        let mut issues = vec![];
        check_excluded_chars(username, config, &mut issues);
        issues
    }

    #[test]
    fn plus_is_not_reported_twice() {
        let config = ValidationConfig {
            no_plus_emails: true,
            ..ValidationConfig::default()
        }
        .with_exclude_chars("+");
        assert_eq!(excluded("a+b", &config).len(), 1);
    }

    #[test]
    fn sequences_need_the_whole_entry() {
        let config = ValidationConfig::default().with_exclude_chars(vec!["#%"]);
        assert!(excluded("a#b%", &config).is_empty());
        assert_eq!(
            excluded("a#%", &config),
            vec!["contains excluded character sequence '#%' in username"]
        );
    }

    #[test]
    fn lengths_are_bytes() {
        let mut issues = vec![];
        let username = "é".repeat(33);
        check_lengths(&username, 70, &mut issues);
        assert_eq!(
            issues,
            vec!["the username/local part exceeds the maximum 64 bytes in length (66 bytes)"]
        );
    }
}
