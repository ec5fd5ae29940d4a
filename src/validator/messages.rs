//! Issue strings reported in [`ValidationResult::issues`](super::ValidationResult).

pub(crate) const NULL_INPUT: &str = "is null or undefined";
pub(crate) const NOT_A_STRING: &str = "is not type string";
pub(crate) const NOT_AN_ADDRESS: &str = "not recognized as a valid email address";
pub(crate) const PARTIAL_ADDRESS: &str = "parsed as a 'partial' address; perhaps you need double quotes (\") around the username (local part)";

pub(crate) const COMMENTS: &str = "contains disallowed comment(s)";

pub(crate) const DOMAIN_LITERAL: &str = "contains disallowed domain literal";
pub(crate) const LITERAL_NOT_IPV4: &str = "domain literal is not a valid IPV4 address";
pub(crate) const LITERAL_NOT_IPV6: &str = "domain literal is not a valid IPV6 address";
pub(crate) const LITERAL_NOT_IP: &str = "domain literal is not a valid IP address";
pub(crate) const LITERAL_NON_HOST: &str = "domain literal is in the format of an IPV4 address, but specifies a non-host address (such as a broadcast address)";
pub(crate) const LITERAL_LOCALHOST: &str = "domain literal is disallowed localhost address";
pub(crate) const LITERAL_LOCALHOST_ANY: &str = "domain literal is disallowed localhost address or name";

pub(crate) const DOMAIN_IPV4: &str =
    "domain appears to be an IPV4 address; must be a domain name or use domain literal";
pub(crate) const DOMAIN_LOCALHOST_ADDRESS: &str = "domain is disallowed localhost address";
pub(crate) const DOMAIN_LOCALHOST_NAME: &str = "domain is disallowed localhost name";
pub(crate) const TLD_NAMING: &str = "top-level domain does not adhere to TLD naming restrictions";
pub(crate) const TLD_ONLY: &str = "TLD only domains are not allowed";

pub(crate) const QUOTED_LOCAL_PART: &str = "uses disallowed quoted username/local part";
pub(crate) const NON_ASCII_LOCAL_PART: &str =
    "non-ASCII characters are not allowed in the username (local part) of the address";

pub(crate) const FAILED_INPUT_HOOK: &str = "failed custom input validation";
pub(crate) const FAILED_RESULT_HOOK: &str = "failed custom result validation";

pub(crate) fn local_part_too_long(bytes: usize) -> String {
    format!("the username/local part exceeds the maximum 64 bytes in length ({bytes} bytes)")
}

pub(crate) fn address_too_long(bytes: usize) -> String {
    format!("the email address exceeds the maximum of 254 bytes in length ({bytes} bytes)")
}

pub(crate) fn unknown_tld(tld: &str) -> String {
    format!("contains unknown TLD '{tld}'")
}

pub(crate) fn invalid_label(label: &str) -> String {
    format!("domain label '{label}' is not valid")
}

pub(crate) fn excluded_domain(entry: &str) -> String {
    format!("domain '*.{entry}' is excluded")
}

pub(crate) fn excluded_chars(excluded: &str) -> String {
    if excluded.chars().count() == 1 {
        format!("contains excluded character '{excluded}' in username")
    } else {
        format!("contains excluded character sequence '{excluded}' in username")
    }
}
