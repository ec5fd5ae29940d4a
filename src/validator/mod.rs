//! Validation Rule Engine: parses the input as an `addr-spec`, then applies
//! the policies of a [`ValidationConfig`] in a fixed order and collects every
//! violation as an issue string. Built-in checks never fail with `Err`.

mod domain;
#[cfg(feature = "with-serde")]
mod error;
mod local;
mod messages;
mod options;
mod provider;
mod types;

#[cfg(feature = "with-serde")]
pub use error::ConfigError;
pub use options::{ExcludeChars, InputHook, ResultHook, ValidationConfig};
pub use types::{EmailInput, HookVerdict, ResultHookOutcome, ValidationResult};

use crate::parser::{AddrSpec, Cfws, DomainPart, parse_address};

/// Validate `input` as an email address.
pub fn validate_email(input: &str, config: &ValidationConfig) -> ValidationResult {
    validate_input(input, config)
}

/// Same as [`validate_email`] for inputs that may be absent or not text.
pub fn validate_input<'a>(
    input: impl Into<EmailInput<'a>>,
    config: &ValidationConfig,
) -> ValidationResult {
    let input = match input.into() {
        EmailInput::Text(text) => text,
        EmailInput::Absent => {
            trace_debug!("rejected absent input");
            return ValidationResult::rejected(messages::NULL_INPUT);
        }
        EmailInput::Other(_) => {
            trace_debug!("rejected non-string input");
            return ValidationResult::rejected(messages::NOT_A_STRING);
        }
    };

    let parsed = match parse_address(input) {
        Ok(parsed) if parsed.is_partial => {
            trace_debug!(reach = parsed.reach_bytes, "rejected partial address");
            return ValidationResult::rejected(messages::PARTIAL_ADDRESS);
        }
        Ok(parsed) => parsed,
        Err(_) => {
            trace_debug!("rejected unparsable address");
            return ValidationResult::rejected(messages::NOT_AN_ADDRESS);
        }
    };
    let Some(spec) = parsed.addr_spec(input) else {
        return ValidationResult::rejected(messages::NOT_AN_ADDRESS);
    };

    let result = run_hooks(input, check_address(&spec, config), config);
    trace_debug!(
        is_valid = result.is_valid,
        issues = result.issues.len(),
        "validated address"
    );
    result
}

fn check_address(spec: &AddrSpec<'_>, config: &ValidationConfig) -> ValidationResult {
    let username = spec.local_part.text();
    let quoted = spec.local_part.is_quoted();
    let (domain, domain_literal) = match &spec.domain {
        DomainPart::DotAtom(atom) => (Some(atom.text), None),
        DomainPart::Literal(literal) => (None, Some(literal.text)),
    };
    let (address, raw_length) = match &spec.domain {
        DomainPart::DotAtom(atom) => (
            format!("{username}@{}", atom.text.to_lowercase()),
            username.len() + 1 + atom.text.len(),
        ),
        DomainPart::Literal(literal) => (
            format!("{username}@[{}]", literal.raw),
            username.len() + 3 + literal.raw.len(),
        ),
    };
    let [local_prefix, local_suffix, domain_prefix, domain_suffix] = [
        spec.local_part.leading(),
        spec.local_part.trailing(),
        spec.domain.leading(),
        spec.domain.trailing(),
    ]
    .map(|cfws| cfws.and_then(Cfws::comment_text));

    let mut issues = Vec::new();

    if !config.no_length_check {
        local::check_lengths(username, raw_length, &mut issues);
    }

    let has_comments = [&local_prefix, &local_suffix, &domain_prefix, &domain_suffix]
        .iter()
        .any(|comment| comment.is_some());
    if has_comments && !config.allow_comments {
        issues.push(messages::COMMENTS.to_string());
    }

    if let Some(literal) = domain_literal {
        domain::check_domain_literal(literal, config, &mut issues);
    }
    if let Some(domain) = domain {
        domain::check_domain_name(domain, config, &mut issues);
        domain::check_excluded_domains(domain, config, &mut issues);
    }

    local::check_excluded_chars(username, config, &mut issues);
    local::check_quoted(quoted, config, &mut issues);

    if let Some(domain) = domain {
        if !config.no_domain_specific_validation {
            provider::check_provider(username, quoted, domain, &mut issues);
        }
        if config.no_tld_only {
            domain::check_tld_only(domain, &mut issues);
        }
    }

    if config.no_non_ascii_local_part {
        local::check_non_ascii(username, &mut issues);
    }

    ValidationResult {
        is_valid: issues.is_empty(),
        address: Some(address),
        comment_local_part_prefix: local_prefix,
        username: Some(username.to_string()),
        comment_local_part_suffix: local_suffix,
        comment_domain_prefix: domain_prefix,
        domain: domain.map(str::to_string),
        domain_literal: domain_literal.map(str::to_string),
        comment_domain_suffix: domain_suffix,
        issues,
    }
}

/// Input hook first, then result hook; a replacement from the result hook
/// is returned untouched.
fn run_hooks(input: &str, mut result: ValidationResult, config: &ValidationConfig) -> ValidationResult {
    if let Some(hook) = &config.validate_input {
        let verdict = hook(input, config);
        apply_verdict(&mut result, verdict, messages::FAILED_INPUT_HOOK);
    }
    if let Some(hook) = &config.validate_result {
        match hook(&mut result, config) {
            ResultHookOutcome::Replace(replacement) => return replacement,
            ResultHookOutcome::Verdict(verdict) => {
                apply_verdict(&mut result, verdict, messages::FAILED_RESULT_HOOK)
            }
        }
    }
    result
}

fn apply_verdict(result: &mut ValidationResult, verdict: HookVerdict, fallback: &str) {
    match verdict {
        HookVerdict::Pass => {}
        HookVerdict::Issue(issue) => result.push_issue(issue),
        HookVerdict::Fail => result.push_issue(fallback),
    }
}
