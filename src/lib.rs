#![forbid(unsafe_code)]
//! addrspec_lib — parsing RFC 5322 `addr-spec` et validation d'adresses e-mail
//!
//! [`parse_address`] builds a syntax tree for an address; [`validate_email`]
//! runs the configurable policy checks on top of it and reports every issue.
//!
//! ```
//! use addrspec_lib::{ValidationConfig, validate_email};
//!
//! let result = validate_email("john.smith@google.com", &ValidationConfig::default());
//! assert!(result.is_valid);
//! assert_eq!(result.domain.as_deref(), Some("google.com"));
//! ```

#[cfg(not(feature = "with-tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "with-tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

pub mod grammar;
pub mod parser;
pub mod tld;
pub mod validator;

pub use grammar::{Grammar, RuleName, UnknownRule};
pub use parser::{AddrSpec, ParseError, ParseOptions, ParseSuccess, SyntaxNode, parse, parse_address};
pub use tld::{TldAllowList, TldSet};
#[cfg(feature = "with-serde")]
pub use validator::ConfigError;
pub use validator::{
    EmailInput, ExcludeChars, HookVerdict, ResultHookOutcome, ValidationConfig, ValidationResult,
    validate_email, validate_input,
};
