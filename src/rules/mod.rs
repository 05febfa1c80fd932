// src/rules/mod.rs

//! Bazel rule-definition files
//!
//! `BUILD.bazel` files are Starlark, but the tracker only needs a handful
//! of literal fields from each rule call: the rule kind, its `name`, an
//! optional `crate_name`, the `crate` a test binds to, and the raw `srcs`
//! selection. [`parse_rules`] recovers those without a real grammar and
//! the classifier decides whether a Cargo package already has Bazel
//! equivalents.
//!
//! # Example
//!
//! ```ignore
//! use bazel_progress::rules::{parse_rules, is_already_primary};
//!
//! let records = parse_rules(&std::fs::read_to_string("rs/types/BUILD.bazel")?);
//! if is_already_primary("ic-types", &records) {
//!     println!("ic-types has a rust_library");
//! }
//! ```

mod classify;
mod parser;

pub use classify::{is_already_primary, is_already_tested, normalize_package_name};
pub use parser::parse_rules;

use std::fmt;

/// Kind of a rule call, taken from the identifier that opens the block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleKind {
    RustLibrary,
    RustBinary,
    RustProcMacro,
    RustCanister,
    RustTest,
    RustTestSuite,
    /// Any other rule (`filegroup`, `genrule`, macros, ...)
    Other(String),
}

impl RuleKind {
    /// Map a rule identifier to its kind
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "rust_library" => Self::RustLibrary,
            "rust_binary" => Self::RustBinary,
            "rust_proc_macro" => Self::RustProcMacro,
            "rust_canister" => Self::RustCanister,
            "rust_test" => Self::RustTest,
            "rust_test_suite" => Self::RustTestSuite,
            other => Self::Other(other.to_string()),
        }
    }

    /// The identifier as written in the rule file
    pub fn as_str(&self) -> &str {
        match self {
            Self::RustLibrary => "rust_library",
            Self::RustBinary => "rust_binary",
            Self::RustProcMacro => "rust_proc_macro",
            Self::RustCanister => "rust_canister",
            Self::RustTest => "rust_test",
            Self::RustTestSuite => "rust_test_suite",
            Self::Other(name) => name,
        }
    }

    /// Library, binary, proc-macro or canister: a crate's primary target
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            Self::RustLibrary | Self::RustBinary | Self::RustProcMacro | Self::RustCanister
        )
    }

    /// `rust_test` or `rust_test_suite`
    pub fn is_test(&self) -> bool {
        matches!(self, Self::RustTest | Self::RustTestSuite)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finalized rule declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    pub kind: RuleKind,
    pub name: String,
    /// Explicit `crate_name`, when it differs from the rule name
    pub module_name: Option<String>,
    /// `crate = ":lib"` reference used by tests bound to another rule
    pub target_ref: Option<String>,
    /// Raw `srcs` text, either a `glob(...)` call or a literal list
    pub sources: Option<String>,
}

impl RuleRecord {
    /// Create a record with only a kind and name
    pub fn new(kind: RuleKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            module_name: None,
            target_ref: None,
            sources: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kind_round_trip_identifiers() {
        for ident in [
            "rust_library",
            "rust_binary",
            "rust_proc_macro",
            "rust_canister",
            "rust_test",
            "rust_test_suite",
            "filegroup",
        ] {
            assert_eq!(RuleKind::from_identifier(ident).as_str(), ident);
        }
    }

    #[test]
    fn test_rule_kind_classes() {
        assert!(RuleKind::RustCanister.is_primary());
        assert!(RuleKind::RustProcMacro.is_primary());
        assert!(!RuleKind::RustTest.is_primary());
        assert!(RuleKind::RustTestSuite.is_test());
        assert!(!RuleKind::Other("rust_doc".to_string()).is_test());
        assert!(!RuleKind::Other("rust_doc".to_string()).is_primary());
    }
}
