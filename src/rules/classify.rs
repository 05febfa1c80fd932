// src/rules/classify.rs

//! Decide whether a Cargo package already has Bazel targets
//!
//! Cargo package names use hyphens (`ic-crypto-sha`), Bazel crate names use
//! underscores (`ic_crypto_sha`). Both sides are normalized before comparing.

use super::RuleRecord;

/// Directory prefixes that mark a self-contained integration test rule
const TEST_DIR_MARKERS: [&str; 2] = ["tests/", "test/"];

/// Replace every hyphen with an underscore
pub fn normalize_package_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Does this primary rule build the given (normalized) package?
fn builds_package(record: &RuleRecord, normalized: &str) -> bool {
    record.kind.is_primary()
        && (normalize_package_name(&record.name) == normalized
            || record
                .module_name
                .as_deref()
                .is_some_and(|m| normalize_package_name(m) == normalized))
}

/// True if a library, binary, proc-macro or canister rule matches the package
pub fn is_already_primary(package_name: &str, records: &[RuleRecord]) -> bool {
    let normalized = normalize_package_name(package_name);
    records.iter().any(|r| builds_package(r, &normalized))
}

/// True if a test rule covers the package
///
/// A test rule counts when it either globs/lists sources under a tests
/// directory without binding to a crate, or binds via `crate = ":x"` to a
/// primary rule `x` that builds this package.
pub fn is_already_tested(package_name: &str, records: &[RuleRecord]) -> bool {
    let normalized = normalize_package_name(package_name);

    records.iter().filter(|r| r.kind.is_test()).any(|test| match &test.target_ref {
        None => test
            .sources
            .as_deref()
            .is_some_and(|srcs| TEST_DIR_MARKERS.iter().any(|marker| srcs.contains(marker))),
        Some(target) => {
            let target = target.strip_prefix(':').unwrap_or(target);
            records
                .iter()
                .any(|primary| primary.name == target && builds_package(primary, &normalized))
        }
    })
}
