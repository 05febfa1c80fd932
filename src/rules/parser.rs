// src/rules/parser.rs

//! Line-oriented rule extractor
//!
//! Each line is first classified into a [`Line`] token, then a two-state
//! machine (scanning / inside a block) folds the tokens into records.
//!
//! Recognized shapes:
//!
//! ```text
//! rust_library(                      <- block open, line is exactly `<ident>(`
//!     name = "types",                <- name
//!     crate_name = "ic_types",       <- module name
//!     crate = ":types",              <- target reference
//!     srcs = glob(["src/**"]),       <- sources, glob call
//!     srcs = ["src/lib.rs"],         <- sources, literal list
//! )                                  <- block close, line is exactly `)`
//! ```
//!
//! Anything else is inert. Only the first line of each field shape counts
//! inside a block.

use super::{RuleKind, RuleRecord};
use regex::Regex;
use std::sync::LazyLock;

static OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\($").expect("valid regex"));
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s+name = "(.+)""#).expect("valid regex"));
static CRATE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s+crate_name = "(.+)""#).expect("valid regex"));
static CRATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s+crate = "(.+)""#).expect("valid regex"));
static SRCS_GLOB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+srcs = (glob\(.*\)),").expect("valid regex"));
static SRCS_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+srcs = (\[.*\]),").expect("valid regex"));

/// Fields the extractor captures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    ModuleName,
    TargetRef,
    Sources,
}

/// One classified line of a rule file
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Open(&'a str),
    Close,
    Field(Field, &'a str),
    Other,
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if line == ")" {
            return Self::Close;
        }
        if let Some(caps) = OPEN_RE.captures(line)
            && let Some(ident) = caps.get(1)
        {
            return Self::Open(ident.as_str());
        }

        let patterns: [(&Regex, Field); 5] = [
            (&NAME_RE, Field::Name),
            (&CRATE_NAME_RE, Field::ModuleName),
            (&CRATE_RE, Field::TargetRef),
            (&SRCS_GLOB_RE, Field::Sources),
            (&SRCS_LIST_RE, Field::Sources),
        ];
        for (re, field) in patterns {
            if let Some(value) = re.captures(line).and_then(|caps| caps.get(1)) {
                return Self::Field(field, value.as_str());
            }
        }

        Self::Other
    }
}

/// Fields collected for the block currently open
#[derive(Debug)]
struct Accumulator {
    kind: RuleKind,
    name: Option<String>,
    module_name: Option<String>,
    target_ref: Option<String>,
    sources: Option<String>,
}

impl Accumulator {
    fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            name: None,
            module_name: None,
            target_ref: None,
            sources: None,
        }
    }

    /// First value wins; later lines of the same shape are ignored
    fn set(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::ModuleName => &mut self.module_name,
            Field::TargetRef => &mut self.target_ref,
            Field::Sources => &mut self.sources,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    fn finish(self) -> Option<RuleRecord> {
        Some(RuleRecord {
            kind: self.kind,
            name: self.name?,
            module_name: self.module_name,
            target_ref: self.target_ref,
            sources: self.sources,
        })
    }
}

enum State {
    Scanning,
    InBlock(Accumulator),
}

/// Extract rule records from the text of one rule-definition file
///
/// Never fails: unrecognized lines are skipped, a block that is reopened
/// before its `)` is abandoned, and a block without a `name` is dropped.
pub fn parse_rules(text: &str) -> Vec<RuleRecord> {
    let mut records = Vec::new();
    let mut state = State::Scanning;

    for line in text.lines() {
        state = match (state, Line::classify(line)) {
            (_, Line::Open(ident)) => {
                State::InBlock(Accumulator::new(RuleKind::from_identifier(ident)))
            }
            (State::InBlock(acc), Line::Close) => {
                if let Some(record) = acc.finish() {
                    records.push(record);
                }
                State::Scanning
            }
            (State::InBlock(mut acc), Line::Field(field, value)) => {
                acc.set(field, value);
                State::InBlock(acc)
            }
            (state, _) => state,
        };
    }

    records
}
