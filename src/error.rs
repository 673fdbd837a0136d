//! Error types for building indexes and reading workloads.

use std::fmt;

/// Input section a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Topics,
    Questions,
    Queries,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::Topics => "topic",
            Section::Questions => "question",
            Section::Queries => "query",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NearbyError {
    /// A line does not have the expected field count or field types.
    #[error("malformed {section} record at line {line}: {reason} (got {text:?})")]
    MalformedRecord {
        section: Section,
        line: usize,
        reason: String,
        text: String,
    },

    /// The header announced more lines than the input holds.
    #[error("truncated input: expected {expected} {section} lines, found {found}")]
    TruncatedInput {
        section: Section,
        expected: usize,
        found: usize,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NearbyError>;

impl NearbyError {
    pub(crate) fn malformed(
        section: Section,
        line: usize,
        reason: impl Into<String>,
        text: &str,
    ) -> Self {
        NearbyError::MalformedRecord {
            section,
            line,
            reason: reason.into(),
            text: text.to_string(),
        }
    }
}
