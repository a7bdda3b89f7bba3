use std::fmt;

use serde::{Deserialize, Serialize};

/// Relationship of the head revision to the base revision, as reported by the
/// compare endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompareStatus {
    Ahead,
    Behind,
    Identical,
    Diverged,
    Other(String),
}

impl CompareStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CompareStatus::Ahead => "ahead",
            CompareStatus::Behind => "behind",
            CompareStatus::Identical => "identical",
            CompareStatus::Diverged => "diverged",
            CompareStatus::Other(s) => s,
        }
    }

    pub fn is_ahead(&self) -> bool {
        *self == CompareStatus::Ahead
    }
}

impl From<String> for CompareStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ahead" => CompareStatus::Ahead,
            "behind" => CompareStatus::Behind,
            "identical" => CompareStatus::Identical,
            "diverged" => CompareStatus::Diverged,
            _ => CompareStatus::Other(value),
        }
    }
}

impl From<CompareStatus> for String {
    fn from(value: CompareStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CompareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file entry of a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<u64>,
}

/// Result of comparing two revisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub status: CompareStatus,
    #[serde(default)]
    pub files: Option<Vec<ChangedFile>>,
}

impl Comparison {
    /// Builds a comparison from bare filenames.
    pub fn new(status: CompareStatus, filenames: &[&str]) -> Self {
        Self {
            status,
            files: Some(
                filenames
                    .iter()
                    .map(|name| ChangedFile {
                        filename: name.to_string(),
                        status: None,
                        additions: None,
                        deletions: None,
                    })
                    .collect(),
            ),
        }
    }

    /// Filenames in response order; empty when the response had no file list.
    pub fn filenames(&self) -> Vec<String> {
        self.files
            .iter()
            .flatten()
            .map(|f| f.filename.clone())
            .collect()
    }
}
