//! The inputs of a single run.
//!
//! Everything the pipeline reads from its environment is collected into an
//! immutable [`RunContext`] up front, so the pipeline itself never touches
//! environment variables or the filesystem.

use std::path::Path;

use serde_json::Value;

use crate::error::DiffglobError;
use crate::types::RepoRef;

/// What to do when the compare endpoint says the head revision is not ahead
/// of the base revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AheadPolicy {
    /// Report the failure and keep matching against the returned files.
    #[default]
    Report,
    /// Stop the run.
    Strict,
}

#[derive(Debug, Clone)]
pub struct RunContext {
    /// Trigger kind as named by the CI environment, e.g. `pull_request`.
    pub event_name: String,
    /// Raw event payload.
    pub payload: Value,
    /// Repository the event belongs to. Needed for pull requests only.
    pub repo: Option<RepoRef>,
    /// Token for the compare API. Needed for private repositories only.
    pub token: Option<String>,
    /// Glob pattern to test changed paths against.
    pub pattern: String,
    pub ahead_policy: AheadPolicy,
}

impl RunContext {
    pub fn new(event_name: impl Into<String>, payload: Value, pattern: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            payload,
            repo: None,
            token: None,
            pattern: pattern.into(),
            ahead_policy: AheadPolicy::default(),
        }
    }

    pub fn with_repo(mut self, repo: RepoRef) -> Self {
        self.repo = Some(repo);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_ahead_policy(mut self, policy: AheadPolicy) -> Self {
        self.ahead_policy = policy;
        self
    }
}

/// Reads the JSON event payload the CI environment wrote to `path`.
///
/// # Errors
///
/// Returns [`DiffglobError::Io`] if the file cannot be read and
/// [`DiffglobError::Json`] if it is not valid JSON.
pub fn load_event_payload(path: &Path) -> Result<Value, DiffglobError> {
    let content = std::fs::read_to_string(path)?;
    let payload: Value = serde_json::from_str(&content)?;
    Ok(payload)
}
