//! Reading the change descriptor out of a trigger event payload.
//!
//! A pull request only tells us the two revisions being compared, so the
//! changed paths still have to be looked up. A push already lists the paths
//! touched by each of its commits.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::DiffglobError;
use crate::types::{PullRequestEvent, PushEvent};

/// The trigger kinds this tool knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    PullRequest,
    Push,
}

impl TriggerKind {
    /// Parses an event name such as `pull_request`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffglobError::UnsupportedEvent`] naming `name` for anything
    /// other than `pull_request` or `push`.
    pub fn parse(name: &str) -> Result<Self, DiffglobError> {
        match name {
            "pull_request" => Ok(TriggerKind::PullRequest),
            "push" => Ok(TriggerKind::Push),
            other => Err(DiffglobError::UnsupportedEvent {
                kind: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TriggerKind::PullRequest => "pull_request",
            TriggerKind::Push => "push",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What an event tells us about the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeDescriptor {
    /// Two revisions whose difference still has to be resolved.
    Revisions { base: String, head: String },
    /// Paths already listed by the event, in encounter order.
    Paths(Vec<String>),
}

/// Extracts the change descriptor from `payload` according to `kind`.
///
/// # Errors
///
/// - [`DiffglobError::Json`] if the payload does not have the expected shape.
/// - [`DiffglobError::MissingRevisions`] if a pull request payload lacks a
///   base or head SHA.
pub fn read_event(kind: TriggerKind, payload: &Value) -> Result<ChangeDescriptor, DiffglobError> {
    match kind {
        TriggerKind::PullRequest => {
            let event = PullRequestEvent::deserialize(payload)?;
            match (event.base_sha(), event.head_sha()) {
                (Some(base), Some(head)) => Ok(ChangeDescriptor::Revisions {
                    base: base.to_string(),
                    head: head.to_string(),
                }),
                _ => Err(DiffglobError::MissingRevisions {
                    kind: kind.to_string(),
                }),
            }
        }
        TriggerKind::Push => {
            let event = PushEvent::deserialize(payload)?;
            Ok(ChangeDescriptor::Paths(push_paths(&event)))
        }
    }
}

/// Flattens every commit's added, removed and modified lists, in commit order.
/// Duplicates are kept.
pub fn push_paths(event: &PushEvent) -> Vec<String> {
    event
        .commits
        .iter()
        .flatten()
        .flat_map(|commit| commit.paths().cloned())
        .collect()
}
