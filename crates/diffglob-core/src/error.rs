use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffglobError {
    #[error(
        "Only pull_request and push events are supported, {kind} events are not supported"
    )]
    UnsupportedEvent { kind: String },

    #[error("The base and head commits are missing from the payload for this {kind} event")]
    MissingRevisions { kind: String },

    #[error(
        "The head commit for this {kind} event is not ahead of the base commit (status: {status})"
    )]
    HeadNotAhead { kind: String, status: String },

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Invalid repository '{0}', expected owner/name")]
    InvalidRepository(String),

    #[error("Compare request failed: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
