pub mod compare;
pub mod event;
pub mod repo;

pub use compare::{ChangedFile, CompareStatus, Comparison};
pub use event::{CommitRecord, PullRequest, PullRequestEvent, PushEvent, RevisionRef};
pub use repo::RepoRef;
