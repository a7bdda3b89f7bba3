use serde::{Deserialize, Serialize};

/// A revision reference inside a pull request payload (`base` / `head`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevisionRef {
    pub sha: Option<String>,
}

/// The nested `pull_request` object of a pull request event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequest {
    pub base: Option<RevisionRef>,
    pub head: Option<RevisionRef>,
}

/// A `pull_request` webhook payload. Only the fields this tool reads are modeled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub pull_request: Option<PullRequest>,
}

impl PullRequestEvent {
    pub fn base_sha(&self) -> Option<&str> {
        self.pull_request
            .as_ref()
            .and_then(|pr| pr.base.as_ref())
            .and_then(|r| r.sha.as_deref())
            .filter(|sha| !sha.is_empty())
    }

    pub fn head_sha(&self) -> Option<&str> {
        self.pull_request
            .as_ref()
            .and_then(|pr| pr.head.as_ref())
            .and_then(|r| r.sha.as_deref())
            .filter(|sha| !sha.is_empty())
    }
}

/// One commit of a push event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitRecord {
    pub added: Option<Vec<String>>,
    pub removed: Option<Vec<String>>,
    pub modified: Option<Vec<String>>,
}

impl CommitRecord {
    /// Paths touched by this commit: added, then removed, then modified.
    pub fn paths(&self) -> impl Iterator<Item = &String> {
        [&self.added, &self.removed, &self.modified]
            .into_iter()
            .flat_map(|list| list.iter().flatten())
    }
}

/// A `push` webhook payload. Only the commit lists are read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushEvent {
    #[serde(default)]
    pub commits: Option<Vec<CommitRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_pull_request_event() {
        let json = r#"{
            "action": "opened",
            "pull_request": {
                "number": 7,
                "base": {"sha": "aaa", "ref": "main"},
                "head": {"sha": "bbb", "ref": "feature"}
            }
        }"#;
        let event: PullRequestEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.base_sha(), Some("aaa"));
        assert_eq!(event.head_sha(), Some("bbb"));
    }

    #[test]
    fn empty_sha_is_treated_as_missing() {
        let json = r#"{"pull_request": {"base": {"sha": ""}, "head": {"sha": "bbb"}}}"#;
        let event: PullRequestEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.base_sha(), None);
        assert_eq!(event.head_sha(), Some("bbb"));
    }

    #[test]
    fn missing_pull_request_object() {
        let event: PullRequestEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event.base_sha(), None);
        assert_eq!(event.head_sha(), None);
    }

    #[test]
    fn commit_paths_in_added_removed_modified_order() {
        let json = r#"{"added": ["a"], "removed": ["b"], "modified": ["c", "a"]}"#;
        let commit: CommitRecord = serde_json::from_str(json).unwrap();
        let paths: Vec<&String> = commit.paths().collect();
        assert_eq!(paths, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn commit_with_absent_lists_has_no_paths() {
        let json = r#"{"id": "abc", "modified": null}"#;
        let commit: CommitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(commit.paths().count(), 0);
    }

    #[test]
    fn push_without_commits() {
        let json = r#"{"before": "000", "after": "111"}"#;
        let event: PushEvent = serde_json::from_str(json).unwrap();
        assert!(event.commits.is_none());
    }
}
