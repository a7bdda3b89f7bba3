//! Revision comparison through the hosting platform's API.
//!
//! The pipeline only needs "which files differ between these two revisions",
//! so the API is hidden behind [`CompareProvider`]. [`GitHubCompare`] talks to
//! the GitHub REST API; [`MockCompare`] returns a canned answer for tests.

use std::sync::Mutex;
use std::time::Duration;

use crate::error::DiffglobError;
use crate::types::{Comparison, RepoRef};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Trait for "compare two revisions" backends.
///
/// Implementations must be `Send + Sync`. Calls block until the comparison
/// is available.
pub trait CompareProvider: Send + Sync {
    /// Compare `base...head` within `repo`.
    fn compare(&self, repo: &RepoRef, base: &str, head: &str) -> Result<Comparison, DiffglobError>;
}

// ---------------------------------------------------------------------------
// GitHub
// ---------------------------------------------------------------------------

/// Compare provider for the GitHub "compare two commits" endpoint.
pub struct GitHubCompare {
    api_url: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl GitHubCompare {
    /// Create a new GitHub compare client.
    ///
    /// If `api_url` is `None`, defaults to [`DEFAULT_API_URL`]. A trailing
    /// slash on the URL is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DiffglobError::Api`] if the HTTP client cannot be built.
    pub fn new(
        api_url: Option<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DiffglobError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("diffglob/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DiffglobError::Api(format!("Failed to build HTTP client: {e}")))?;

        let api_url = api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_url,
            token: token.filter(|t| !t.is_empty()),
            client,
        })
    }

    /// URL of the compare endpoint for `base...head`.
    pub fn compare_url(&self, repo: &RepoRef, base: &str, head: &str) -> String {
        format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.api_url, repo.owner, repo.name, base, head
        )
    }
}

impl CompareProvider for GitHubCompare {
    fn compare(
        &self,
        repo: &RepoRef,
        base: &str,
        head: &str,
    ) -> Result<Comparison, DiffglobError> {
        let url = self.compare_url(repo, base, head);
        tracing::debug!(%url, "requesting comparison");

        let mut request = self
            .client
            .get(&url)
            .header("accept", "application/vnd.github+json")
            .header("x-github-api-version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| DiffglobError::Api(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(DiffglobError::Api(format!("HTTP {status}: {text}")));
        }

        let comparison: Comparison = response
            .json()
            .map_err(|e| DiffglobError::Api(format!("Failed to parse response: {e}")))?;

        tracing::debug!(
            status = %comparison.status,
            files = comparison.files.as_ref().map_or(0, Vec::len),
            "comparison received"
        );
        Ok(comparison)
    }
}

// ---------------------------------------------------------------------------
// Mock (for testing)
// ---------------------------------------------------------------------------

/// A compare provider that returns a fixed comparison and records every call
/// as `(repo, base, head)`. For use in tests.
pub struct MockCompare {
    response: Comparison,
    calls: Mutex<Vec<(RepoRef, String, String)>>,
}

impl MockCompare {
    pub fn new(response: Comparison) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The calls made so far, in order.
    pub fn calls(&self) -> Vec<(RepoRef, String, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl CompareProvider for MockCompare {
    fn compare(
        &self,
        repo: &RepoRef,
        base: &str,
        head: &str,
    ) -> Result<Comparison, DiffglobError> {
        self.calls
            .lock()
            .map_err(|_| DiffglobError::Other("mock call log poisoned".into()))?
            .push((repo.clone(), base.to_string(), head.to_string()));
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompareStatus;

    fn github(api_url: Option<&str>, token: Option<&str>) -> GitHubCompare {
        GitHubCompare::new(
            api_url.map(str::to_string),
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn default_api_url() {
        let provider = github(None, None);
        let url = provider.compare_url(&RepoRef::new("o", "r"), "a", "b");
        assert_eq!(url, format!("{DEFAULT_API_URL}/repos/o/r/compare/a...b"));
    }

    #[test]
    fn compare_url_uses_three_dot_range() {
        let provider = github(Some("https://ghe.example.com/api/v3/"), None);
        let url = provider.compare_url(&RepoRef::new("octo", "widgets"), "abc", "def");
        assert_eq!(
            url,
            "https://ghe.example.com/api/v3/repos/octo/widgets/compare/abc...def"
        );
    }

    #[test]
    fn empty_token_is_dropped() {
        let provider = github(None, Some(""));
        assert!(provider.token.is_none());
    }

    #[test]
    fn mock_records_calls() {
        let mock = MockCompare::new(Comparison::new(CompareStatus::Ahead, &["a.md"]));
        let repo = RepoRef::new("o", "r");
        let cmp = mock.compare(&repo, "b1", "h1").unwrap();
        assert_eq!(cmp.filenames(), vec!["a.md"]);
        assert_eq!(
            mock.calls(),
            vec![(repo, "b1".to_string(), "h1".to_string())]
        );
    }

    #[test]
    fn provider_trait_is_object_safe() {
        let provider: Box<dyn CompareProvider> =
            Box::new(MockCompare::new(Comparison::new(CompareStatus::Behind, &[])));
        let cmp = provider.compare(&RepoRef::new("o", "r"), "a", "b").unwrap();
        assert_eq!(cmp.status, CompareStatus::Behind);
    }
}
