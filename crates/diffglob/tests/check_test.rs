use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command with every CI-provided variable cleared so the host environment
/// cannot leak into the test.
fn diffglob_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("diffglob");
    for var in [
        "GITHUB_ACTIONS",
        "GITHUB_EVENT_NAME",
        "GITHUB_EVENT_PATH",
        "GITHUB_REPOSITORY",
        "GITHUB_API_URL",
        "GITHUB_OUTPUT",
        "GITHUB_TOKEN",
        "INPUT_PATTERN",
        "INPUT_TOKEN",
        "INPUT_STRICT_AHEAD",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

struct Workspace {
    tmp: TempDir,
}

impl Workspace {
    fn new(event: serde_json::Value) -> Self {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("event.json"), event.to_string()).unwrap();
        Self { tmp }
    }

    fn event_path(&self) -> PathBuf {
        self.tmp.path().join("event.json")
    }

    fn output_path(&self) -> PathBuf {
        self.tmp.path().join("github_output")
    }

    fn outputs(&self) -> String {
        std::fs::read_to_string(self.output_path()).unwrap_or_default()
    }

    fn check(&self, event_name: &str, pattern: &str) -> assert_cmd::Command {
        let mut cmd = diffglob_cmd();
        cmd.args(["--color", "never", "check", "--event-name", event_name, "--pattern", pattern])
            .arg("--event-path")
            .arg(self.event_path())
            .arg("--output-file")
            .arg(self.output_path());
        cmd
    }
}

fn push_event() -> serde_json::Value {
    json!({
        "before": "0000000",
        "after": "1111111",
        "commits": [{"added": ["a.txt"], "removed": [], "modified": ["b/c.md"]}]
    })
}

fn pr_event() -> serde_json::Value {
    json!({
        "action": "synchronize",
        "pull_request": {"base": {"sha": "base0"}, "head": {"sha": "head1"}}
    })
}

#[test]
fn push_with_match_sets_changed_true() {
    let ws = Workspace::new(push_event());

    ws.check("push", "**/*.md")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changed File: a.txt"))
        .stdout(predicate::str::contains("Changed File: b/c.md"))
        .stdout(predicate::str::contains("Matched: b/c.md"));

    assert_eq!(ws.outputs(), "changed=true\n");
}

#[test]
fn push_without_match_sets_changed_false() {
    let ws = Workspace::new(json!({"commits": [{"added": ["a.txt"]}]}));

    ws.check("push", "*.md")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched:").not());

    assert_eq!(ws.outputs(), "changed=false\n");
}

#[test]
fn unsupported_event_fails_without_output() {
    let ws = Workspace::new(json!({}));

    ws.check("release", "*.md")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR:"))
        .stderr(predicate::str::contains("release"));

    assert_eq!(ws.outputs(), "");
}

#[test]
fn actions_mode_emits_error_command() {
    let ws = Workspace::new(json!({}));

    ws.check("workflow_dispatch", "*.md")
        .env("GITHUB_ACTIONS", "true")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::"))
        .stdout(predicate::str::contains("workflow_dispatch"));
}

#[test]
fn inputs_can_come_from_environment() {
    let ws = Workspace::new(push_event());

    diffglob_cmd()
        .args(["--color", "never", "check"])
        .env("INPUT_PATTERN", "b/**")
        .env("GITHUB_EVENT_NAME", "push")
        .env("GITHUB_EVENT_PATH", ws.event_path())
        .env("GITHUB_OUTPUT", ws.output_path())
        .assert()
        .success();

    assert_eq!(ws.outputs(), "changed=true\n");
}

#[test]
fn empty_action_inputs_read_as_unset() {
    let ws = Workspace::new(push_event());

    ws.check("push", "**/*.md")
        .env("INPUT_STRICT_AHEAD", "")
        .env("GITHUB_REPOSITORY", "")
        .assert()
        .success();

    assert_eq!(ws.outputs(), "changed=true\n");
}

#[test]
fn push_ignores_dotfiles_for_wildcards() {
    let ws = Workspace::new(json!({
        "commits": [{"added": [".env", ".github/workflows/ci.yml"]}]
    }));

    ws.check("push", "**/*.yml").assert().success();

    assert_eq!(ws.outputs(), "changed=false\n");
}

#[test]
fn no_output_file_prints_output() {
    let ws = Workspace::new(push_event());

    diffglob_cmd()
        .args(["--color", "never", "check", "--event-name", "push", "--pattern", "*.txt"])
        .arg("--event-path")
        .arg(ws.event_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("changed=true"));
}

#[test]
fn json_output_carries_outcome() {
    let ws = Workspace::new(push_event());

    let output = ws.check("push", "**/*.md").arg("--json").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["results"].is_array());
    assert_eq!(parsed["outcome"]["changed"], json!(true));
    assert_eq!(parsed["outcome"]["matched_files"], json!(["b/c.md"]));
}

#[test]
fn invalid_pattern_fails() {
    let ws = Workspace::new(push_event());

    ws.check("push", "src/[abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pattern"));

    assert_eq!(ws.outputs(), "");
}

#[test]
fn missing_event_file_fails() {
    diffglob_cmd()
        .args([
            "check",
            "--event-name",
            "push",
            "--pattern",
            "*",
            "--event-path",
            "/tmp/nonexistent-diffglob-event.json",
        ])
        .assert()
        .failure();
}

#[test]
fn missing_pattern_is_a_usage_error() {
    let ws = Workspace::new(push_event());

    diffglob_cmd()
        .args(["check", "--event-name", "push"])
        .arg("--event-path")
        .arg(ws.event_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pattern"));
}

#[test]
fn completions_are_generated() {
    diffglob_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("diffglob"));
}

async fn compare_server(status: &str, files: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    let files: Vec<serde_json::Value> = files.iter().map(|f| json!({"filename": f})).collect();
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/compare/base0...head1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": status,
            "files": files
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn pr_check(ws: &Workspace, api_url: &str, pattern: &str) -> assert_cmd::Command {
    let mut cmd = ws.check("pull_request", pattern);
    cmd.args(["--repository", "octo/widgets", "--token", "example", "--api-url", api_url]);
    cmd
}

#[tokio::test]
async fn pull_request_compares_revisions() {
    let server = compare_server("ahead", &["README.md", "src/index.ts"]).await;
    let ws = Workspace::new(pr_event());
    let uri = server.uri();

    let ws = assert_in_blocking_with(ws, move |ws| {
        pr_check(ws, &uri, "*.md")
            .assert()
            .success()
            .stdout(predicate::str::contains("Base commit: base0"))
            .stdout(predicate::str::contains("Head commit: head1"))
            .stdout(predicate::str::contains("Matched: README.md"));
    })
    .await;

    assert_eq!(ws.outputs(), "changed=true\n");
}

#[tokio::test]
async fn pull_request_head_not_ahead_reports_but_sets_output() {
    let server = compare_server("diverged", &["docs/a.md"]).await;
    let ws = Workspace::new(pr_event());
    let uri = server.uri();

    let ws = assert_in_blocking_with(ws, move |ws| {
        pr_check(ws, &uri, "docs/*.md")
            .assert()
            .failure()
            .stderr(predicate::str::contains("not ahead"));
    })
    .await;

    assert_eq!(ws.outputs(), "changed=true\n");
}

#[tokio::test]
async fn pull_request_head_not_ahead_strict_skips_output() {
    let server = compare_server("behind", &["docs/a.md"]).await;
    let ws = Workspace::new(pr_event());
    let uri = server.uri();

    let ws = assert_in_blocking_with(ws, move |ws| {
        pr_check(ws, &uri, "docs/*.md")
            .arg("--strict-ahead")
            .assert()
            .failure()
            .stderr(predicate::str::contains("not ahead"));
    })
    .await;

    assert_eq!(ws.outputs(), "");
}

#[tokio::test]
async fn unsupported_event_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let ws = Workspace::new(pr_event());
    let uri = server.uri();

    assert_in_blocking_with(ws, move |ws| {
        let mut cmd = ws.check("release", "*");
        cmd.args(["--repository", "octo/widgets", "--api-url", uri.as_str()]);
        cmd.assert().failure();
    })
    .await;
}

// assert_cmd blocks, so it runs off the runtime that drives the mock server.
async fn assert_in_blocking_with(
    ws: Workspace,
    f: impl FnOnce(&Workspace) + Send + 'static,
) -> Workspace {
    tokio::task::spawn_blocking(move || {
        f(&ws);
        ws
    })
    .await
    .unwrap()
}
