//! CLI handler for `diffglob check`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use diffglob_core::context::load_event_payload;
use diffglob_core::{
    compile_glob, run, ActionSink, AheadPolicy, DiffglobError, GitHubCompare, RepoRef,
    RunContext,
};

use crate::cli::CheckArgs;
use crate::output::Reporter;

/// [`ActionSink`] that logs through the [`Reporter`] and appends outputs to
/// the step's output file when there is one.
pub struct ReporterSink<'a> {
    reporter: &'a mut Reporter,
    output_file: Option<PathBuf>,
    failed: bool,
}

impl<'a> ReporterSink<'a> {
    pub fn new(reporter: &'a mut Reporter, output_file: Option<PathBuf>) -> Self {
        Self {
            reporter,
            output_file,
            failed: false,
        }
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }
}

impl ActionSink for ReporterSink<'_> {
    fn info(&mut self, message: &str) {
        self.reporter.info(message);
    }

    fn set_output(&mut self, name: &str, value: &str) {
        match &self.output_file {
            Some(path) => {
                if let Err(e) = append_output(path, name, value) {
                    self.reporter.error(&format!(
                        "Failed to write output '{name}' to {}: {e}",
                        path.display()
                    ));
                    self.failed = true;
                }
            }
            None => self.reporter.output(name, value),
        }
    }

    fn set_failed(&mut self, message: &str) {
        self.reporter.error(message);
        self.failed = true;
    }
}

/// Appends `name=value` to an output file, using the delimiter form for
/// multi-line values.
pub fn append_output(path: &Path, name: &str, value: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if value.contains('\n') {
        let delimiter = format!("diffglob_{}", std::process::id());
        writeln!(file, "{name}<<{delimiter}")?;
        writeln!(file, "{value}")?;
        writeln!(file, "{delimiter}")
    } else {
        writeln!(file, "{name}={value}")
    }
}

/// Builds the run context from the parsed arguments and the event file.
pub fn build_context(args: &CheckArgs) -> Result<RunContext, DiffglobError> {
    let payload = load_event_payload(&args.event_path)?;

    let mut ctx = RunContext::new(args.event_name.clone(), payload, args.pattern.clone());
    if let Some(repo) = args.repository.as_deref().filter(|r| !r.is_empty()) {
        ctx = ctx.with_repo(repo.parse::<RepoRef>()?);
    }
    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .filter(|t| !t.is_empty());
    if let Some(token) = token {
        ctx = ctx.with_token(token);
    }
    if args.strict_ahead {
        ctx = ctx.with_ahead_policy(AheadPolicy::Strict);
    }
    Ok(ctx)
}

/// Run `diffglob check`. Returns whether the run succeeded.
pub fn run_check(args: &CheckArgs, reporter: &mut Reporter) -> bool {
    let ctx = match build_context(args) {
        Ok(c) => c,
        Err(e) => {
            reporter.error(&format!("Failed to load run inputs: {e}"));
            return false;
        }
    };

    tracing::debug!(
        event = %ctx.event_name,
        pattern = %ctx.pattern,
        repo = ?ctx.repo.as_ref().map(ToString::to_string),
        strict = ctx.ahead_policy == AheadPolicy::Strict,
        "run context loaded"
    );

    if ctx.token.is_none() && ctx.event_name == "pull_request" {
        reporter.warning("No token provided, comparing revisions without authentication");
    }

    let provider = match GitHubCompare::new(
        args.api_url.clone(),
        ctx.token.clone(),
        Duration::from_secs(args.timeout_secs),
    ) {
        Ok(p) => p,
        Err(e) => {
            reporter.error(&e.to_string());
            return false;
        }
    };

    let mut sink = ReporterSink::new(reporter, args.output_file.clone());
    let result = run(&ctx, &provider, compile_glob, &mut sink);
    let failed = sink.has_failed();

    match result {
        Ok(outcome) => {
            let ok = outcome.succeeded() && !failed;
            tracing::debug!(
                changed = outcome.changed,
                matched = outcome.matched_files.len(),
                failures = outcome.failures.len(),
                ok,
                "check finished"
            );
            if ok {
                if outcome.changed {
                    reporter.success(&format!(
                        "{} of {} changed file(s) matched '{}'",
                        outcome.matched_files.len(),
                        outcome.changed_files.len(),
                        ctx.pattern
                    ));
                } else {
                    reporter.success(&format!("No changed files matched '{}'", ctx.pattern));
                }
            }
            reporter.set_outcome(outcome);
            ok
        }
        // Already reported through the sink.
        Err(e) => {
            tracing::debug!(error = %e, "check stopped");
            false
        }
    }
}
