//! The single-pass pipeline: read the event, resolve the changes, match, report.

use serde::Serialize;

use crate::compare::CompareProvider;
use crate::context::RunContext;
use crate::error::DiffglobError;
use crate::event::{read_event, TriggerKind};
use crate::matcher::{filter_matches, MatcherFactory};
use crate::report::{report, ActionSink};
use crate::resolve::resolve_changes;

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunOutcome {
    pub changed: bool,
    pub changed_files: Vec<String>,
    pub matched_files: Vec<String>,
    /// Non-fatal failures already sent to the sink. A run with failures still
    /// counts as failed.
    pub failures: Vec<String>,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the pipeline once.
///
/// The pattern is compiled first, so a bad pattern fails before any event
/// parsing or network traffic. Terminal errors are sent to the sink's failure
/// channel and returned; in that case no `changed` output is set.
///
/// # Errors
///
/// Any [`DiffglobError`] raised while compiling the pattern, reading the event
/// or resolving the changes.
pub fn run(
    ctx: &RunContext,
    compare: &dyn CompareProvider,
    compile: MatcherFactory,
    sink: &mut dyn ActionSink,
) -> Result<RunOutcome, DiffglobError> {
    match execute(ctx, compare, compile, sink) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            sink.set_failed(&e.to_string());
            Err(e)
        }
    }
}

fn execute(
    ctx: &RunContext,
    compare: &dyn CompareProvider,
    compile: MatcherFactory,
    sink: &mut dyn ActionSink,
) -> Result<RunOutcome, DiffglobError> {
    let matcher = compile(&ctx.pattern)?;

    let kind = TriggerKind::parse(&ctx.event_name)?;
    tracing::debug!(%kind, pattern = %ctx.pattern, "starting run");
    if kind == TriggerKind::Push {
        sink.info(&serde_json::to_string(&ctx.payload)?);
    }

    let descriptor = read_event(kind, &ctx.payload)?;
    let resolution = resolve_changes(descriptor, ctx, compare, sink)?;

    let matched_files = filter_matches(matcher.as_ref(), &resolution.files);
    let changed = report(sink, &resolution.files, &matched_files);

    Ok(RunOutcome {
        changed,
        changed_files: resolution.files,
        matched_files,
        failures: resolution.failures,
    })
}
