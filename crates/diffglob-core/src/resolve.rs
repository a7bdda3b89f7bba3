//! Turning a change descriptor into the list of changed paths.

use crate::compare::CompareProvider;
use crate::context::{AheadPolicy, RunContext};
use crate::error::DiffglobError;
use crate::event::ChangeDescriptor;
use crate::report::ActionSink;

/// The resolved change set plus any non-fatal failures raised on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub files: Vec<String>,
    pub failures: Vec<String>,
}

/// Resolves `descriptor` into the ordered list of changed paths.
///
/// Explicit paths pass through untouched. A revision pair costs exactly one
/// call to `compare`. If the head is not ahead of the base, the failure is
/// sent to the sink and resolution continues with whatever files came back,
/// unless the context asks for [`AheadPolicy::Strict`].
///
/// # Errors
///
/// - [`DiffglobError::MissingInput`] if a comparison is needed but the
///   context has no repository.
/// - [`DiffglobError::HeadNotAhead`] under [`AheadPolicy::Strict`].
/// - Whatever the compare provider returns.
pub fn resolve_changes(
    descriptor: ChangeDescriptor,
    ctx: &RunContext,
    compare: &dyn CompareProvider,
    sink: &mut dyn ActionSink,
) -> Result<Resolution, DiffglobError> {
    let (base, head) = match descriptor {
        ChangeDescriptor::Paths(files) => {
            return Ok(Resolution {
                files,
                failures: Vec::new(),
            })
        }
        ChangeDescriptor::Revisions { base, head } => (base, head),
    };

    let repo = ctx
        .repo
        .as_ref()
        .ok_or_else(|| DiffglobError::MissingInput("repository".into()))?;

    sink.info(&format!("Base commit: {base}"));
    sink.info(&format!("Head commit: {head}"));

    let comparison = compare.compare(repo, &base, &head)?;
    let mut failures = Vec::new();

    if !comparison.status.is_ahead() {
        let err = DiffglobError::HeadNotAhead {
            kind: ctx.event_name.clone(),
            status: comparison.status.to_string(),
        };
        if ctx.ahead_policy == AheadPolicy::Strict {
            return Err(err);
        }
        let message = err.to_string();
        tracing::debug!(%base, %head, "{message}");
        sink.set_failed(&message);
        failures.push(message);
    }

    Ok(Resolution {
        files: comparison.filenames(),
        failures,
    })
}
