pub mod compare;
pub mod context;
pub mod error;
pub mod event;
pub mod matcher;
pub mod report;
pub mod resolve;
pub mod run;
pub mod types;

pub use compare::{CompareProvider, GitHubCompare, MockCompare};
pub use context::{AheadPolicy, RunContext};
pub use error::DiffglobError;
pub use event::{ChangeDescriptor, TriggerKind};
pub use matcher::{compile_glob, GlobPattern, MatcherFactory, PathMatcher};
pub use report::{ActionSink, MemorySink};
pub use run::{run, RunOutcome};
pub use types::*;
