//! Result reporting through the invoking environment's channels.

/// Name of the boolean output.
pub const CHANGED_OUTPUT: &str = "changed";

/// The channels a CI environment exposes to a step: a log stream, named
/// outputs, and a failure channel.
pub trait ActionSink {
    /// Write a diagnostic log line.
    fn info(&mut self, message: &str);

    /// Set a named step output.
    fn set_output(&mut self, name: &str, value: &str);

    /// Mark the run as failed with a human-readable message.
    fn set_failed(&mut self, message: &str);
}

/// Logs every changed and matched path, then sets the `changed` output.
///
/// Returns whether anything matched.
pub fn report(sink: &mut dyn ActionSink, changed_files: &[String], matched: &[String]) -> bool {
    for path in changed_files {
        sink.info(&format!("Changed File: {path}"));
    }
    for path in matched {
        sink.info(&format!("Matched: {path}"));
    }

    let changed = !matched.is_empty();
    sink.set_output(CHANGED_OUTPUT, if changed { "true" } else { "false" });
    changed
}

/// An [`ActionSink`] that keeps everything in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub logs: Vec<String>,
    pub outputs: Vec<(String, String)>,
    pub failures: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value set for output `name`, if any.
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_failed(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl ActionSink for MemorySink {
    fn info(&mut self, message: &str) {
        self.logs.push(message.to_string());
    }

    fn set_output(&mut self, name: &str, value: &str) {
        self.outputs.push((name.to_string(), value.to_string()));
    }

    fn set_failed(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}
