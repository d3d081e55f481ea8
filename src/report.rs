// ABOUTME: Progress reporting for workflow feedback.
// ABOUTME: A single-method sink trait so tests can capture the line stream.

/// Receives user-facing progress lines from a running workflow.
///
/// The workflow only ever appends; it never reads lines back. The default
/// implementation writes to standard output. Tests substitute a capturing
/// sink to assert on the exact sequence of transitions.
pub trait ProgressSink: Send + Sync {
    /// Append one line of progress output.
    fn line(&self, message: &str);
}

/// Default sink: one line per message on standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ProgressSink for StdoutSink {
    fn line(&self, message: &str) {
        println!("{message}");
    }
}
