use std::io::Write;

use gossipcheck_core::Verdict;
use gossipcheck_core::report::VerdictReporter;

/// Writes a verdict as a single monitoring-plugin status line:
/// `<LABEL> <STATUS> - <detail>`.
pub struct NagiosReporter<W: Write> {
    out: W,
    label: String,
}

impl<W: Write> NagiosReporter<W> {
    pub fn new(out: W, label: &str) -> Self {
        Self {
            out,
            label: label.to_string(),
        }
    }
}

impl<W: Write> VerdictReporter for NagiosReporter<W> {
    fn report(&mut self, verdict: &Verdict) -> anyhow::Result<()> {
        // Plugin output is one line; keep multi-line details on it.
        let detail = verdict.detail.replace('\n', " ");
        writeln!(self.out, "{} {} - {detail}", self.label, verdict.status)?;
        self.out.flush()?;
        Ok(())
    }
}
