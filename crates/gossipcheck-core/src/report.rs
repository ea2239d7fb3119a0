use crate::types::Verdict;

/// Destination for the single verdict of a gossip check.
pub trait VerdictReporter {
    /// Publish the verdict. Called exactly once per run.
    fn report(&mut self, verdict: &Verdict) -> anyhow::Result<()>;
}

/// Destination for per-stream event counts.
pub trait MetricSink {
    /// Record one sample. Calls are independent and unordered.
    fn emit(&mut self, name: &str, value: u64, timestamp: i64) -> anyhow::Result<()>;

    /// Push out anything buffered.
    fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Collects verdicts in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub verdicts: Vec<Verdict>,
}

impl VerdictReporter for RecordingReporter {
    fn report(&mut self, verdict: &Verdict) -> anyhow::Result<()> {
        self.verdicts.push(verdict.clone());
        Ok(())
    }
}

/// Collects metric samples in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub samples: Vec<(String, u64, i64)>,
}

impl MetricSink for RecordingSink {
    fn emit(&mut self, name: &str, value: u64, timestamp: i64) -> anyhow::Result<()> {
        self.samples.push((name.to_string(), value, timestamp));
        Ok(())
    }
}
