//! Prometheus text exposition for node-exporter's textfile collector.

use std::path::{Path, PathBuf};

use gossipcheck_core::report::MetricSink;
use prometheus::{Encoder, IntGaugeVec, Opts, Registry, TextEncoder};

pub struct PrometheusSink {
    registry: Registry,
    events: IntGaugeVec,
    path: PathBuf,
}

impl PrometheusSink {
    /// Samples are written to `path` on flush.
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let registry = Registry::new();
        let events = IntGaugeVec::new(
            Opts::new("gossipcheck_stream_events", "Number of events in a stream"),
            &["metric"],
        )?;
        registry.register(Box::new(events.clone()))?;
        Ok(Self {
            registry,
            events,
            path: path.to_path_buf(),
        })
    }

    fn render(&self) -> anyhow::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }
}

impl MetricSink for PrometheusSink {
    // The exposition format carries no timestamp for textfile gauges.
    fn emit(&mut self, name: &str, value: u64, _timestamp: i64) -> anyhow::Result<()> {
        self.events
            .with_label_values(&[name])
            .set(i64::try_from(value)?);
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        let body = self.render()?;
        // Write then rename so the collector never reads a partial file.
        let tmp = self.path.with_extension("prom.tmp");
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!("wrote metrics to {}", self.path.display());
        Ok(())
    }
}
