use gossipcheck_core::config::StreamSettings;
use gossipcheck_core::report::MetricSink;
use gossipcheck_core::streams::metric_name;
use gossipcheck_http::{StreamSource, count_streams};

/// Count each stream and emit one sample per stream, all stamped with the
/// same time. Returns the number of samples emitted.
pub async fn run<S, M>(
    source: &S,
    settings: &StreamSettings,
    sink: &mut M,
) -> anyhow::Result<usize>
where
    S: StreamSource + ?Sized,
    M: MetricSink + ?Sized,
{
    if settings.names.is_empty() {
        anyhow::bail!("no streams to count; pass names or set streams.names in the config");
    }
    let counts = count_streams(source, &settings.names, settings.concurrency).await?;
    let timestamp = chrono::Utc::now().timestamp();
    for (stream, count) in &counts {
        sink.emit(&metric_name(&settings.metric_prefix, stream), *count, timestamp)?;
    }
    sink.flush()?;
    tracing::info!("emitted {} stream counts", counts.len());
    Ok(counts.len())
}
