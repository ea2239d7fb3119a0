use anyhow::Context;
use futures::{StreamExt, TryStreamExt};

use gossipcheck_core::extract_count;

use crate::source::StreamSource;

/// Fetch and count each named stream, at most `concurrency` at a time.
///
/// Results come back in completion order. The first failure aborts the
/// whole run; a missing stream is not a failure and counts as zero.
pub async fn count_streams<S>(
    source: &S,
    names: &[String],
    concurrency: usize,
) -> anyhow::Result<Vec<(String, u64)>>
where
    S: StreamSource + ?Sized,
{
    futures::stream::iter(names.iter().cloned())
        .map(|name| async move {
            let status = source
                .fetch_stream(&name)
                .await
                .with_context(|| format!("failed to fetch stream {name}"))?;
            let count = extract_count(&status)
                .with_context(|| format!("failed to read event count of stream {name}"))?;
            tracing::debug!(stream = %name, count, "stream counted");
            Ok::<_, anyhow::Error>((name, count))
        })
        .buffer_unordered(concurrency.max(1))
        .try_collect()
        .await
}
