use std::process::ExitCode;

use gossipcheck_core::report::VerdictReporter;
use gossipcheck_core::{ValidationConfig, Verdict, parse, validate};
use gossipcheck_http::GossipSource;

/// Fetch, parse and validate one gossip document.
///
/// Never OK unless the document was fetched, parsed and passed every check.
pub async fn check<S>(source: &S, validation: &ValidationConfig) -> Verdict
where
    S: GossipSource + ?Sized,
{
    let raw = match source.fetch_gossip().await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("gossip fetch from {} failed: {e:#}", source.describe());
            return Verdict::unknown(format!(
                "Cannot fetch gossip from {}: {e:#}",
                source.describe()
            ));
        }
    };
    match parse(&raw) {
        Ok(snapshot) => validate(&snapshot, validation),
        Err(e) => Verdict::critical(format!("Malformed gossip from {}: {e}", source.describe())),
    }
}

pub async fn run<S, R>(
    source: &S,
    validation: &ValidationConfig,
    reporter: &mut R,
) -> anyhow::Result<ExitCode>
where
    S: GossipSource + ?Sized,
    R: VerdictReporter + ?Sized,
{
    let verdict = check(source, validation).await;
    tracing::info!(status = %verdict.status, "gossip check finished");
    reporter.report(&verdict)?;
    Ok(ExitCode::from(verdict.status.exit_code()))
}
