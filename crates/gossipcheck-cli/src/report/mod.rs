mod graphite;
mod nagios;
#[cfg(feature = "metrics")]
mod textfile;

pub use graphite::GraphiteSink;
pub use nagios::NagiosReporter;
#[cfg(feature = "metrics")]
pub use textfile::PrometheusSink;
