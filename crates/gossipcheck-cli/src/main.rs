mod commands;
mod report;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use gossipcheck_core::config::CheckConfig;
use gossipcheck_core::report::MetricSink;
use gossipcheck_core::{DocumentFormat, Status};
use gossipcheck_http::HttpNodeClient;

use report::{GraphiteSink, NagiosReporter};

#[derive(Parser)]
#[command(name = "gossipcheck")]
#[command(about = "Cluster gossip health checks and stream event counts")]
#[command(version)]
struct Cli {
    /// Path to the gossipcheck config directory (default: ~/.gossipcheck)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate cluster gossip as seen by one node
    Gossip {
        #[command(flatten)]
        node: NodeArgs,

        /// Number of nodes the cluster should have
        #[arg(long)]
        expected_nodes: Option<usize>,

        /// Maximum epoch lag of the queried node behind the master (-1 disables)
        #[arg(long, allow_hyphen_values = true)]
        epoch_lag: Option<i64>,
    },

    /// Emit event counts for streams
    Streams {
        #[command(flatten)]
        node: NodeArgs,

        /// Stream names (default: streams.names from the config)
        names: Vec<String>,

        /// Metric name prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Send samples to a Graphite plaintext listener (host:port) instead of stdout
        #[arg(long)]
        graphite: Option<String>,

        /// Write samples as a Prometheus textfile instead of Graphite lines
        #[cfg(feature = "metrics")]
        #[arg(long, conflicts_with = "graphite")]
        prometheus: Option<PathBuf>,
    },

    /// Write a default configuration file
    Init,

    /// Show current configuration
    Config,
}

/// Node connection overrides shared by the check commands.
#[derive(Args)]
struct NodeArgs {
    /// Node host name or address (or set GOSSIPCHECK_HOST env var)
    #[arg(long, short = 'H', env = "GOSSIPCHECK_HOST")]
    host: Option<String>,

    /// Node HTTP port (or set GOSSIPCHECK_PORT env var)
    #[arg(long, short, env = "GOSSIPCHECK_PORT")]
    port: Option<u16>,

    /// Gossip document format to request (json or xml)
    #[arg(long)]
    format: Option<DocumentFormat>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl NodeArgs {
    fn apply(&self, config: &mut CheckConfig) {
        if let Some(ref host) = self.host {
            config.node.host = host.clone();
        }
        if let Some(port) = self.port {
            config.node.port = port;
        }
        if let Some(format) = self.format {
            config.node.format = format;
        }
        if let Some(timeout) = self.timeout {
            config.node.timeout_secs = timeout;
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "gossipcheck=debug" } else { "gossipcheck=info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse()?),
        )
        .init();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => CheckConfig::default_base_dir()?,
    };

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Init => commands::init::run(&base_dir).map(|_| ExitCode::SUCCESS),
        Commands::Config => commands::config::run(&base_dir).map(|_| ExitCode::SUCCESS),
        Commands::Gossip {
            ref node,
            expected_nodes,
            epoch_lag,
        } => {
            let mut reporter = NagiosReporter::new(std::io::stdout(), "GOSSIP");
            let prepared = load_config(&base_dir, node).and_then(|mut config| {
                if let Some(n) = expected_nodes {
                    config.gossip.expected_nodes = n;
                }
                if let Some(lag) = epoch_lag {
                    config.gossip.epoch_lag_threshold = lag;
                }
                let validation = config.gossip.validation()?;
                let client = HttpNodeClient::from_settings(&config.node)?;
                Ok((validation, client))
            });
            match prepared {
                Ok((validation, client)) => {
                    rt.block_on(commands::gossip::run(&client, &validation, &mut reporter))
                }
                Err(e) => {
                    use gossipcheck_core::report::VerdictReporter;
                    reporter.report(&gossipcheck_core::Verdict::unknown(format!("{e:#}")))?;
                    Ok(ExitCode::from(Status::Unknown.exit_code()))
                }
            }
        }
        Commands::Streams {
            ref node,
            ref names,
            ref prefix,
            ref graphite,
            #[cfg(feature = "metrics")]
            ref prometheus,
        } => {
            let result = load_config(&base_dir, node).and_then(|mut config| {
                if !names.is_empty() {
                    config.streams.names = names.clone();
                }
                if let Some(p) = prefix {
                    config.streams.metric_prefix = p.clone();
                }
                let timeout = Duration::from_secs(config.node.timeout_secs);
                let mut sink: Box<dyn MetricSink> = match graphite {
                    Some(addr) => Box::new(GraphiteSink::connect(addr, timeout)?),
                    None => Box::new(GraphiteSink::new(std::io::stdout())),
                };
                #[cfg(feature = "metrics")]
                if let Some(path) = prometheus {
                    sink = Box::new(report::PrometheusSink::new(path)?);
                }
                let client = HttpNodeClient::from_settings(&config.node)?;
                rt.block_on(commands::streams::run(&client, &config.streams, sink.as_mut()))
            });
            match result {
                Ok(_) => Ok(ExitCode::SUCCESS),
                Err(e) => {
                    tracing::error!("stream count failed: {e:#}");
                    println!("STREAMS {} - {e:#}", Status::Unknown);
                    Ok(ExitCode::from(Status::Unknown.exit_code()))
                }
            }
        }
    }
}

/// Config file values with command-line node overrides applied.
fn load_config(base_dir: &std::path::Path, node: &NodeArgs) -> anyhow::Result<CheckConfig> {
    let mut config = CheckConfig::load_or_default(&CheckConfig::default_path(base_dir))?;
    node.apply(&mut config);
    config.check()?;
    Ok(config)
}
