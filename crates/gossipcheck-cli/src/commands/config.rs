use anyhow::Result;
use std::path::Path;

use gossipcheck_core::config::CheckConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    let config_path = CheckConfig::default_path(base_dir);
    let config = CheckConfig::load(&config_path)?;

    println!("Config file: {}", config_path.display());
    println!();
    println!("Node:");
    println!("  URL:             {}", config.node.base_url());
    println!("  Gossip format:   {}", config.node.format);
    println!("  Timeout:         {}s", config.node.timeout_secs);
    println!(
        "  Credentials:     {}",
        if config.node.username.is_some() { "set" } else { "none" }
    );
    println!("Gossip:");
    println!("  Expected nodes:  {}", config.gossip.expected_nodes);
    if config.gossip.epoch_lag_threshold < 0 {
        println!("  Epoch lag:       not checked");
    } else {
        println!("  Epoch lag:       <= {}", config.gossip.epoch_lag_threshold);
    }
    println!("Streams:");
    println!("  Metric prefix:   {}", config.streams.metric_prefix);
    println!("  Concurrency:     {}", config.streams.concurrency);
    if config.streams.names.is_empty() {
        println!("  Names:           (none)");
    } else {
        for name in &config.streams.names {
            println!("    - {name}");
        }
    }

    Ok(())
}
