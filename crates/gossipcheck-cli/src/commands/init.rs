use anyhow::Result;
use std::path::Path;

use gossipcheck_core::config::CheckConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    let config_path = CheckConfig::default_path(base_dir);
    if config_path.exists() {
        anyhow::bail!(
            "Configuration already exists at {}. Remove it first to reinitialize.",
            config_path.display()
        );
    }

    CheckConfig::default().save(&config_path)?;
    println!("Configuration written to {}", config_path.display());
    println!("Edit [node], [gossip] and [streams] to match your cluster.");
    Ok(())
}
