//! Gossip consistency checks.
//!
//! Checks run in a fixed order and the first failure decides the verdict:
//!
//! 1. node count matches the expected cluster size
//! 2. every member is alive
//! 3. exactly one member is `Master`
//! 4. every member is `Master` or `Slave` (WARNING, stops here)
//! 5. the queried node's epoch is within the lag threshold of the master
//!
//! Structural failures come first so a missing node is not reported as
//! replication lag.

use crate::types::{ClusterSnapshot, MemberState, ValidationConfig, Verdict};

/// Classify a snapshot. Pure: the same inputs always give the same verdict.
pub fn validate(snapshot: &ClusterSnapshot, config: &ValidationConfig) -> Verdict {
    let verdict = check_node_count(snapshot, config)
        .or_else(|| check_liveness(snapshot, config))
        .or_else(|| check_single_master(snapshot))
        .or_else(|| check_roles(snapshot))
        .or_else(|| check_epoch_lag(snapshot, config))
        .unwrap_or_else(|| healthy(snapshot, config));
    tracing::debug!(status = %verdict.status, detail = %verdict.detail, "gossip validated");
    verdict
}

fn check_node_count(snapshot: &ClusterSnapshot, config: &ValidationConfig) -> Option<Verdict> {
    let count = snapshot.members.len();
    (count != config.expected_node_count).then(|| {
        Verdict::critical(format!(
            "Cluster has {count} nodes, should be {}",
            config.expected_node_count
        ))
    })
}

fn check_liveness(snapshot: &ClusterSnapshot, config: &ValidationConfig) -> Option<Verdict> {
    let alive = snapshot.alive_count();
    (alive != snapshot.members.len()).then(|| {
        Verdict::critical(format!(
            "Only {alive} alive nodes, should be {}",
            config.expected_node_count
        ))
    })
}

fn check_single_master(snapshot: &ClusterSnapshot) -> Option<Verdict> {
    let masters = snapshot.master_count();
    (masters != 1)
        .then(|| Verdict::critical(format!("Cluster has {masters} masters, should be 1")))
}

fn check_roles(snapshot: &ClusterSnapshot) -> Option<Verdict> {
    let mut unexpected: Vec<&MemberState> = Vec::new();
    for state in snapshot.members.iter().map(|m| &m.state) {
        if !state.is_expected() && !unexpected.contains(&state) {
            unexpected.push(state);
        }
    }
    if unexpected.is_empty() {
        return None;
    }
    let states: Vec<&str> = unexpected.iter().map(|s| s.as_str()).collect();
    Some(Verdict::warning(format!(
        "Unexpected node states: {}",
        states.join(", ")
    )))
}

fn check_epoch_lag(snapshot: &ClusterSnapshot, config: &ValidationConfig) -> Option<Verdict> {
    if !config.lag_check_enabled() {
        return None;
    }
    let lookup = snapshot
        .master()
        .and_then(|master| Ok((master, snapshot.target_member()?)));
    let (master, target) = match lookup {
        Ok(pair) => pair,
        Err(e) => return Some(Verdict::critical(format!("Malformed gossip: {e}"))),
    };

    // A target ahead of the master gives a negative lag and passes.
    let lag = master.epoch_position.saturating_sub(target.epoch_position);
    (lag > config.epoch_lag_threshold).then(|| {
        Verdict::critical(format!(
            "Node {} epoch position {} lags master epoch position {} (threshold {})",
            target.internal_http_ip,
            target.epoch_position,
            master.epoch_position,
            config.epoch_lag_threshold
        ))
    })
}

fn healthy(snapshot: &ClusterSnapshot, config: &ValidationConfig) -> Verdict {
    let freshness = if config.lag_check_enabled() {
        "node is up to date"
    } else {
        "epoch lag not checked"
    };
    Verdict::ok(format!(
        "{} nodes, all alive, 1 master, {freshness}",
        snapshot.members.len()
    ))
}
