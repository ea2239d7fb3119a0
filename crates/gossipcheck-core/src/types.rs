use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::snapshot::find_exactly_one;

/// Role a member reports in gossip. Only `Master` and `Slave` carry meaning
/// for validation; every other role is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemberState {
    Master,
    Slave,
    Other(String),
}

impl MemberState {
    pub fn is_master(&self) -> bool {
        matches!(self, MemberState::Master)
    }

    /// `Master` or `Slave`.
    pub fn is_expected(&self) -> bool {
        matches!(self, MemberState::Master | MemberState::Slave)
    }

    pub fn as_str(&self) -> &str {
        match self {
            MemberState::Master => "Master",
            MemberState::Slave => "Slave",
            MemberState::Other(s) => s,
        }
    }
}

impl From<String> for MemberState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Master" => MemberState::Master,
            "Slave" => MemberState::Slave,
            _ => MemberState::Other(s),
        }
    }
}

impl From<&str> for MemberState {
    fn from(s: &str) -> Self {
        MemberState::from(s.to_string())
    }
}

impl From<MemberState> for String {
    fn from(state: MemberState) -> Self {
        match state {
            MemberState::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for MemberState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member as seen in a gossip document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub internal_http_ip: String,
    pub state: MemberState,
    pub is_alive: bool,
    pub epoch_position: i64,
}

/// A single node's view of cluster gossip at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    /// Members in document order.
    pub members: Vec<MemberInfo>,
    /// Address of the node that served this document.
    pub server_ip: String,
}

impl ClusterSnapshot {
    /// The member that served this document (`internal_http_ip == server_ip`).
    pub fn target_member(&self) -> Result<&MemberInfo> {
        find_exactly_one(&self.members, "target member", |m| {
            m.internal_http_ip == self.server_ip
        })
    }

    /// The unique member in `Master` state.
    pub fn master(&self) -> Result<&MemberInfo> {
        find_exactly_one(&self.members, "master", |m| m.state.is_master())
    }

    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_alive).count()
    }

    pub fn master_count(&self) -> usize {
        self.members.iter().filter(|m| m.state.is_master()).count()
    }
}

/// Parameters for a gossip validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub expected_node_count: usize,
    /// Maximum allowed `master_epoch - target_epoch`; negative disables the check.
    pub epoch_lag_threshold: i64,
}

impl ValidationConfig {
    pub fn new(expected_node_count: usize, epoch_lag_threshold: i64) -> Result<Self> {
        if expected_node_count == 0 {
            return Err(crate::error::GossipError::Config(
                "expected node count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            expected_node_count,
            epoch_lag_threshold,
        })
    }

    pub fn lag_check_enabled(&self) -> bool {
        self.epoch_lag_threshold >= 0
    }
}

/// Check severity, ordered from healthy to unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// Monitoring plugin exit code.
    pub fn exit_code(self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Warning => write!(f, "WARNING"),
            Status::Critical => write!(f, "CRITICAL"),
            Status::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Outcome of one check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: Status,
    pub detail: String,
}

impl Verdict {
    pub fn new(status: Status, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn ok(detail: impl Into<String>) -> Self {
        Self::new(Status::Ok, detail)
    }

    pub fn warning(detail: impl Into<String>) -> Self {
        Self::new(Status::Warning, detail)
    }

    pub fn critical(detail: impl Into<String>) -> Self {
        Self::new(Status::Critical, detail)
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self::new(Status::Unknown, detail)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.status, self.detail)
    }
}
