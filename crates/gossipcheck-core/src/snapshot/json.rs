use serde::Deserialize;

use crate::error::Result;
use crate::types::{ClusterSnapshot, MemberInfo};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClusterInfoJson {
    members: Vec<MemberJson>,
    server_ip: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberJson {
    internal_http_ip: String,
    state: String,
    is_alive: bool,
    epoch_position: i64,
}

pub(super) fn parse(raw: &[u8]) -> Result<ClusterSnapshot> {
    let doc: ClusterInfoJson = serde_json::from_slice(raw)?;
    Ok(ClusterSnapshot {
        members: doc
            .members
            .into_iter()
            .map(|m| MemberInfo {
                internal_http_ip: m.internal_http_ip,
                state: m.state.into(),
                is_alive: m.is_alive,
                epoch_position: m.epoch_position,
            })
            .collect(),
        server_ip: doc.server_ip,
    })
}
