use serde::Deserialize;

use crate::error::{GossipError, Result};
use crate::types::{ClusterSnapshot, MemberInfo};

// Root element is `ClusterInfoDto`; its name and namespace attributes are ignored.
#[derive(Debug, Deserialize)]
struct ClusterInfoXml {
    #[serde(rename = "Members", default)]
    members: MembersXml,
    #[serde(rename = "ServerIp")]
    server_ip: String,
}

#[derive(Debug, Default, Deserialize)]
struct MembersXml {
    #[serde(rename = "MemberInfoDto", default)]
    items: Vec<MemberXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MemberXml {
    internal_http_ip: String,
    state: String,
    is_alive: bool,
    epoch_position: i64,
}

pub(super) fn parse(raw: &[u8]) -> Result<ClusterSnapshot> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| GossipError::Malformed(format!("gossip XML is not UTF-8: {e}")))?;
    let doc: ClusterInfoXml =
        quick_xml::de::from_str(text).map_err(|e| GossipError::Xml(e.to_string()))?;
    Ok(ClusterSnapshot {
        members: doc
            .members
            .items
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
