//! Gossip document parsing.
//!
//! Nodes serve the same cluster view as JSON or XML; both decode into a
//! [`ClusterSnapshot`].

mod json;
mod xml;

use crate::error::{GossipError, Result};
use crate::types::ClusterSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format of a gossip document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Json,
    Xml,
}

impl DocumentFormat {
    /// Guess the format from the first non-whitespace byte.
    pub fn detect(raw: &[u8]) -> Result<Self> {
        match strip_bom(raw).iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => Ok(DocumentFormat::Json),
            Some(b'<') => Ok(DocumentFormat::Xml),
            _ => Err(GossipError::UnknownFormat),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            DocumentFormat::Xml => write!(f, "xml"),
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = GossipError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "xml" => Ok(DocumentFormat::Xml),
            _ => Err(GossipError::Config(format!("unsupported format: {s}"))),
        }
    }
}

/// Parse a gossip document, detecting its format.
pub fn parse(raw: &[u8]) -> Result<ClusterSnapshot> {
    parse_as(raw, DocumentFormat::detect(raw)?)
}

/// Parse a gossip document in a known format.
pub fn parse_as(raw: &[u8], format: DocumentFormat) -> Result<ClusterSnapshot> {
    let raw = strip_bom(raw);
    let snapshot = match format {
        DocumentFormat::Json => json::parse(raw)?,
        DocumentFormat::Xml => xml::parse(raw)?,
    };
    if snapshot.members.is_empty() {
        return Err(GossipError::Malformed(
            "gossip document lists no members".to_string(),
        ));
    }
    tracing::debug!(
        members = snapshot.members.len(),
        server_ip = %snapshot.server_ip,
        %format,
        "parsed gossip document"
    );
    Ok(snapshot)
}

fn strip_bom(raw: &[u8]) -> &[u8] {
    raw.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(raw)
}

/// Find the single item matching `pred`. Zero or several matches is an error.
pub fn find_exactly_one<'a, T, F>(items: &'a [T], what: &str, pred: F) -> Result<&'a T>
where
    F: Fn(&T) -> bool,
{
    let mut matches = items.iter().filter(|item| pred(item));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only),
        (None, _) => Err(GossipError::NotExactlyOne {
            what: what.to_string(),
            found: 0,
        }),
        (Some(_), Some(_)) => Err(GossipError::NotExactlyOne {
            what: what.to_string(),
            found: 2 + matches.count(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemberState;

    const JSON_DOC: &str = r#"{
        "members": [
            {"instanceId": "a", "state": "Master", "isAlive": true,
             "internalHttpIp": "10.0.0.1", "internalHttpPort": 2113, "epochPosition": 100},
            {"instanceId": "b", "state": "Slave", "isAlive": false,
             "internalHttpIp": "10.0.0.2", "internalHttpPort": 2113, "epochPosition": 90}
        ],
        "serverIp": "10.0.0.2",
        "serverPort": 2113
    }"#;

    const XML_DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ClusterInfoDto xmlns:i="http://www.w3.org/2001/XMLSchema-instance" xmlns="http://schemas.datacontract.org/2004/07/EventStore.Core.Messages">
  <Members>
    <MemberInfoDto>
      <InstanceId>a</InstanceId>
      <State>Master</State>
      <IsAlive>true</IsAlive>
      <InternalHttpIp>10.0.0.1</InternalHttpIp>
      <InternalHttpPort>2113</InternalHttpPort>
      <EpochPosition>100</EpochPosition>
    </MemberInfoDto>
    <MemberInfoDto>
      <InstanceId>b</InstanceId>
      <State>Clone</State>
      <IsAlive>true</IsAlive>
      <InternalHttpIp>10.0.0.2</InternalHttpIp>
      <InternalHttpPort>2113</InternalHttpPort>
      <EpochPosition>95</EpochPosition>
    </MemberInfoDto>
  </Members>
  <ServerIp>10.0.0.1</ServerIp>
  <ServerPort>2113</ServerPort>
</ClusterInfoDto>"#;

    #[test]
    fn detect_format() {
        assert_eq!(
            DocumentFormat::detect(b"  \n{\"a\":1}").unwrap(),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::detect(b"<root/>").unwrap(),
            DocumentFormat::Xml
        );
        assert!(matches!(
            DocumentFormat::detect(b"hello"),
            Err(GossipError::UnknownFormat)
        ));
        assert!(DocumentFormat::detect(b"").is_err());
    }

    #[test]
    fn detect_skips_byte_order_mark() {
        let mut doc = b"\xEF\xBB\xBF".to_vec();
        doc.extend_from_slice(JSON_DOC.as_bytes());
        assert_eq!(DocumentFormat::detect(&doc).unwrap(), DocumentFormat::Json);
        assert_eq!(parse(&doc).unwrap().members.len(), 2);
    }

    #[test]
    fn parse_json_document() {
        let snapshot = parse(JSON_DOC.as_bytes()).unwrap();
        assert_eq!(snapshot.server_ip, "10.0.0.2");
        assert_eq!(snapshot.members.len(), 2);
        assert_eq!(snapshot.members[0].state, MemberState::Master);
        assert_eq!(snapshot.members[0].epoch_position, 100);
        assert!(!snapshot.members[1].is_alive);
    }

    #[test]
    fn parse_xml_document() {
        let snapshot = parse(XML_DOC.as_bytes()).unwrap();
        assert_eq!(snapshot.server_ip, "10.0.0.1");
        assert_eq!(snapshot.members.len(), 2);
        assert_eq!(snapshot.members[0].internal_http_ip, "10.0.0.1");
        assert_eq!(
            snapshot.members[1].state,
            MemberState::Other("Clone".to_string())
        );
        assert_eq!(snapshot.members[1].epoch_position, 95);
    }

    #[test]
    fn empty_member_list_is_malformed() {
        let err = parse(br#"{"members": [], "serverIp": "10.0.0.1"}"#).unwrap_err();
        assert!(matches!(err, GossipError::Malformed(_)));
    }

    #[test]
    fn empty_xml_member_list_is_malformed() {
        let doc = br#"<ClusterInfoDto><Members/><ServerIp>10.0.0.1</ServerIp></ClusterInfoDto>"#;
        let err = parse(doc).unwrap_err();
        assert!(matches!(err, GossipError::Malformed(_)));
    }

    #[test]
    fn missing_field_is_malformed() {
        let doc = br#"{"members": [{"state": "Master", "isAlive": true}], "serverIp": "x"}"#;
        assert!(parse(doc).unwrap_err().is_malformed());
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(parse(b"{not json").unwrap_err().is_malformed());
        assert!(parse(b"<ClusterInfoDto><Members>").unwrap_err().is_malformed());
    }

    #[test]
    fn forced_format_mismatch_fails() {
        assert!(parse_as(JSON_DOC.as_bytes(), DocumentFormat::Xml).is_err());
    }

    #[test]
    fn find_exactly_one_counts_matches() {
        let items = [1, 2, 2, 2, 3];
        assert_eq!(*find_exactly_one(&items, "one", |&x| x == 1).unwrap(), 1);
        match find_exactly_one(&items, "two", |&x| x == 2) {
            Err(GossipError::NotExactlyOne { found, .. }) => assert_eq!(found, 3),
            other => panic!("unexpected: {other:?}"),
        }
        match find_exactly_one(&items, "nine", |&x| x == 9) {
            Err(GossipError::NotExactlyOne { found, .. }) => assert_eq!(found, 0),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn format_from_str() {
        assert_eq!("XML".parse::<DocumentFormat>().unwrap(), DocumentFormat::Xml);
        assert!("yaml".parse::<DocumentFormat>().is_err());
    }
}
