//! Event counts from stream feed documents.

use serde::Deserialize;

use crate::error::{GossipError, Result};

/// Result of reading a stream's head: its feed document, or proof that
/// the stream does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamStatus {
    Found(Vec<u8>),
    NotFound,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamFeed {
    e_tag: Option<String>,
}

/// Number of events in a stream.
///
/// A stream that was never written counts as zero. A feed without a usable
/// version tag is an error, never a default.
pub fn extract_count(status: &StreamStatus) -> Result<u64> {
    match status {
        StreamStatus::NotFound => Ok(0),
        StreamStatus::Found(raw) => {
            let feed: StreamFeed = serde_json::from_slice(raw)?;
            let tag = feed
                .e_tag
                .ok_or_else(|| GossipError::Malformed("stream feed has no eTag".to_string()))?;
            parse_version_tag(&tag)
        }
    }
}

/// Parse a `"<last event number>;<suffix>"` tag into an event count.
///
/// Accepts the quoted form found in HTTP `ETag` headers.
pub fn parse_version_tag(tag: &str) -> Result<u64> {
    let unquoted = tag.trim().trim_matches('"');
    let (prefix, _) = unquoted
        .split_once(';')
        .ok_or_else(|| GossipError::MalformedVersionTag(tag.to_string()))?;
    let last_index: i64 = prefix
        .parse()
        .map_err(|_| GossipError::MalformedVersionTag(tag.to_string()))?;
    // An existing stream with no events reports -1.
    last_index
        .checked_add(1)
        .and_then(|count| u64::try_from(count).ok())
        .ok_or_else(|| GossipError::MalformedVersionTag(tag.to_string()))
}

/// Metric path for a stream: `<prefix>.<stream>` with the stream name
/// reduced to `[A-Za-z0-9_-]`.
pub fn metric_name(prefix: &str, stream: &str) -> String {
    let sanitized: String = stream
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if prefix.is_empty() {
        sanitized
    } else {
        format!("{}.{sanitized}", prefix.trim_end_matches('.'))
    }
}
