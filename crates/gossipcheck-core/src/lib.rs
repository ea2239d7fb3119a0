//! Cluster gossip validation.
//!
//! Parses a node's gossip document into a [`types::ClusterSnapshot`],
//! classifies it with [`validator::validate`], and derives stream event
//! counts with [`streams::extract_count`]. Fetching documents and
//! publishing results are left to implementations of the traits in
//! [`report`].

pub mod config;
pub mod error;
pub mod report;
pub mod snapshot;
pub mod streams;
pub mod types;
pub mod validator;

pub use error::{GossipError, Result};
pub use snapshot::{DocumentFormat, parse};
pub use streams::{StreamStatus, extract_count};
pub use types::{ClusterSnapshot, MemberInfo, MemberState, Status, ValidationConfig, Verdict};
pub use validator::validate;
