pub mod http;
pub mod source;
pub mod streams;

pub use http::HttpNodeClient;
pub use source::{GossipSource, StreamSource};
pub use streams::count_streams;
