use thiserror::Error;

#[derive(Debug, Error)]
pub enum GossipError {
    // IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found at {0} — run `gossipcheck init` first")]
    ConfigNotFound(String),

    // Documents
    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Unrecognized document format (expected JSON or XML)")]
    UnknownFormat,

    #[error("Expected exactly one {what}, found {found}")]
    NotExactlyOne { what: String, found: usize },

    #[error("Malformed version tag: {0:?}")]
    MalformedVersionTag(String),

    // Serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("TOML deserialization error: {0}")]
    TomlDe(String),

    #[error("TOML serialization error: {0}")]
    TomlSer(String),
}

impl GossipError {
    /// True for errors caused by the fetched document itself rather than
    /// the local environment.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            GossipError::Malformed(_)
                | GossipError::UnknownFormat
                | GossipError::NotExactlyOne { .. }
                | GossipError::MalformedVersionTag(_)
                | GossipError::Json(_)
                | GossipError::Xml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GossipError>;
