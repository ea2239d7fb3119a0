pub mod config;
pub mod gossip;
pub mod init;
pub mod streams;
