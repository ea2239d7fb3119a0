use std::io::{BufWriter, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use anyhow::Context;
use gossipcheck_core::report::MetricSink;

/// Graphite plaintext protocol: `<name> <value> <timestamp>\n` per sample.
pub struct GraphiteSink<W: Write> {
    out: W,
}

impl<W: Write> GraphiteSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl GraphiteSink<BufWriter<TcpStream>> {
    /// Connect to a carbon plaintext listener (`host:port`).
    pub fn connect(addr: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut last_err = None;
        for sock in addr
            .to_socket_addrs()
            .with_context(|| format!("cannot resolve graphite address {addr}"))?
        {
            match TcpStream::connect_timeout(&sock, timeout) {
                Ok(stream) => {
                    tracing::debug!("connected to graphite at {sock}");
                    return Ok(Self::new(BufWriter::new(stream)));
                }
                Err(e) => last_err = Some(e),
            }
        }
        match last_err {
            Some(e) => Err(e).with_context(|| format!("cannot connect to graphite at {addr}")),
            None => anyhow::bail!("graphite address {addr} resolved to nothing"),
        }
    }
}

impl<W: Write> MetricSink for GraphiteSink<W> {
    fn emit(&mut self, name: &str, value: u64, timestamp: i64) -> anyhow::Result<()> {
        writeln!(self.out, "{name} {value} {timestamp}")?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
