use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use gossipcheck_core::config::NodeSettings;
use gossipcheck_core::{DocumentFormat, StreamStatus};

use crate::source::{GossipSource, StreamSource};

const ATOM_JSON: &str = "application/vnd.eventstore.atom+json";

/// HTTP client for a single node's gossip and stream endpoints.
pub struct HttpNodeClient {
    client: Client,
    base: Url,
    format: DocumentFormat,
    credentials: Option<(String, String)>,
}

impl HttpNodeClient {
    /// Create a client for `base_url` (e.g. `http://10.0.0.1:2113`).
    pub fn new(base_url: &str, format: DocumentFormat, timeout: Duration) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid node URL {base_url}"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("node URL {base_url} cannot carry a path");
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            format,
            credentials: None,
        })
    }

    /// Create a client from the `[node]` config section.
    pub fn from_settings(settings: &NodeSettings) -> anyhow::Result<Self> {
        let client = Self::new(
            &settings.base_url(),
            settings.format,
            Duration::from_secs(settings.timeout_secs),
        )?;
        Ok(match (&settings.username, &settings.password) {
            (Some(user), Some(pass)) => client.with_basic_auth(user, pass),
            _ => client,
        })
    }

    /// Send basic auth on stream reads.
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some((username.to_string(), password.to_string()));
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn gossip_url(&self) -> Url {
        let mut url = self.endpoint(&["gossip"]);
        url.query_pairs_mut()
            .append_pair("format", &self.format.to_string());
        url
    }

    fn stream_url(&self, name: &str) -> Url {
        self.endpoint(&["streams", name])
    }
}

#[async_trait]
impl GossipSource for HttpNodeClient {
    async fn fetch_gossip(&self) -> anyhow::Result<Vec<u8>> {
        let url = self.gossip_url();
        tracing::debug!("GET {url}");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?;
        let body = resp.bytes().await?;
        tracing::debug!(bytes = body.len(), "gossip document received");
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

#[async_trait]
impl StreamSource for HttpNodeClient {
    async fn fetch_stream(&self, name: &str) -> anyhow::Result<StreamStatus> {
        let url = self.stream_url(name);
        tracing::debug!("GET {url}");
        let mut req = self.client.get(url.clone()).header("Accept", ATOM_JSON);
        if let Some((user, pass)) = &self.credentials {
            req = req.basic_auth(user, Some(pass));
        }
        let resp = req
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!(stream = name, "stream not found");
            return Ok(StreamStatus::NotFound);
        }
        let resp = resp.error_for_status()?;
        Ok(StreamStatus::Found(resp.bytes().await?.to_vec()))
    }
}
