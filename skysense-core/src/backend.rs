use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

use crate::{
    Config,
    model::{ChatRequest, ChatResponse},
};

/// Remote chat service: takes a message, answers with plain text.
#[async_trait]
pub trait ChatBackend: Send + Sync + Debug {
    async fn send(&self, message: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    endpoint: String,
    http: Client,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { endpoint: endpoint.into(), http })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.endpoint.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str) -> Result<String> {
        let payload = ChatRequest { message: message.to_string() };

        tracing::debug!(endpoint = %self.endpoint, "sending chat message");

        let res = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.endpoint))?;

        let status = res.status();
        let body = res.text().await.context("Failed to read chat response body")?;

        // An error status still counts when the body carries a reply.
        let parsed: ChatResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(anyhow!(
                    "Chat request failed with status {}: {}",
                    status,
                    truncate_body(&body),
                ));
            }
            Err(e) => return Err(e).context("Failed to parse chat response JSON"),
        };

        tracing::debug!(status = %status, len = parsed.reply.len(), "received chat reply");
        Ok(parsed.reply)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
