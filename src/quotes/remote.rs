use std::time::Duration;

use async_trait::async_trait;

use super::{QuoteSource, RemoteQuote};

/// Client for a Quotable-compatible API (`GET {base_url}/random`).
#[derive(Clone)]
pub struct QuotableClient {
    client: reqwest::Client,
    base_url: String,
}

impl QuotableClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn random_url(&self) -> String {
        format!("{}/random", self.base_url)
    }
}

#[async_trait]
impl QuoteSource for QuotableClient {
    async fn fetch_quote(&self) -> anyhow::Result<RemoteQuote> {
        let response = self.client.get(self.random_url()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Quote API error {}: {}", status, body);
        }

        let quote: RemoteQuote = response.json().await?;
        if quote.id.is_empty() || quote.content.trim().is_empty() {
            anyhow::bail!("Quote API returned an empty quote");
        }

        tracing::debug!(quote_id = %quote.id, "Fetched remote quote");
        Ok(quote)
    }
}
