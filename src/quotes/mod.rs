//! Content sources for quotes: a remote provider and the compiled-in set.

pub mod bundled;
pub mod remote;

use async_trait::async_trait;
use serde::Deserialize;

pub use remote::QuotableClient;

/// A quote as delivered by a content source, before it is stored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteQuote {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    pub author: String,
}

#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quote(&self) -> anyhow::Result<RemoteQuote>;
}
