use async_trait::async_trait;
use reqwest::{Client, Request};
use tracing::debug;

use crate::category::Category;
use crate::error::FetchError;
use crate::quote::Quote;

pub const DEFAULT_BASE_URL: &str = "https://api.api-ninjas.com";
const API_KEY_HEADER: &str = "X-Api-Key";

/// Anything that can produce a quote for a category.
///
/// The refresh scheduler only talks to this trait, so hosts and tests can
/// swap in their own source.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self, category: Category) -> Result<Quote, FetchError>;
}

/// Client for the API Ninjas quotes endpoint.
#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl QuoteClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the GET request for one quote in `category`.
    pub fn build_request(&self, category: Category) -> Result<Request, FetchError> {
        let url = format!("{}/v1/quotes", self.base_url);

        let request = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("category", category.id())])
            .build()?;

        Ok(request)
    }

    /// Fetch one quote. A missing category falls back to the default (`art`).
    pub async fn fetch_quote(&self, category: Option<Category>) -> Result<Quote, FetchError> {
        let category = category.unwrap_or_default();
        let request = self.build_request(category)?;

        debug!(url = %request.url(), "Requesting quote");

        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = response.bytes().await?;
        let quote = decode_quotes(&body)?;

        debug!(author = %quote.author, "Received quote");
        Ok(quote)
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    async fn fetch(&self, category: Category) -> Result<Quote, FetchError> {
        self.fetch_quote(Some(category)).await
    }
}

/// Decode a quotes API body and keep only the first quote.
pub fn decode_quotes(body: &[u8]) -> Result<Quote, FetchError> {
    let quotes: Vec<Quote> = serde_json::from_slice(body)?;
    quotes.into_iter().next().ok_or(FetchError::EmptyResponse)
}
