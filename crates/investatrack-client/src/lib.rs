//! Typed HTTP client for the InvestaTrack REST service
//!
//! Every backend operation is one method on [`InvestaApi`] and performs
//! exactly one HTTP call. There are no retries and no auth headers.

pub mod error;
pub mod models;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use error::{ClientError, ClientErrorCode, ClientResult};
pub use models::{Owner, OwnerRef, Portfolio, Stock, Transaction, TransactionRequest, TransactionType};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Backend operations and where they live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListPortfolios,
    ListStocks,
    ListTransactions,
    CreateBuy,
    CreateSell,
    LoadTestData,
    ClearTestData,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::CreateBuy | Endpoint::CreateSell => Method::POST,
            Endpoint::ClearTestData => Method::DELETE,
            _ => Method::GET,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ListPortfolios => "/api/portfolios",
            Endpoint::ListStocks => "/api/stocks",
            Endpoint::ListTransactions => "/test/transactions",
            Endpoint::CreateBuy => "/api/transactions/buy",
            Endpoint::CreateSell => "/api/transactions/sell",
            Endpoint::LoadTestData => "/test/load",
            Endpoint::ClearTestData => "/test/clear",
        }
    }

    /// Create endpoint for a transaction direction
    pub fn create_for(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Buy => Endpoint::CreateBuy,
            TransactionType::Sell => Endpoint::CreateSell,
        }
    }
}

/// The backend as seen by page controllers
#[async_trait]
pub trait InvestaApi: Send + Sync {
    async fn list_portfolios(&self) -> ClientResult<Vec<Portfolio>>;

    async fn list_stocks(&self) -> ClientResult<Vec<Stock>>;

    async fn list_transactions(&self) -> ClientResult<Vec<Transaction>>;

    /// Returns the created transaction when the response body could be read
    async fn create_buy_transaction(&self, request: &TransactionRequest) -> ClientResult<Option<Transaction>>;

    async fn create_sell_transaction(&self, request: &TransactionRequest) -> ClientResult<Option<Transaction>>;

    /// Returns the backend's status text
    async fn load_test_data(&self) -> ClientResult<String>;

    async fn clear_test_data(&self) -> ClientResult<String>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// [`InvestaApi`] over HTTP
#[derive(Clone)]
pub struct HttpApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!("investatrack-web/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Send one request and hand back the body of a 2xx response
    async fn send(&self, endpoint: Endpoint, body: Option<&TransactionRequest>) -> ClientResult<String> {
        let url = self.url(endpoint);
        log::debug!("{} {}", endpoint.method(), url);

        let mut request = self.http.request(endpoint.method(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::from_status(status.as_u16(), &text));
        }
        Ok(text)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ClientResult<T> {
        let text = self.send(endpoint, None).await?;
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(format!("{}: {}", endpoint.path(), e)))
    }

    async fn create(&self, endpoint: Endpoint, request: &TransactionRequest) -> ClientResult<Option<Transaction>> {
        let text = self.send(endpoint, Some(request)).await?;
        match serde_json::from_str::<Transaction>(&text) {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                // The write already happened; do not report it as a failure
                log::warn!("Created transaction but could not read response from {}: {}", endpoint.path(), e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl InvestaApi for HttpApiClient {
    async fn list_portfolios(&self) -> ClientResult<Vec<Portfolio>> {
        let mut portfolios: Vec<Portfolio> = self.fetch_json(Endpoint::ListPortfolios).await?;
        Portfolio::resolve_owners(&mut portfolios);
        Ok(portfolios)
    }

    async fn list_stocks(&self) -> ClientResult<Vec<Stock>> {
        self.fetch_json(Endpoint::ListStocks).await
    }

    async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.fetch_json(Endpoint::ListTransactions).await
    }

    async fn create_buy_transaction(&self, request: &TransactionRequest) -> ClientResult<Option<Transaction>> {
        self.create(Endpoint::CreateBuy, request).await
    }

    async fn create_sell_transaction(&self, request: &TransactionRequest) -> ClientResult<Option<Transaction>> {
        self.create(Endpoint::CreateSell, request).await
    }

    async fn load_test_data(&self) -> ClientResult<String> {
        self.send(Endpoint::LoadTestData, None).await
    }

    async fn clear_test_data(&self) -> ClientResult<String> {
        self.send(Endpoint::ClearTestData, None).await
    }
}
