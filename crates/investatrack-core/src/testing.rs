//! In-memory [`InvestaApi`] for tests
//!
//! Every call is counted per endpoint and create requests are recorded, so
//! tests can assert exactly what reached the "backend".

use async_trait::async_trait;
use investatrack_client::{
    ClientError, ClientResult, Endpoint, InvestaApi, Owner, OwnerRef, Portfolio, Stock, Transaction,
    TransactionRequest, TransactionType,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

fn unreachable_backend() -> ClientError {
    ClientError::Transport("connection refused".to_string())
}

pub struct FakeApi {
    portfolios: Option<Vec<Portfolio>>,
    stocks: Option<Vec<Stock>>,
    transactions: Option<Vec<Transaction>>,
    creates_fail: bool,
    test_data_fails: bool,
    calls: Mutex<HashMap<Endpoint, usize>>,
    requests: Mutex<Vec<TransactionRequest>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeApi {
    /// Every call succeeds, every list is empty
    pub fn new() -> Self {
        Self {
            portfolios: Some(Vec::new()),
            stocks: Some(Vec::new()),
            transactions: Some(Vec::new()),
            creates_fail: false,
            test_data_fails: false,
            calls: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_portfolios(mut self, portfolios: Vec<Portfolio>) -> Self {
        self.portfolios = Some(portfolios);
        self
    }

    pub fn failing_portfolios(mut self) -> Self {
        self.portfolios = None;
        self
    }

    pub fn with_stocks(mut self, stocks: Vec<Stock>) -> Self {
        self.stocks = Some(stocks);
        self
    }

    pub fn failing_stocks(mut self) -> Self {
        self.stocks = None;
        self
    }

    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    pub fn failing_transactions(mut self) -> Self {
        self.transactions = None;
        self
    }

    pub fn failing_creates(mut self) -> Self {
        self.creates_fail = true;
        self
    }

    pub fn failing_test_data(mut self) -> Self {
        self.test_data_fails = true;
        self
    }

    /// How many times an endpoint was called
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls.lock().map(|c| c.get(&endpoint).copied().unwrap_or(0)).unwrap_or(0)
    }

    /// Create request bodies in the order they were sent
    pub fn requests(&self) -> Vec<TransactionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, endpoint: Endpoint) {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(endpoint).or_insert(0) += 1;
        }
    }

    fn list<T: Clone>(&self, endpoint: Endpoint, source: &Option<Vec<T>>) -> ClientResult<Vec<T>> {
        self.record(endpoint);
        source.clone().ok_or_else(unreachable_backend)
    }

    fn create(&self, kind: TransactionType, request: &TransactionRequest) -> ClientResult<Option<Transaction>> {
        self.record(Endpoint::create_for(kind));
        if self.creates_fail {
            return Err(ClientError::Status {
                status: 400,
                message: "Invalid transaction data".to_string(),
            });
        }
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let id = self.requests().len() as i64;
        let mut created = sample_transaction(id, kind.as_str());
        created.quantity = request.quantity;
        Ok(Some(created))
    }
}

#[async_trait]
impl InvestaApi for FakeApi {
    async fn list_portfolios(&self) -> ClientResult<Vec<Portfolio>> {
        self.list(Endpoint::ListPortfolios, &self.portfolios)
    }

    async fn list_stocks(&self) -> ClientResult<Vec<Stock>> {
        self.list(Endpoint::ListStocks, &self.stocks)
    }

    async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.list(Endpoint::ListTransactions, &self.transactions)
    }

    async fn create_buy_transaction(&self, request: &TransactionRequest) -> ClientResult<Option<Transaction>> {
        self.create(TransactionType::Buy, request)
    }

    async fn create_sell_transaction(&self, request: &TransactionRequest) -> ClientResult<Option<Transaction>> {
        self.create(TransactionType::Sell, request)
    }

    async fn load_test_data(&self) -> ClientResult<String> {
        self.record(Endpoint::LoadTestData);
        if self.test_data_fails {
            return Err(unreachable_backend());
        }
        Ok("Test data loaded successfully".to_string())
    }

    async fn clear_test_data(&self) -> ClientResult<String> {
        self.record(Endpoint::ClearTestData);
        if self.test_data_fails {
            return Err(unreachable_backend());
        }
        Ok("All data cleared".to_string())
    }
}

pub fn sample_portfolio(id: i64, name: &str, gain_loss: Decimal) -> Portfolio {
    Portfolio {
        portfolio_id: id,
        name: name.to_string(),
        description: Some(format!("{} test portfolio", name)),
        total_value: Decimal::new(190230, 2),
        total_cost: Decimal::new(190230, 2) - gain_loss,
        gain_loss,
        user_name: None,
        user: Some(OwnerRef::Full(Owner {
            id: Some(1),
            username: Some("alice".to_string()),
            full_name: Some("Alice Smith".to_string()),
        })),
    }
}

pub fn sample_stock(id: i64, symbol: &str, price: &str) -> Stock {
    Stock {
        stock_id: id,
        symbol: symbol.to_string(),
        company_name: format!("{} Inc.", symbol),
        current_price: Decimal::from_str(price).unwrap_or_default(),
        sector: None,
    }
}

pub fn sample_transaction(id: i64, kind: &str) -> Transaction {
    Transaction {
        transaction_id: id,
        transaction_date: "2024-01-15T10:30:00".to_string(),
        portfolio_name: "Growth Fund".to_string(),
        transaction_type: kind.parse().unwrap_or_default(),
        stock_symbol: "AAPL".to_string(),
        stock_name: "Apple Inc.".to_string(),
        quantity: 10,
        price_per_share: Decimal::new(19023, 2),
        total_amount: Decimal::new(190230, 2),
        fees: Some(Decimal::new(495, 2)),
        description: None,
        net_amount: None,
    }
}
