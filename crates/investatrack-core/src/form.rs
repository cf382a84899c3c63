//! Add Transaction form controller
//!
//! Holds the draft exactly as the user typed it. Only `submit` turns the
//! text into numbers, and only required-field presence is checked locally.
//! Everything else is the backend's call.

use crate::error::ValidationError;
use crate::notice::Notice;
use investatrack_client::{InvestaApi, Portfolio, Stock, Transaction, TransactionRequest, TransactionType};

pub const LOAD_ERROR_MESSAGE: &str = "Error loading data. Make sure backend is running.";
pub const SUBMIT_ERROR_MESSAGE: &str = "Error creating transaction";

/// Names of the posted form fields
pub mod fields {
    pub const PORTFOLIO_ID: &str = "portfolioId";
    pub const STOCK_ID: &str = "stockId";
    pub const TRANSACTION_TYPE: &str = "transactionType";
    pub const QUANTITY: &str = "quantity";
    pub const PRICE_PER_SHARE: &str = "pricePerShare";
    pub const FEES: &str = "fees";
}

/// Not-yet-submitted transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub portfolio_id: String,
    pub stock_id: String,
    pub quantity: String,
    pub price_per_share: String,
    pub fees: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            portfolio_id: String::new(),
            stock_id: String::new(),
            quantity: String::new(),
            price_per_share: String::new(),
            fees: "0".to_string(),
        }
    }
}

impl TransactionDraft {
    /// Required fields left blank, in form order
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            (fields::PORTFOLIO_ID, &self.portfolio_id),
            (fields::STOCK_ID, &self.stock_id),
            (fields::QUANTITY, &self.quantity),
            (fields::PRICE_PER_SHARE, &self.price_per_share),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Freeze the draft into a request body
    pub fn snapshot(&self) -> Result<TransactionRequest, ValidationError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing });
        }

        let portfolio_id = parse_int(&self.portfolio_id, "portfolio")?;
        let stock_id = parse_int(&self.stock_id, "stock")?;
        let quantity = parse_int(&self.quantity, "quantity")?;
        let price_per_share = self
            .price_per_share
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or(ValidationError::InvalidNumber { label: "price" })?;
        let fees = self
            .fees
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0);

        Ok(TransactionRequest {
            portfolio_id,
            stock_id,
            quantity,
            price_per_share,
            fees,
        })
    }
}

/// Read the leading integer of a field, so "10.5" and "10 shares" give 10
fn parse_int(value: &str, label: &'static str) -> Result<i64, ValidationError> {
    let value = value.trim();
    let digits_from = usize::from(value.starts_with(['+', '-']));
    let end = value[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value.len(), |i| i + digits_from);
    value[..end]
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber { label })
}

/// How a submit attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Rejected locally, nothing was sent
    Invalid(ValidationError),
    /// Backend accepted it; carries the echoed transaction when readable
    Created(Option<Transaction>),
    /// Backend call failed; the draft is kept for another try
    Failed,
}

/// State of one Add Transaction page activation
#[derive(Debug, Default)]
pub struct TransactionForm {
    portfolios: Vec<Portfolio>,
    stocks: Vec<Stock>,
    draft: TransactionDraft,
    transaction_type: TransactionType,
    message: Option<Notice>,
    initialized: bool,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn portfolios(&self) -> &[Portfolio] {
        &self.portfolios
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn message(&self) -> Option<&Notice> {
        self.message.as_ref()
    }

    /// Fetch portfolios and stocks concurrently.
    ///
    /// The two fetches fail independently: a failure empties only its own
    /// list and sets the load error message.
    pub async fn initialize(&mut self, api: &dyn InvestaApi) {
        if self.initialized {
            log::debug!("Transaction form already initialized");
            return;
        }
        self.initialized = true;

        let (portfolios, stocks) = tokio::join!(api.list_portfolios(), api.list_stocks());

        match portfolios {
            Ok(portfolios) => self.portfolios = portfolios,
            Err(e) => {
                log::error!("Error loading portfolios for transaction form: {}", e);
                self.portfolios.clear();
                self.message = Some(Notice::Error(LOAD_ERROR_MESSAGE.to_string()));
            }
        }
        match stocks {
            Ok(stocks) => self.stocks = stocks,
            Err(e) => {
                log::error!("Error loading stocks for transaction form: {}", e);
                self.stocks.clear();
                self.message = Some(Notice::Error(LOAD_ERROR_MESSAGE.to_string()));
            }
        }
    }

    pub fn set_portfolio(&mut self, id: &str) {
        self.draft.portfolio_id = id.to_string();
    }

    pub fn set_transaction_type(&mut self, kind: TransactionType) {
        self.transaction_type = kind;
    }

    pub fn set_quantity(&mut self, quantity: &str) {
        self.draft.quantity = quantity.to_string();
    }

    pub fn set_price(&mut self, price: &str) {
        self.draft.price_per_share = price.to_string();
    }

    pub fn set_fees(&mut self, fees: &str) {
        self.draft.fees = fees.to_string();
    }

    /// Choose a stock and prefill the price from its current price.
    ///
    /// An id that matches no loaded stock still becomes the selection, but
    /// the price is left as it was.
    pub fn select_stock(&mut self, id: &str) {
        self.draft.stock_id = id.to_string();
        let Ok(stock_id) = id.trim().parse::<i64>() else {
            return;
        };
        if let Some(stock) = self.stocks.iter().find(|s| s.stock_id == stock_id) {
            self.draft.price_per_share = stock.current_price.to_string();
        }
    }

    /// Apply one posted field without side effects.
    ///
    /// The stock id is stored verbatim here; use [`select_stock`](Self::select_stock)
    /// for the price prefill. Returns false for unknown names or an
    /// unrecognised transaction type.
    pub fn apply_field(&mut self, name: &str, value: &str) -> bool {
        match name {
            fields::PORTFOLIO_ID => self.set_portfolio(value),
            fields::STOCK_ID => self.draft.stock_id = value.to_string(),
            fields::QUANTITY => self.set_quantity(value),
            fields::PRICE_PER_SHARE => self.set_price(value),
            fields::FEES => self.set_fees(value),
            fields::TRANSACTION_TYPE => match value.parse::<TransactionType>() {
                Ok(kind) => self.set_transaction_type(kind),
                Err(_) => return false,
            },
            _ => return false,
        }
        true
    }

    /// Apply every posted field in turn
    pub fn apply_fields<'a, I>(&mut self, posted: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in posted {
            if !self.apply_field(name, value) {
                log::debug!("Ignoring form field {}", name);
            }
        }
    }

    /// Validate, send one create call, and reconcile the draft with the result
    pub async fn submit(&mut self, api: &dyn InvestaApi) -> SubmitOutcome {
        let request = match self.draft.snapshot() {
            Ok(request) => request,
            Err(e) => {
                log::debug!("Transaction form rejected locally: {:?}", e);
                self.message = Some(Notice::Error(e.to_string()));
                return SubmitOutcome::Invalid(e);
            }
        };

        let kind = self.transaction_type;
        let result = match kind {
            TransactionType::Buy => api.create_buy_transaction(&request).await,
            TransactionType::Sell => api.create_sell_transaction(&request).await,
        };

        match result {
            Ok(created) => {
                log::info!(
                    "{} transaction created: portfolio={} stock={} quantity={}",
                    kind, request.portfolio_id, request.stock_id, request.quantity
                );
                self.message = Some(Notice::Success(format!("{} transaction created successfully!", kind)));
                self.draft = TransactionDraft::default();
                SubmitOutcome::Created(created)
            }
            Err(e) => {
                log::error!("Error creating {} transaction: {}", kind, e);
                self.message = Some(Notice::Error(SUBMIT_ERROR_MESSAGE.to_string()));
                SubmitOutcome::Failed
            }
        }
    }

    /// Clear the draft and the message; the transaction type stays
    pub fn reset(&mut self) {
        self.draft = TransactionDraft::default();
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_portfolio, sample_stock, FakeApi};
    use investatrack_client::Endpoint;
    use rust_decimal::Decimal;

    fn filled(form: &mut TransactionForm) {
        form.set_portfolio("1");
        form.select_stock("2");
        form.set_quantity("10");
    }

    async fn ready_form(api: &FakeApi) -> TransactionForm {
        let mut form = TransactionForm::new();
        form.initialize(api).await;
        form
    }

    fn api() -> FakeApi {
        FakeApi::new()
            .with_portfolios(vec![sample_portfolio(1, "Growth Fund", Decimal::ZERO)])
            .with_stocks(vec![sample_stock(2, "AAPL", "123.45"), sample_stock(3, "MSFT", "310.00")])
    }

    #[test]
    fn test_draft_defaults() {
        let draft = TransactionDraft::default();
        assert_eq!(draft.fees, "0");
        assert!(draft.portfolio_id.is_empty());
        assert_eq!(draft.missing_required().len(), 4);
    }

    #[test]
    fn test_snapshot_fee_fallback() {
        let mut draft = TransactionDraft {
            portfolio_id: "1".to_string(),
            stock_id: "2".to_string(),
            quantity: "10".to_string(),
            price_per_share: "123.45".to_string(),
            fees: String::new(),
        };
        assert_eq!(draft.snapshot().unwrap().fees, 0.0);
        draft.fees = "abc".to_string();
        assert_eq!(draft.snapshot().unwrap().fees, 0.0);
        draft.fees = "4.95".to_string();
        assert_eq!(draft.snapshot().unwrap().fees, 4.95);
    }

    #[test]
    fn test_snapshot_rejects_non_numeric_quantity() {
        let draft = TransactionDraft {
            portfolio_id: "1".to_string(),
            stock_id: "2".to_string(),
            quantity: "ten".to_string(),
            price_per_share: "1".to_string(),
            fees: "0".to_string(),
        };
        assert_eq!(draft.snapshot(), Err(ValidationError::InvalidNumber { label: "quantity" }));
    }

    #[test]
    fn test_snapshot_truncates_fractional_quantity() {
        let mut draft = TransactionDraft {
            portfolio_id: " 1".to_string(),
            stock_id: "2".to_string(),
            quantity: "10.5".to_string(),
            price_per_share: "1".to_string(),
            fees: "0".to_string(),
        };
        assert_eq!(draft.snapshot().unwrap().quantity, 10);

        draft.quantity = "-3e2".to_string();
        assert_eq!(draft.snapshot().unwrap().quantity, -3);

        draft.quantity = ".5".to_string();
        assert_eq!(draft.snapshot(), Err(ValidationError::InvalidNumber { label: "quantity" }));
        draft.quantity = "-".to_string();
        assert_eq!(draft.snapshot(), Err(ValidationError::InvalidNumber { label: "quantity" }));
    }

    #[tokio::test]
    async fn test_initialize_loads_both_lists() {
        let api = api();
        let form = ready_form(&api).await;
        assert_eq!(form.portfolios().len(), 1);
        assert_eq!(form.stocks().len(), 2);
        assert!(form.message().is_none());
        assert_eq!(api.calls(Endpoint::ListPortfolios), 1);
        assert_eq!(api.calls(Endpoint::ListStocks), 1);
    }

    #[tokio::test]
    async fn test_initialize_failures_are_independent() {
        let api = FakeApi::new()
            .failing_portfolios()
            .with_stocks(vec![sample_stock(2, "AAPL", "123.45")]);
        let form = ready_form(&api).await;
        assert!(form.portfolios().is_empty());
        assert_eq!(form.stocks().len(), 1);
        assert_eq!(form.message(), Some(&Notice::Error(LOAD_ERROR_MESSAGE.to_string())));
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let api = api();
        let mut form = ready_form(&api).await;
        form.initialize(&api).await;
        assert_eq!(api.calls(Endpoint::ListStocks), 1);
    }

    #[tokio::test]
    async fn test_select_stock_prefills_price() {
        let api = api();
        let mut form = ready_form(&api).await;
        form.select_stock("2");
        assert_eq!(form.draft().stock_id, "2");
        assert_eq!(form.draft().price_per_share, "123.45");
    }

    #[tokio::test]
    async fn test_select_unknown_stock_keeps_price() {
        let api = api();
        let mut form = ready_form(&api).await;
        form.set_price("99");
        form.select_stock("42");
        assert_eq!(form.draft().stock_id, "42");
        assert_eq!(form.draft().price_per_share, "99");
        form.select_stock("");
        assert_eq!(form.draft().price_per_share, "99");
    }

    #[tokio::test]
    async fn test_submit_missing_field_sends_nothing() {
        let api = api();
        for skip in 0..4 {
            let mut form = ready_form(&api).await;
            if skip != 0 {
                form.set_portfolio("1");
            }
            if skip != 1 {
                form.select_stock("2");
            }
            if skip != 2 {
                form.set_quantity("10");
            }
            if skip == 3 {
                form.set_price("  ");
            }
            let outcome = form.submit(&api).await;
            assert!(matches!(outcome, SubmitOutcome::Invalid(ValidationError::MissingFields { .. })));
            assert_eq!(form.message(), Some(&Notice::Error("Please fill in all required fields".to_string())));
        }
        assert_eq!(api.calls(Endpoint::CreateBuy), 0);
        assert_eq!(api.calls(Endpoint::CreateSell), 0);
    }

    #[tokio::test]
    async fn test_submit_buy_success_resets_draft_keeps_type() {
        let api = api();
        let mut form = ready_form(&api).await;
        filled(&mut form);
        form.set_fees("");

        let outcome = form.submit(&api).await;
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert_eq!(api.calls(Endpoint::CreateBuy), 1);
        assert_eq!(api.calls(Endpoint::CreateSell), 0);

        let sent = api.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            TransactionRequest { portfolio_id: 1, stock_id: 2, quantity: 10, price_per_share: 123.45, fees: 0.0 }
        );

        assert_eq!(form.draft(), &TransactionDraft::default());
        assert_eq!(form.transaction_type(), TransactionType::Buy);
        let message = form.message().unwrap();
        assert!(!message.is_error());
        assert!(message.text().contains("BUY"));
    }

    #[tokio::test]
    async fn test_submit_sell_uses_sell_endpoint() {
        let api = api();
        let mut form = ready_form(&api).await;
        filled(&mut form);
        form.set_transaction_type(TransactionType::Sell);
        form.submit(&api).await;
        assert_eq!(api.calls(Endpoint::CreateSell), 1);
        assert_eq!(form.transaction_type(), TransactionType::Sell);
        assert_eq!(form.message().map(|m| m.text()), Some("SELL transaction created successfully!"));
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft() {
        let api = api().failing_creates();
        let mut form = ready_form(&api).await;
        filled(&mut form);
        form.set_fees("1.50");
        let before = form.draft().clone();

        assert_eq!(form.submit(&api).await, SubmitOutcome::Failed);
        assert_eq!(form.draft(), &before);
        assert_eq!(form.message(), Some(&Notice::Error(SUBMIT_ERROR_MESSAGE.to_string())));
        assert_eq!(api.calls(Endpoint::CreateBuy), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_draft_and_message() {
        let api = api().failing_creates();
        let mut form = ready_form(&api).await;
        filled(&mut form);
        form.set_transaction_type(TransactionType::Sell);
        form.submit(&api).await;
        form.reset();
        assert_eq!(form.draft(), &TransactionDraft::default());
        assert!(form.message().is_none());
        assert_eq!(form.transaction_type(), TransactionType::Sell);
    }

    #[test]
    fn test_apply_fields() {
        let mut form = TransactionForm::new();
        form.apply_fields([
            ("portfolioId", "1"),
            ("stockId", "2"),
            ("transactionType", "SELL"),
            ("quantity", "5"),
            ("pricePerShare", "10.5"),
            ("fees", "1"),
            ("formId", "abc"),
        ]);
        assert_eq!(form.draft().portfolio_id, "1");
        assert_eq!(form.draft().stock_id, "2");
        assert_eq!(form.draft().price_per_share, "10.5");
        assert_eq!(form.transaction_type(), TransactionType::Sell);
        assert!(!form.apply_field("transactionType", "HOLD"));
    }
}
