//! View state of the list pages (Dashboard, Transaction History)
//!
//! Each page activation owns one [`ListController`]. It starts in
//! [`ViewState::Loading`], issues exactly one fetch, and settles into
//! `Ready` or `Error` depending on the configured [`ListErrorPolicy`].

use investatrack_client::{ClientResult, InvestaApi, Portfolio, Transaction};
use investatrack_config::ListErrorPolicy;
use std::future::Future;

/// Render-relevant state of a page
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Error(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Fetch-then-render lifecycle of a list page
#[derive(Debug)]
pub struct ListController<T> {
    /// What the page lists, used in diagnostics and the error banner
    subject: &'static str,
    policy: ListErrorPolicy,
    state: ViewState<Vec<T>>,
}

impl<T> ListController<T> {
    pub fn new(subject: &'static str, policy: ListErrorPolicy) -> Self {
        Self {
            subject,
            policy,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<T>> {
        &self.state
    }

    /// Run the page's single fetch and settle.
    ///
    /// Once settled, further calls do nothing; a new activation needs a new
    /// controller.
    pub async fn load<F, Fut>(&mut self, fetch: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Vec<T>>>,
    {
        if !self.state.is_loading() {
            log::debug!("{} already loaded for this activation", self.subject);
            return;
        }
        let result = fetch().await;
        self.settle(result);
    }

    /// Apply the outcome of the fetch
    pub fn settle(&mut self, result: ClientResult<Vec<T>>) {
        self.state = match result {
            Ok(items) => {
                log::debug!("Loaded {} {}", items.len(), self.subject);
                ViewState::Ready(items)
            }
            Err(e) => {
                log::warn!("Error fetching {}: {}", self.subject, e);
                match self.policy {
                    ListErrorPolicy::Silent => ViewState::Ready(Vec::new()),
                    ListErrorPolicy::Banner => ViewState::Error(format!(
                        "Error loading {}. Make sure backend is running.",
                        self.subject
                    )),
                }
            }
        };
    }
}

pub type DashboardController = ListController<Portfolio>;
pub type TransactionHistoryController = ListController<Transaction>;

/// Activate the Dashboard: one portfolios fetch
pub async fn load_dashboard(api: &dyn InvestaApi, policy: ListErrorPolicy) -> DashboardController {
    let mut controller = ListController::new("portfolios", policy);
    controller.load(|| api.list_portfolios()).await;
    controller
}

/// Activate Transaction History: one transactions fetch
pub async fn load_transaction_history(api: &dyn InvestaApi, policy: ListErrorPolicy) -> TransactionHistoryController {
    let mut controller = ListController::new("transactions", policy);
    controller.load(|| api.list_transactions()).await;
    controller
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_portfolio, sample_transaction, FakeApi};
    use investatrack_client::Endpoint;
    use rust_decimal::Decimal;

    #[test]
    fn test_starts_loading() {
        let controller: DashboardController = ListController::new("portfolios", ListErrorPolicy::Silent);
        assert!(controller.state().is_loading());
    }

    #[tokio::test]
    async fn test_dashboard_ready_with_data() {
        let api = FakeApi::new().with_portfolios(vec![sample_portfolio(1, "Growth Fund", Decimal::new(-795, 2))]);
        let controller = load_dashboard(&api, ListErrorPolicy::Silent).await;
        assert!(matches!(controller.state(), ViewState::Ready(items) if items.len() == 1));
        assert_eq!(api.calls(Endpoint::ListPortfolios), 1);
    }

    #[tokio::test]
    async fn test_empty_collection_is_ready() {
        let api = FakeApi::new();
        let controller = load_transaction_history(&api, ListErrorPolicy::Silent).await;
        assert_eq!(controller.state(), &ViewState::Ready(Vec::new()));
    }

    #[tokio::test]
    async fn test_silent_policy_falls_back_to_empty() {
        let api = FakeApi::new().failing_transactions();
        let controller = load_transaction_history(&api, ListErrorPolicy::Silent).await;
        assert_eq!(controller.state(), &ViewState::Ready(Vec::new()));
    }

    #[tokio::test]
    async fn test_banner_policy_reports_error() {
        let api = FakeApi::new().failing_portfolios();
        let controller = load_dashboard(&api, ListErrorPolicy::Banner).await;
        match controller.state() {
            ViewState::Error(message) => assert!(message.contains("portfolios")),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_one_fetch_per_activation() {
        let api = FakeApi::new().with_transactions(vec![sample_transaction(1, "BUY")]);
        let mut controller = load_transaction_history(&api, ListErrorPolicy::Silent).await;
        controller.load(|| api.list_transactions()).await;
        assert_eq!(api.calls(Endpoint::ListTransactions), 1);

        // A second activation is independent and fetches again
        let _again = load_transaction_history(&api, ListErrorPolicy::Silent).await;
        assert_eq!(api.calls(Endpoint::ListTransactions), 2);
    }
}
