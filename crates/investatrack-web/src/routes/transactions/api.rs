//! Transaction history HTMX partials

use crate::routes::render_list_state;
use crate::AppState;
use investatrack_client::{Transaction, TransactionType};
use investatrack_core::{format_currency_with, format_date, load_transaction_history};
use investatrack_utils::escape_html;

pub const EMPTY_MESSAGE: &str = r#"No transactions found. Use "Load Test Data" to create sample transactions."#;

/// HTMX: Transaction table - one fetch per activation, in backend order
pub async fn htmx_transactions_list(state: axum::extract::State<AppState>) -> axum::response::Html<String> {
    let controller = load_transaction_history(state.api.as_ref(), state.config.display.list_errors).await;
    let display = &state.config.display;

    let html = render_list_state(controller.state(), EMPTY_MESSAGE, |transactions| {
        let rows: Vec<String> = transactions
            .iter()
            .map(|tx| render_row(tx, &display.currency_symbol, &display.date_format))
            .collect();
        format!(
            r#"<p class='mb-4'>Total Transactions: {}</p>
            <div class='bg-white rounded-xl shadow-sm overflow-x-auto'>
                <table class='min-w-full text-sm'>
                    <thead class='bg-gray-50 text-left'>
                        <tr><th class='px-4 py-3'>Date</th><th class='px-4 py-3'>Portfolio</th><th class='px-4 py-3'>Type</th><th class='px-4 py-3'>Stock</th><th class='px-4 py-3'>Quantity</th><th class='px-4 py-3'>Price</th><th class='px-4 py-3'>Total</th></tr>
                    </thead>
                    <tbody>{}</tbody>
                </table>
            </div>"#,
            transactions.len(),
            rows.join("")
        )
    });
    axum::response::Html(html)
}

fn type_chip(kind: TransactionType) -> String {
    let class = match kind {
        TransactionType::Buy => "bg-indigo-100 text-indigo-700",
        TransactionType::Sell => "bg-pink-100 text-pink-700",
    };
    format!("<span class='px-2 py-1 rounded-full text-xs font-medium {}'>{}</span>", class, kind)
}

fn render_row(tx: &Transaction, symbol: &str, date_format: &str) -> String {
    format!(
        r#"<tr class='border-t'>
            <td class='px-4 py-3'>{}</td>
            <td class='px-4 py-3'>{}</td>
            <td class='px-4 py-3'>{}</td>
            <td class='px-4 py-3'><strong>{}</strong><br><small class='text-gray-500'>{}</small></td>
            <td class='px-4 py-3'>{}</td>
            <td class='px-4 py-3'>{}</td>
            <td class='px-4 py-3'>{}</td>
        </tr>"#,
        escape_html(&format_date(&tx.transaction_date, date_format)),
        escape_html(&tx.portfolio_name),
        type_chip(tx.transaction_type),
        escape_html(&tx.stock_symbol),
        escape_html(&tx.stock_name),
        tx.quantity,
        format_currency_with(tx.price_per_share, symbol),
        format_currency_with(tx.total_amount, symbol)
    )
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::*;
    use investatrack_client::Endpoint;
    use investatrack_core::testing::{sample_transaction, FakeApi};

    #[tokio::test]
    async fn test_shell_is_lazy() {
        let (state, api) = state_with(FakeApi::new());
        let body = body_text(send(create_router(state), get("/transactions")).await).await;
        assert!(body.contains("Transaction History"));
        assert!(body.contains("hx-get='/transactions/list'"));
        assert_eq!(api.calls(Endpoint::ListTransactions), 0);
    }

    #[tokio::test]
    async fn test_table_rows() {
        let mut odd_date = sample_transaction(2, "SELL");
        odd_date.transaction_date = "yesterday".to_string();
        let api = FakeApi::new().with_transactions(vec![sample_transaction(1, "BUY"), odd_date]);
        let (state, api) = state_with(api);
        let body = body_text(send(create_router(state), htmx_get("/transactions/list")).await).await;

        assert_eq!(api.calls(Endpoint::ListTransactions), 1);
        assert!(body.contains("Total Transactions: 2"));
        assert!(body.contains("1/15/2024"));
        assert!(body.contains("yesterday"));
        assert!(body.contains("bg-indigo-100 text-indigo-700'>BUY</span>"));
        assert!(body.contains("bg-pink-100 text-pink-700'>SELL</span>"));
        assert!(body.contains("<strong>AAPL</strong>"));
        assert!(body.contains("$190.23"));
        assert!(body.contains("$1,902.30"));
    }

    #[tokio::test]
    async fn test_empty_and_failed_lists_show_guidance() {
        let (state, _) = state_with(FakeApi::new());
        let body = body_text(send(create_router(state), htmx_get("/transactions/list")).await).await;
        assert!(body.contains("No transactions found."));

        let (state, _) = state_with(FakeApi::new().failing_transactions());
        let body = body_text(send(create_router(state), htmx_get("/transactions/list")).await).await;
        assert!(body.contains("No transactions found."));
        assert!(!body.contains("Total Transactions"));
    }

    #[tokio::test]
    async fn test_each_activation_fetches_again() {
        let (state, api) = state_with(FakeApi::new());
        let router = create_router(state);
        send(router.clone(), htmx_get("/transactions/list")).await;
        send(router, htmx_get("/transactions/list")).await;
        assert_eq!(api.calls(Endpoint::ListTransactions), 2);
    }
}
