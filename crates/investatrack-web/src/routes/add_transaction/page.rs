//! Add Transaction page rendering

use crate::{page_response, render_notice, AppState};
use investatrack_client::TransactionType;
use investatrack_core::form::fields;
use investatrack_core::{DataEvent, TransactionForm};
use investatrack_utils::escape_html;

pub const TITLE: &str = "Add Transaction";

/// Add Transaction page - opens a fresh form session and initializes it
pub async fn page_add_transaction(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let (id, handle) = state.sessions.open(TransactionForm::new()).await;
    let mut form = handle.lock().await;
    form.initialize(state.api.as_ref()).await;

    let inner_content = format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>{}</h2></div>{}",
        TITLE,
        render_form(&id, &form)
    );
    axum::response::Html(page_response(&headers, TITLE, "/add-transaction", &inner_content))
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value='{}'{}>{}</option>",
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

fn input(label: &str, name: &str, value: &str, step: &str, required: bool) -> String {
    format!(
        "<label class='flex flex-col gap-1'><span class='text-sm text-gray-600'>{}</span>\
         <input type='number' name='{}' value='{}' step='{}'{} class='px-4 py-2 border rounded-lg'></label>",
        label,
        name,
        escape_html(value),
        step,
        if required { " required" } else { "" }
    )
}

/// The whole form block, swapped as a unit by every form operation
pub fn render_form(id: &str, form: &TransactionForm) -> String {
    let draft = form.draft();
    let kind = form.transaction_type();
    let base = format!("/add-transaction/{}", escape_html(id));

    let mut portfolio_options = option("", "Select a portfolio", draft.portfolio_id.is_empty());
    for portfolio in form.portfolios() {
        let value = portfolio.portfolio_id.to_string();
        portfolio_options.push_str(&option(&value, &portfolio.name, value == draft.portfolio_id.trim()));
    }

    let mut stock_options = option("", "Select a stock", draft.stock_id.is_empty());
    for stock in form.stocks() {
        let value = stock.stock_id.to_string();
        stock_options.push_str(&option(&value, &stock.display_name(), value == draft.stock_id.trim()));
    }

    let type_options = [TransactionType::Buy, TransactionType::Sell]
        .iter()
        .map(|t| {
            let label = if *t == TransactionType::Buy { "Buy" } else { "Sell" };
            option(t.as_str(), label, *t == kind)
        })
        .collect::<String>();

    let message = form.message().map(render_notice).unwrap_or_default();

    format!(
        r#"<div id='add-transaction' hx-get='{base}/reload' hx-trigger='{trigger} from:body' hx-swap='outerHTML'>
    <div class='bg-white rounded-xl shadow-sm p-6 max-w-xl'>
        {message}
        <form hx-post='{base}/submit' hx-target='#add-transaction' hx-swap='outerHTML' class='flex flex-col gap-4'>
            <label class='flex flex-col gap-1'><span class='text-sm text-gray-600'>Portfolio</span>
                <select name='{portfolio_field}' required class='px-4 py-2 border rounded-lg'>{portfolio_options}</select></label>
            <label class='flex flex-col gap-1'><span class='text-sm text-gray-600'>Transaction Type</span>
                <select name='{type_field}' class='px-4 py-2 border rounded-lg'>{type_options}</select></label>
            <label class='flex flex-col gap-1'><span class='text-sm text-gray-600'>Stock</span>
                <select name='{stock_field}' required hx-post='{base}/stock' hx-trigger='change' class='px-4 py-2 border rounded-lg'>{stock_options}</select></label>
            {quantity}
            {price}
            {fees}
            <div class='flex gap-2 justify-end'>
                <button type='button' hx-post='{base}/reset' class='px-4 py-2 border border-indigo-600 text-indigo-600 rounded-lg'>Reset</button>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Create {kind} Transaction</button>
            </div>
        </form>
    </div>
</div>"#,
        base = base,
        trigger = DataEvent::TRIGGER,
        message = message,
        portfolio_field = fields::PORTFOLIO_ID,
        portfolio_options = portfolio_options,
        type_field = fields::TRANSACTION_TYPE,
        type_options = type_options,
        stock_field = fields::STOCK_ID,
        stock_options = stock_options,
        quantity = input("Quantity", fields::QUANTITY, &draft.quantity, "1", true),
        price = input("Price per Share", fields::PRICE_PER_SHARE, &draft.price_per_share, "0.01", true),
        fees = input("Fees", fields::FEES, &draft.fees, "0.01", false),
        kind = kind,
    )
}
