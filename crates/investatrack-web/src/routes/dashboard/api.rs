//! Dashboard HTMX partials

use crate::routes::render_list_state;
use crate::AppState;
use investatrack_client::Portfolio;
use investatrack_core::{format_currency_with, gain_loss, load_dashboard, Tone};
use investatrack_utils::escape_html;

pub const EMPTY_MESSAGE: &str = r#"No portfolios found. Click "Load Test Data" to get started!"#;

/// HTMX: Portfolio cards - one fetch per activation
pub async fn htmx_dashboard_list(state: axum::extract::State<AppState>) -> axum::response::Html<String> {
    let controller = load_dashboard(state.api.as_ref(), state.config.display.list_errors).await;
    let symbol = state.config.display.currency_symbol.as_str();

    let html = render_list_state(controller.state(), EMPTY_MESSAGE, |portfolios| {
        let cards: Vec<String> = portfolios.iter().map(|p| render_card(p, symbol)).collect();
        format!(
            "<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4'>{}</div>",
            cards.join("")
        )
    });
    axum::response::Html(html)
}

fn render_card(portfolio: &Portfolio, symbol: &str) -> String {
    let change = gain_loss(portfolio.gain_loss, symbol);
    let tone_class = match change.tone {
        Tone::Success => "text-green-600",
        Tone::Error => "text-red-600",
    };
    let description = portfolio.description.as_deref().unwrap_or("");
    let owner = portfolio.owner_name().unwrap_or("");

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-1'>{}</h3>
            <p class='text-gray-500 mb-4'>{}</p>
            <p class='text-2xl font-bold'>{}</p>
            <p class='text-gray-500'>Total Value</p>
            <p class='mt-2'>Cost: {}</p>
            <p class='font-bold {}'>{}</p>
            <p class='text-sm text-gray-500 mt-2'>Owner: {}</p>
        </div>"#,
        escape_html(&portfolio.name),
        escape_html(description),
        format_currency_with(portfolio.total_value, symbol),
        format_currency_with(portfolio.total_cost, symbol),
        tone_class,
        change.text,
        escape_html(owner)
    )
}
