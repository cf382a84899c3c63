//! Transaction history page rendering

use crate::{lazy_container, page_response};

pub const TITLE: &str = "Transaction History";

/// Transaction history page - table arrives via `/transactions/list`
pub async fn page_transactions(headers: axum::http::HeaderMap) -> axum::response::Html<String> {
    let inner_content = format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>{}</h2></div>{}",
        TITLE,
        lazy_container("transactions-content", "/transactions/list")
    );
    axum::response::Html(page_response(&headers, TITLE, "/transactions", &inner_content))
}
