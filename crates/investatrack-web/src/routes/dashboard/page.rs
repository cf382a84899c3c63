//! Dashboard page rendering

use crate::{lazy_container, page_response};

pub const TITLE: &str = "My Portfolios";

/// Dashboard page - shell in the loading state, cards arrive via `/dashboard/list`
pub async fn page_dashboard(headers: axum::http::HeaderMap) -> axum::response::Html<String> {
    let inner_content = format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>{}</h2></div>{}",
        TITLE,
        lazy_container("dashboard-content", "/dashboard/list")
    );
    axum::response::Html(page_response(&headers, TITLE, "/dashboard", &inner_content))
}
