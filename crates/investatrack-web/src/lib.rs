//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Portfolio cards
//! - routes::transactions: Transaction history table
//! - routes::add_transaction: Transaction form sessions
//! - routes::test_data: Sample data actions from the navigation bar

pub mod error;
pub mod routes;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use investatrack_client::InvestaApi;
use investatrack_config::Config;
use investatrack_core::{DataEvent, FormSessions, Notice};
use investatrack_utils::escape_html;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::WebError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn InvestaApi>,
    pub config: Config,
    pub sessions: Arc<FormSessions>,
}

impl AppState {
    pub fn new(api: Arc<dyn InvestaApi>, config: Config) -> Self {
        let sessions = Arc::new(FormSessions::new(config.forms.max_sessions));
        Self { api, config, sessions }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::add_transaction::{
        htmx_form_reload, htmx_form_reset, htmx_form_submit, htmx_select_stock, page_add_transaction,
    };
    use routes::dashboard::{htmx_dashboard_list, page_dashboard};
    use routes::test_data::{htmx_clear_test_data, htmx_load_test_data};
    use routes::transactions::{htmx_transactions_list, page_transactions};

    Router::new()
        .route("/api/health", get(health_check))
        // Pages
        .route("/", get(page_dashboard))
        .route("/dashboard", get(page_dashboard))
        .route("/transactions", get(page_transactions))
        .route("/add-transaction", get(page_add_transaction))
        // HTMX partials
        .route("/dashboard/list", get(htmx_dashboard_list))
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/add-transaction/:id/stock", post(htmx_select_stock))
        .route("/add-transaction/:id/submit", post(htmx_form_submit))
        .route("/add-transaction/:id/reset", post(htmx_form_reset))
        .route("/add-transaction/:id/reload", get(htmx_form_reload))
        .route("/test-data/load", post(htmx_load_test_data))
        .route("/test-data/clear", post(htmx_clear_test_data))
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "backend": state.config.backend.base_url,
    }))
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - InvestaTrack</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Top navigation bar with the sample data actions
pub fn nav_bar(current_path: &str) -> String {
    let links = [
        ("/", "Dashboard"),
        ("/transactions", "Transactions"),
        ("/add-transaction", "Add Transaction"),
    ];

    let mut nav = String::from(
        "<nav class='bg-indigo-600 text-white'><div class='max-w-6xl mx-auto px-4 py-3 flex items-center gap-2'>\
         <a href='/' class='text-xl font-bold flex-1'>InvestaTrack</a>",
    );

    for (path, label) in &links {
        let is_active = if *path == "/" {
            current_path == "/" || current_path == "/dashboard"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-indigo-700" } else { "hover:bg-indigo-500" };
        nav.push_str(&format!(
            "<a href='{}' class='px-3 py-2 rounded-lg uppercase text-sm {}'>{}</a>",
            path, active_class, label
        ));
    }

    nav.push_str(
        "<button hx-post='/test-data/load' hx-target='#notice' hx-swap='innerHTML' \
         class='px-3 py-2 rounded-lg uppercase text-sm hover:bg-indigo-500'>Load Test Data</button>\
         <button hx-post='/test-data/clear' hx-target='#notice' hx-swap='innerHTML' \
         class='px-3 py-2 rounded-lg uppercase text-sm hover:bg-indigo-500'>Clear Data</button>\
         </div></nav>",
    );
    nav
}

/// Success or error alert box
pub fn render_notice(notice: &Notice) -> String {
    let class = if notice.is_error() {
        "bg-red-50 border-red-200 text-red-700"
    } else {
        "bg-green-50 border-green-200 text-green-700"
    };
    format!(
        "<div class='mb-4 p-3 rounded-lg border {}' role='alert'>{}</div>",
        class,
        escape_html(notice.text())
    )
}

/// Spinner shown while a view is in its loading state
pub fn render_loading() -> String {
    r#"<div class='text-center py-12 text-gray-500'><div class='inline-block h-8 w-8 rounded-full border-4 border-indigo-200 border-t-indigo-600 animate-spin'></div></div>"#
        .to_string()
}

/// Content container that fetches its partial on load and again whenever the
/// backend data is invalidated
pub fn lazy_container(id: &str, source: &str) -> String {
    format!(
        "<div id='{}' hx-get='{}' hx-trigger='load, {} from:body' hx-swap='innerHTML'>{}</div>",
        id,
        source,
        DataEvent::TRIGGER,
        render_loading()
    )
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!("<main class='max-w-6xl mx-auto p-6'>{}</main>", inner_content)
    } else {
        base_html(
            title,
            &format!(
                "{}<main class='max-w-6xl mx-auto p-6'><div id='notice'></div>{}</main>",
                nav_bar(current_path),
                inner_content
            ),
        )
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process is stopped.
pub async fn start_server(config: Config, api: Arc<dyn InvestaApi>) -> Result<(), WebError> {
    let addr = config.listen_addr();
    let backend = config.backend.base_url.clone();
    let router = create_router(AppState::new(api, config));

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| WebError::Bind { addr: addr.clone(), message: e.to_string() })?;
    log::info!("Starting InvestaTrack on http://{}", addr);
    log::info!("Backend service: {}", backend);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /transactions (Transaction history)");
    log::info!("  - /add-transaction (Add transaction)");
    log::info!("  - /api/health (Liveness)");

    axum::serve(listener, router)
        .await
        .map_err(|e| WebError::Serve(e.to_string()))?;
    log::info!("Server stopped gracefully");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::{body_text, get, send, state_with};
    use super::{create_router, nav_bar, page_response, render_notice};
    use axum::http::StatusCode;
    use investatrack_core::Notice;
    use investatrack_core::testing::FakeApi;

    #[tokio::test]
    async fn test_health_reports_backend() {
        let (state, _) = state_with(FakeApi::new());
        let response = send(create_router(state), get("/api/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("\"status\":\"ok\""));
        assert!(body.contains("http://localhost:8080"));
    }

    #[test]
    fn test_page_response_full_vs_partial() {
        let mut headers = axum::http::HeaderMap::new();
        let full = page_response(&headers, "My Portfolios", "/", "<p>x</p>");
        assert!(full.starts_with("<!DOCTYPE html>"));
        assert!(full.contains("Load Test Data"));
        assert!(full.contains("id='notice'"));

        headers.insert("hx-request", "true".parse().unwrap());
        let partial = page_response(&headers, "My Portfolios", "/", "<p>x</p>");
        assert!(!partial.contains("<!DOCTYPE html>"));
        assert!(partial.contains("<p>x</p>"));
    }

    #[test]
    fn test_nav_marks_active_link() {
        let nav = nav_bar("/transactions");
        assert!(nav.contains("href='/transactions' class='px-3 py-2 rounded-lg uppercase text-sm bg-indigo-700'"));
        assert!(nav.contains("href='/' class='px-3 py-2 rounded-lg uppercase text-sm hover:bg-indigo-500'"));
    }

    #[test]
    fn test_notice_is_escaped() {
        let html = render_notice(&Notice::Error("<b>bad</b>".to_string()));
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(html.contains("text-red-700"));
    }
}
