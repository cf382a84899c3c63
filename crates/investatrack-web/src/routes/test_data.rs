//! Sample data routes behind the navigation bar buttons
//!
//! The response is a notice for the `#notice` area. On success it also
//! carries an `HX-Trigger` header so every open view refreshes itself.

use crate::{render_notice, AppState};
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse, Response};
use investatrack_core::{clear_test_data, load_test_data, DataActionOutcome, DataEvent};

fn outcome_response(outcome: DataActionOutcome) -> Response {
    let mut response = Html(render_notice(&outcome.notice)).into_response();
    if outcome.event.is_some() {
        response
            .headers_mut()
            .insert("HX-Trigger", HeaderValue::from_static(DataEvent::TRIGGER));
    }
    response
}

/// HTMX: Load the backend's sample data
pub async fn htmx_load_test_data(state: axum::extract::State<AppState>) -> Response {
    outcome_response(load_test_data(state.api.as_ref()).await)
}

/// HTMX: Delete all backend data
pub async fn htmx_clear_test_data(state: axum::extract::State<AppState>) -> Response {
    outcome_response(clear_test_data(state.api.as_ref()).await)
}
