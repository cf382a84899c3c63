//! Error types for investatrack-web

use axum::response::{Html, IntoResponse, Response};
use investatrack_core::Notice;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Form session not found: {id}")]
    SessionExpired { id: String },

    #[error("Failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error("Server error: {0}")]
    Serve(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            // htmx only swaps 2xx responses, so the notice goes out as a normal page fragment
            WebError::SessionExpired { id } => {
                log::debug!("Request for unknown form session {}", id);
                let notice = Notice::Error(
                    "This form is no longer active. Reopen Add Transaction to continue.".to_string(),
                );
                Html(format!(
                    "<div id='add-transaction'>{}<a href='/add-transaction' class='text-indigo-600 underline'>Reopen Add Transaction</a></div>",
                    crate::render_notice(&notice)
                ))
                .into_response()
            }
            other => {
                log::error!("{}", other);
                (axum::http::StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response()
            }
        }
    }
}
