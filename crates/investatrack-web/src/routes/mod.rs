//! Route modules for the web server
//!
//! Each page module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: HTMX partial endpoints
//! - page.rs: Full page rendering

pub mod add_transaction;
pub mod dashboard;
pub mod test_data;
pub mod transactions;

use investatrack_core::ViewState;

/// Decode an `application/x-www-form-urlencoded` body into ordered pairs
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Render a list view state; `ready` is only called with a non-empty slice
pub fn render_list_state<T>(
    state: &ViewState<Vec<T>>,
    empty_message: &str,
    ready: impl FnOnce(&[T]) -> String,
) -> String {
    match state {
        ViewState::Loading => crate::render_loading(),
        ViewState::Error(reason) => {
            crate::render_notice(&investatrack_core::Notice::Error(reason.clone()))
        }
        ViewState::Ready(items) if items.is_empty() => format!(
            "<p class='text-gray-600 py-4'>{}</p>",
            investatrack_utils::escape_html(empty_message)
        ),
        ViewState::Ready(items) => ready(items),
    }
}
