//! Add Transaction routes - one form session per page activation
//!
//! Structure:
//! - api.rs: HTMX form operations on an open session
//! - page.rs: Session opening and form rendering

pub mod api;
pub mod page;

pub use api::{htmx_form_reload, htmx_form_reset, htmx_form_submit, htmx_select_stock};
pub use page::{page_add_transaction, render_form};
