//! Dashboard routes - Portfolio cards
//!
//! Structure:
//! - api.rs: HTMX card list partial
//! - page.rs: Full page shell

pub mod api;
pub mod page;

pub use api::htmx_dashboard_list;
pub use page::page_dashboard;
