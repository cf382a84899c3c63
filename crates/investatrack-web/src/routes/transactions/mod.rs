//! Transaction history routes
//!
//! Structure:
//! - api.rs: HTMX table partial
//! - page.rs: Full page shell

pub mod api;
pub mod page;

pub use api::htmx_transactions_list;
pub use page::page_transactions;
