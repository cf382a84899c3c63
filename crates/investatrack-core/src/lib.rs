//! Page controllers for the InvestaTrack UI
//!
//! Everything here is independent of HTML: controllers talk to the backend
//! through [`investatrack_client::InvestaApi`] and expose plain state that the
//! web layer renders.

pub mod error;
pub mod form;
pub mod format;
pub mod notice;
pub mod sessions;
pub mod test_data;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::ValidationError;
pub use form::{SubmitOutcome, TransactionDraft, TransactionForm};
pub use format::{format_currency, format_currency_with, format_date, gain_loss, SignedAmount, Tone};
pub use notice::Notice;
pub use sessions::{FormHandle, FormSessions};
pub use test_data::{clear_test_data, load_test_data, DataActionOutcome, DataEvent};
pub use view::{
    load_dashboard, load_transaction_history, DashboardController, ListController, TransactionHistoryController,
    ViewState,
};
