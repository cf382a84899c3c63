//! Sample data actions offered in the navigation bar
//!
//! A successful load or clear changes what every page shows, so it yields a
//! [`DataEvent`] for the presentation layer to broadcast to the views that are
//! open, in place of reloading the whole page.

use crate::notice::Notice;
use investatrack_client::InvestaApi;

/// Backend data changed underneath the open views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEvent {
    SampleDataLoaded,
    DataCleared,
}

impl DataEvent {
    /// Client-side event name every view listens for
    pub const TRIGGER: &'static str = "data-invalidated";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataActionOutcome {
    pub notice: Notice,
    pub event: Option<DataEvent>,
}

pub async fn load_test_data(api: &dyn InvestaApi) -> DataActionOutcome {
    match api.load_test_data().await {
        Ok(status) => {
            log::info!("Sample data loaded: {}", status.trim());
            DataActionOutcome {
                notice: Notice::Success("Test data loaded!".to_string()),
                event: Some(DataEvent::SampleDataLoaded),
            }
        }
        Err(e) => {
            log::error!("Error loading sample data: {}", e);
            DataActionOutcome {
                notice: Notice::Error("Error loading data".to_string()),
                event: None,
            }
        }
    }
}

pub async fn clear_test_data(api: &dyn InvestaApi) -> DataActionOutcome {
    match api.clear_test_data().await {
        Ok(status) => {
            log::info!("Backend data cleared: {}", status.trim());
            DataActionOutcome {
                notice: Notice::Success("Data cleared!".to_string()),
                event: Some(DataEvent::DataCleared),
            }
        }
        Err(e) => {
            log::error!("Error clearing data: {}", e);
            DataActionOutcome {
                notice: Notice::Error("Error clearing data".to_string()),
                event: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use investatrack_client::Endpoint;

    #[tokio::test]
    async fn test_load_success_invalidates() {
        let api = FakeApi::new();
        let outcome = load_test_data(&api).await;
        assert_eq!(outcome.notice, Notice::Success("Test data loaded!".to_string()));
        assert_eq!(outcome.event, Some(DataEvent::SampleDataLoaded));
        assert_eq!(api.calls(Endpoint::LoadTestData), 1);
    }

    #[tokio::test]
    async fn test_clear_failure_does_not_invalidate() {
        let api = FakeApi::new().failing_test_data();
        let outcome = clear_test_data(&api).await;
        assert_eq!(outcome.notice, Notice::Error("Error clearing data".to_string()));
        assert_eq!(outcome.event, None);
        assert_eq!(api.calls(Endpoint::ClearTestData), 1);
    }
}
