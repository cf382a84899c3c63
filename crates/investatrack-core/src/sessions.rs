//! Open Add Transaction forms, kept between HTMX requests
//!
//! Bounded: opening a form beyond capacity drops the oldest one. Anything
//! still holding a dropped form's handle can finish with it, but the result
//! is no longer reachable by id.

use crate::form::TransactionForm;
use investatrack_utils::generate_id;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub type FormHandle = Arc<Mutex<TransactionForm>>;

#[derive(Default)]
struct SessionTable {
    order: VecDeque<String>,
    forms: HashMap<String, FormHandle>,
}

impl SessionTable {
    fn insert(&mut self, id: String, handle: FormHandle, capacity: usize) {
        if self.forms.insert(id.clone(), handle).is_none() {
            self.order.push_back(id);
        }
        while self.forms.len() > capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    log::debug!("Evicting transaction form {}", oldest);
                    self.forms.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

pub struct FormSessions {
    capacity: usize,
    table: RwLock<SessionTable>,
}

impl FormSessions {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            table: RwLock::new(SessionTable::default()),
        }
    }

    /// Register a new form under a fresh id
    pub async fn open(&self, form: TransactionForm) -> (String, FormHandle) {
        let id = generate_id();
        let handle = Arc::new(Mutex::new(form));
        self.table.write().await.insert(id.clone(), handle.clone(), self.capacity);
        log::debug!("Opened transaction form {}", id);
        (id, handle)
    }

    pub async fn get(&self, id: &str) -> Option<FormHandle> {
        self.table.read().await.forms.get(id).cloned()
    }

    /// Swap a fresh form in under an existing id.
    ///
    /// Unknown ids stay unknown: nothing is inserted and `None` comes back.
    pub async fn reset(&self, id: &str, form: TransactionForm) -> Option<FormHandle> {
        let mut table = self.table.write().await;
        let slot = table.forms.get_mut(id)?;
        let handle = Arc::new(Mutex::new(form));
        *slot = handle.clone();
        Some(handle)
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.forms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use investatrack_client::TransactionType;

    #[tokio::test]
    async fn test_open_and_get() {
        let sessions = FormSessions::new(4);
        let (id, handle) = sessions.open(TransactionForm::new()).await;
        handle.lock().await.set_quantity("3");
        let again = sessions.get(&id).await.unwrap();
        assert_eq!(again.lock().await.draft().quantity, "3");
        assert!(sessions.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_oldest_evicted_at_capacity() {
        let sessions = FormSessions::new(2);
        let (first, _) = sessions.open(TransactionForm::new()).await;
        let (second, _) = sessions.open(TransactionForm::new()).await;
        let (third, _) = sessions.open(TransactionForm::new()).await;
        assert_eq!(sessions.len().await, 2);
        assert!(sessions.get(&first).await.is_none());
        assert!(sessions.get(&second).await.is_some());
        assert!(sessions.get(&third).await.is_some());
    }

    #[tokio::test]
    async fn test_evicted_handle_stays_usable() {
        let sessions = FormSessions::new(1);
        let (_, detached) = sessions.open(TransactionForm::new()).await;
        sessions.open(TransactionForm::new()).await;
        detached.lock().await.set_transaction_type(TransactionType::Sell);
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_reset_keeps_id() {
        let sessions = FormSessions::new(2);
        let (id, old) = sessions.open(TransactionForm::new()).await;
        old.lock().await.set_quantity("7");
        assert!(sessions.reset(&id, TransactionForm::new()).await.is_some());
        let current = sessions.get(&id).await.unwrap();
        assert!(current.lock().await.draft().quantity.is_empty());
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_reset_never_inserts() {
        let sessions = FormSessions::new(1);
        let (live, _) = sessions.open(TransactionForm::new()).await;
        assert!(sessions.reset("unknown", TransactionForm::new()).await.is_none());
        assert!(sessions.get("unknown").await.is_none());
        assert!(sessions.get(&live).await.is_some());
        assert_eq!(sessions.len().await, 1);
    }
}
