use std::future::Future;

use api_types::{
    transaction::{Transaction, TransactionUpdate},
    user::User,
};

use crate::client::ClientError;

/// Backend operations the UI needs.
///
/// [`crate::client::Client`] talks HTTP; tests plug in an in-memory store.
pub trait TransactionStore {
    fn fetch_transactions(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Transaction>, ClientError>> + Send;

    fn update_transaction(
        &self,
        payload: &TransactionUpdate,
    ) -> impl Future<Output = Result<Transaction, ClientError>> + Send;
}

/// Currently authenticated user.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user: User {
                id: user_id.into(),
                name: None,
            },
        }
    }
}

/// Loaded transaction collection and list selection.
#[derive(Debug, Default)]
pub struct TransactionsState {
    pub items: Vec<Transaction>,
    pub selected: usize,
    pub error: Option<String>,
}

impl TransactionsState {
    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.items.iter().find(|tx| tx.id == id)
    }

    pub fn selected_item(&self) -> Option<&Transaction> {
        self.items.get(self.selected)
    }

    /// Replaces the collection, keeping the selection in range.
    pub fn replace(&mut self, items: Vec<Transaction>) {
        self.items = items;
        self.error = None;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }
}
