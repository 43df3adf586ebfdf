use api_types::transaction::{Transaction, TransactionKind, TransactionUpdate};
use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    amount::{self, Amount, AmountError},
    categories::CategoryPicker,
    dates::{self, DateError},
    scroll_lock::ScrollLockGuard,
    store::TransactionsState,
    ui::keymap::ModalAction,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenError {
    #[error("Transaction {0} is no longer available.")]
    NotFound(String),
    #[error("Cannot edit transaction: {0}")]
    InvalidDate(#[from] DateError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please provide a valid amount.")]
    MissingAmount,
    #[error("Please provide a valid amount ({0}).")]
    InvalidAmount(AmountError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Category,
    Amount,
    Date,
    Comment,
    Save,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Editing,
    Submitting,
}

/// What the shell has to do after the modal consumed a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalCommand {
    None,
    Submit,
    Cancel,
    Escape,
    Quit,
}

/// Draft of a single transaction being edited.
///
/// Category and date are draft state seeded from the record; amount and
/// comment are raw inputs that start empty and show the record's values as
/// placeholders.
#[derive(Debug)]
pub struct EditTransactionModal {
    transaction: Transaction,
    category: Option<String>,
    picker: CategoryPicker,
    date: NaiveDate,
    date_changed: bool,
    amount_input: String,
    comment_input: String,
    focus: EditField,
    phase: EditPhase,
    scroll_guard: Option<ScrollLockGuard>,
}

impl EditTransactionModal {
    /// Resolves `transaction_id` in the loaded collection and seeds the draft.
    ///
    /// On error the guard is dropped, so the scroll lock is released.
    pub fn open(
        transactions: &TransactionsState,
        transaction_id: &str,
        scroll_guard: ScrollLockGuard,
    ) -> Result<Self, OpenError> {
        let transaction = transactions
            .find(transaction_id)
            .cloned()
            .ok_or_else(|| OpenError::NotFound(transaction_id.to_string()))?;
        let date = dates::parse_transaction_date(&transaction.date)?;
        let picker = CategoryPicker::new(transaction.category.as_deref());
        let focus = if transaction.kind == TransactionKind::Expense {
            EditField::Category
        } else {
            EditField::Amount
        };

        Ok(Self {
            category: transaction.category.clone(),
            transaction,
            picker,
            date,
            date_changed: false,
            amount_input: String::new(),
            comment_input: String::new(),
            focus,
            phase: EditPhase::Editing,
            scroll_guard: Some(scroll_guard),
        })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn kind(&self) -> TransactionKind {
        self.transaction.kind
    }

    /// Only expenses carry a category control.
    pub fn shows_category(&self) -> bool {
        self.kind() == TransactionKind::Expense
    }

    pub fn draft_category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn draft_date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn comment_input(&self) -> &str {
        &self.comment_input
    }

    pub fn amount_placeholder(&self) -> String {
        amount::placeholder(self.transaction.amount)
    }

    pub fn comment_placeholder(&self) -> &str {
        &self.transaction.comment
    }

    pub fn focus(&self) -> EditField {
        self.focus
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn holds_scroll_lock(&self) -> bool {
        self.scroll_guard.is_some()
    }

    pub fn handle_updated_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into());
    }

    pub fn handle_updated_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.date_changed = true;
    }

    /// Date sent in the update. An untouched date goes back as stored.
    fn payload_date(&self) -> String {
        if self.date_changed {
            dates::format_payload_date(self.date)
        } else {
            self.transaction.date.clone()
        }
    }

    /// Feeds one key into the form.
    pub fn apply(&mut self, action: ModalAction) -> ModalCommand {
        if self.phase == EditPhase::Submitting {
            return ModalCommand::None;
        }

        match action {
            ModalAction::Quit => ModalCommand::Quit,
            ModalAction::Close => ModalCommand::Escape,
            ModalAction::Save => ModalCommand::Submit,
            ModalAction::Confirm => match self.focus {
                EditField::Cancel => ModalCommand::Cancel,
                _ => ModalCommand::Submit,
            },
            ModalAction::NextField => {
                self.focus = self.next_field();
                ModalCommand::None
            }
            ModalAction::PrevField => {
                self.focus = self.prev_field();
                ModalCommand::None
            }
            ModalAction::Up => {
                self.step(-1);
                ModalCommand::None
            }
            ModalAction::Down => {
                self.step(1);
                ModalCommand::None
            }
            ModalAction::Left => {
                self.step_horizontal(-1);
                ModalCommand::None
            }
            ModalAction::Right => {
                self.step_horizontal(1);
                ModalCommand::None
            }
            ModalAction::Backspace => {
                match self.focus {
                    EditField::Amount => {
                        self.amount_input.pop();
                    }
                    EditField::Comment => {
                        self.comment_input.pop();
                    }
                    _ => {}
                }
                ModalCommand::None
            }
            ModalAction::Input(ch) => {
                self.input_char(ch);
                ModalCommand::None
            }
            ModalAction::None => ModalCommand::None,
        }
    }

    fn input_char(&mut self, ch: char) {
        match self.focus {
            EditField::Amount => {
                if amount::accepts_amount_char(ch) {
                    self.amount_input.push(ch);
                }
            }
            EditField::Comment => self.comment_input.push(ch),
            _ => {}
        }
    }

    fn step(&mut self, delta: i32) {
        match self.focus {
            EditField::Category if self.shows_category() => {
                let category = if delta < 0 {
                    self.picker.prev()
                } else {
                    self.picker.next()
                };
                self.handle_updated_category(category);
            }
            EditField::Date => {
                let date = dates::shift_months(self.date, -delta);
                self.handle_updated_date(date);
            }
            _ => {
                self.focus = if delta < 0 {
                    self.prev_field()
                } else {
                    self.next_field()
                };
            }
        }
    }

    fn step_horizontal(&mut self, delta: i64) {
        match self.focus {
            EditField::Date => {
                let date = dates::shift_days(self.date, delta);
                self.handle_updated_date(date);
            }
            EditField::Save if delta > 0 => self.focus = EditField::Cancel,
            EditField::Cancel if delta < 0 => self.focus = EditField::Save,
            _ => {}
        }
    }

    fn fields(&self) -> &'static [EditField] {
        if self.shows_category() {
            &[
                EditField::Category,
                EditField::Amount,
                EditField::Date,
                EditField::Comment,
                EditField::Save,
                EditField::Cancel,
            ]
        } else {
            &[
                EditField::Amount,
                EditField::Date,
                EditField::Comment,
                EditField::Save,
                EditField::Cancel,
            ]
        }
    }

    fn next_field(&self) -> EditField {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        fields[(idx + 1) % fields.len()]
    }

    fn prev_field(&self) -> EditField {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        fields[(idx + fields.len() - 1) % fields.len()]
    }

    /// Validates the raw inputs and builds the update payload.
    pub fn prepare_submit(&self) -> Result<TransactionUpdate, SubmitError> {
        if self.amount_input.trim().is_empty() {
            return Err(SubmitError::MissingAmount);
        }
        let amount = Amount::parse(&self.amount_input).map_err(SubmitError::InvalidAmount)?;

        Ok(TransactionUpdate {
            transaction_id: self.transaction.id.clone(),
            kind: self.transaction.kind,
            category: self.category.clone(),
            amount: amount.as_f64(),
            date: self.payload_date(),
            comment: self.comment_input.clone(),
            owner: self.transaction.owner.clone(),
        })
    }

    pub fn begin_submit(&mut self) {
        self.phase = EditPhase::Submitting;
    }

    /// Back to editing after a rejected update; inputs are kept.
    pub fn submit_failed(&mut self) {
        self.phase = EditPhase::Editing;
    }

    pub fn release_scroll_lock(&mut self) {
        self.scroll_guard = None;
    }

    /// Clears the raw amount and comment inputs.
    pub fn reset_fields(&mut self) {
        self.amount_input.clear();
        self.comment_input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_lock::ScrollLock;

    fn expense() -> Transaction {
        Transaction {
            id: "tx-1".to_string(),
            kind: TransactionKind::Expense,
            category: Some("Car".to_string()),
            amount: 40.0,
            date: "2024-01-03".to_string(),
            comment: "fuel".to_string(),
            owner: "u1".to_string(),
        }
    }

    fn income() -> Transaction {
        Transaction {
            id: "tx-2".to_string(),
            kind: TransactionKind::Income,
            category: None,
            amount: 1500.0,
            date: "03.01.2024".to_string(),
            comment: "salary".to_string(),
            owner: "u1".to_string(),
        }
    }

    fn state() -> TransactionsState {
        let mut state = TransactionsState::default();
        state.replace(vec![expense(), income()]);
        state
    }

    fn open(id: &str) -> (EditTransactionModal, ScrollLock) {
        let lock = ScrollLock::new();
        let modal = EditTransactionModal::open(&state(), id, lock.acquire()).unwrap();
        (modal, lock)
    }

    fn type_text(modal: &mut EditTransactionModal, text: &str) {
        for ch in text.chars() {
            modal.apply(ModalAction::Input(ch));
        }
    }

    #[test]
    fn open_seeds_draft_from_record() {
        let (modal, lock) = open("tx-1");
        assert_eq!(modal.draft_category(), Some("Car"));
        assert_eq!(
            modal.draft_date(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
        assert_eq!(modal.amount_input(), "");
        assert_eq!(modal.amount_placeholder(), "40");
        assert_eq!(modal.comment_placeholder(), "fuel");
        assert!(lock.is_locked());
    }

    #[test]
    fn unknown_id_releases_lock() {
        let lock = ScrollLock::new();
        let err = EditTransactionModal::open(&state(), "missing", lock.acquire()).unwrap_err();
        assert_eq!(err, OpenError::NotFound("missing".to_string()));
        assert!(!lock.is_locked());
    }

    #[test]
    fn unreadable_date_is_an_open_error() {
        let mut tx = expense();
        tx.date = "soon".to_string();
        let mut transactions = TransactionsState::default();
        transactions.replace(vec![tx]);
        let lock = ScrollLock::new();
        let err = EditTransactionModal::open(&transactions, "tx-1", lock.acquire()).unwrap_err();
        assert!(matches!(err, OpenError::InvalidDate(_)));
        assert!(!lock.is_locked());
    }

    #[test]
    fn income_has_no_category_field() {
        let (mut modal, _lock) = open("tx-2");
        assert!(!modal.shows_category());
        assert_eq!(modal.focus(), EditField::Amount);
        for _ in 0..5 {
            modal.apply(ModalAction::NextField);
            assert_ne!(modal.focus(), EditField::Category);
        }
    }

    #[test]
    fn amount_field_filters_characters() {
        let (mut modal, _lock) = open("tx-2");
        type_text(&mut modal, "1a2 ,5x0");
        assert_eq!(modal.amount_input(), "12,50");
        modal.apply(ModalAction::Backspace);
        assert_eq!(modal.amount_input(), "12,5");
    }

    #[test]
    fn category_picker_updates_draft() {
        let (mut modal, _lock) = open("tx-1");
        assert_eq!(modal.focus(), EditField::Category);
        modal.apply(ModalAction::Down);
        assert_eq!(modal.draft_category(), Some("Self care"));
        modal.apply(ModalAction::Up);
        modal.apply(ModalAction::Up);
        assert_eq!(modal.draft_category(), Some("Products"));
    }

    #[test]
    fn date_picker_steps_days_and_months() {
        let (mut modal, _lock) = open("tx-2");
        modal.apply(ModalAction::NextField);
        assert_eq!(modal.focus(), EditField::Date);
        modal.apply(ModalAction::Right);
        assert_eq!(modal.draft_date(), NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        modal.apply(ModalAction::Up);
        assert_eq!(modal.draft_date(), NaiveDate::from_ymd_opt(2024, 2, 4).unwrap());
    }

    #[test]
    fn empty_amount_is_missing() {
        let (modal, _lock) = open("tx-1");
        assert_eq!(modal.prepare_submit(), Err(SubmitError::MissingAmount));
        assert_eq!(
            SubmitError::MissingAmount.to_string(),
            "Please provide a valid amount."
        );
    }

    #[test]
    fn malformed_amount_is_rejected() {
        let (mut modal, _lock) = open("tx-1");
        modal.apply(ModalAction::NextField);
        assert_eq!(modal.focus(), EditField::Amount);
        type_text(&mut modal, "1.2.3");
        assert_eq!(
            modal.prepare_submit(),
            Err(SubmitError::InvalidAmount(AmountError::Invalid))
        );
    }

    #[test]
    fn payload_carries_draft_and_original_fields() {
        let (mut modal, _lock) = open("tx-1");
        modal.handle_updated_category("Products");
        modal.handle_updated_date(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        modal.apply(ModalAction::NextField);
        type_text(&mut modal, "1234,56");

        let payload = modal.prepare_submit().unwrap();
        assert_eq!(payload.transaction_id, "tx-1");
        assert_eq!(payload.kind, TransactionKind::Expense);
        assert_eq!(payload.category.as_deref(), Some("Products"));
        assert_eq!(payload.amount, 1234.56);
        assert_eq!(payload.date, "10.02.2024");
        assert_eq!(payload.comment, "");
        assert_eq!(payload.owner, "u1");
    }

    #[test]
    fn untouched_date_is_sent_as_stored() {
        let mut tx = expense();
        tx.date = "2024-01-02T23:00:00.000Z".to_string();
        let mut transactions = TransactionsState::default();
        transactions.replace(vec![tx]);
        let lock = ScrollLock::new();
        let mut modal =
            EditTransactionModal::open(&transactions, "tx-1", lock.acquire()).unwrap();
        modal.apply(ModalAction::NextField);
        type_text(&mut modal, "5");

        let payload = modal.prepare_submit().unwrap();
        assert_eq!(payload.date, "2024-01-02T23:00:00.000Z");
        assert_eq!(payload.amount, 5.0);
    }

    #[test]
    fn stepped_date_is_sent_day_first() {
        let (mut modal, _lock) = open("tx-1");
        modal.apply(ModalAction::NextField);
        type_text(&mut modal, "5");
        modal.apply(ModalAction::NextField);
        modal.apply(ModalAction::Right);
        modal.apply(ModalAction::Left);

        assert_eq!(modal.prepare_submit().unwrap().date, "03.01.2024");
    }

    #[test]
    fn confirm_on_cancel_button_cancels() {
        let (mut modal, _lock) = open("tx-2");
        modal.apply(ModalAction::PrevField);
        assert_eq!(modal.focus(), EditField::Cancel);
        assert_eq!(modal.apply(ModalAction::Confirm), ModalCommand::Cancel);
        modal.apply(ModalAction::Left);
        assert_eq!(modal.focus(), EditField::Save);
        assert_eq!(modal.apply(ModalAction::Confirm), ModalCommand::Submit);
    }

    #[test]
    fn keys_are_ignored_while_submitting() {
        let (mut modal, _lock) = open("tx-2");
        modal.begin_submit();
        assert_eq!(modal.apply(ModalAction::Close), ModalCommand::None);
        modal.apply(ModalAction::Input('5'));
        assert_eq!(modal.amount_input(), "");
        modal.submit_failed();
        assert_eq!(modal.apply(ModalAction::Close), ModalCommand::Escape);
    }

    #[test]
    fn release_and_reset() {
        let (mut modal, lock) = open("tx-2");
        type_text(&mut modal, "10");
        modal.reset_fields();
        assert_eq!(modal.amount_input(), "");
        modal.release_scroll_lock();
        assert!(!modal.holds_scroll_lock());
        assert!(!lock.is_locked());
    }
}
