pub mod edit_modal;
pub mod toast;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::{
    client::message_for_error,
    error::{AppError, Result},
    scroll_lock::ScrollLock,
    store::{Session, TransactionStore, TransactionsState},
    ui::{
        self,
        keymap::{AppAction, map_key, map_modal_key},
    },
};

pub use edit_modal::{EditField, EditPhase, EditTransactionModal, ModalCommand};
pub use toast::{ToastLevel, ToastState};

/// Flags shared between the shell and its overlays.
#[derive(Debug, Default)]
pub struct UiState {
    is_modal_edit_transaction_open: bool,
}

impl UiState {
    pub fn is_modal_edit_transaction_open(&self) -> bool {
        self.is_modal_edit_transaction_open
    }

    pub fn set_is_modal_edit_transaction_open(&mut self, open: bool) {
        self.is_modal_edit_transaction_open = open;
    }
}

#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    pub transactions: TransactionsState,
    pub edit_modal: Option<EditTransactionModal>,
    pub ui: UiState,
    pub scroll_lock: ScrollLock,
    pub toast: Option<ToastState>,
    pub toast_ttl: Duration,
}

impl AppState {
    pub fn new(session: Session, toast_ttl: Duration) -> Self {
        Self {
            session,
            transactions: TransactionsState::default(),
            edit_modal: None,
            ui: UiState::default(),
            scroll_lock: ScrollLock::new(),
            toast: None,
            toast_ttl,
        }
    }

    pub fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState::new(level, message, self.toast_ttl));
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
        }
    }
}

pub struct App<S> {
    store: S,
    pub state: AppState,
    viewport: Rect,
    should_quit: bool,
}

impl<S: TransactionStore> App<S> {
    pub fn new(store: S, session: Session, toast_ttl: Duration) -> Self {
        Self {
            store,
            state: AppState::new(session, toast_ttl),
            viewport: Rect::default(),
            should_quit: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Area of the last drawn frame, used to hit-test backdrop clicks.
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.refresh_transactions().await;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            let completed = terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;
            self.viewport = completed.area;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
            self.state.expire_toast(Instant::now());
        }

        Ok(())
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.edit_modal.is_some() {
            return self.handle_modal_key(key).await;
        }

        match map_key(key) {
            AppAction::Quit => {
                self.should_quit = true;
            }
            AppAction::Up => self.scroll(|list| list.select_prev()),
            AppAction::Down => self.scroll(|list| list.select_next()),
            AppAction::Submit => self.open_selected(),
            AppAction::Input(ch) => match ch {
                'k' | 'K' => self.scroll(|list| list.select_prev()),
                'j' | 'J' => self.scroll(|list| list.select_next()),
                'e' | 'E' => self.open_selected(),
                'r' | 'R' => self.refresh_transactions().await,
                _ => {}
            },
            AppAction::None => {}
        }

        Ok(())
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if !self.state.ui.is_modal_edit_transaction_open() {
            return;
        }
        let modal = ui::screens::edit_transaction::modal_area(self.viewport);
        if !modal.contains(Position::new(mouse.column, mouse.row)) {
            tracing::debug!("backdrop click, closing edit modal");
            self.close_edit_modal();
        }
    }

    fn scroll(&mut self, step: impl FnOnce(&mut TransactionsState)) {
        if self.state.scroll_lock.is_locked() {
            return;
        }
        step(&mut self.state.transactions);
    }

    fn open_selected(&mut self) {
        let Some(id) = self
            .state
            .transactions
            .selected_item()
            .map(|tx| tx.id.clone())
        else {
            return;
        };
        self.open_edit_modal(&id);
    }

    /// Opens the edit modal for `transaction_id`, taking the scroll lock.
    pub fn open_edit_modal(&mut self, transaction_id: &str) {
        let guard = self.state.scroll_lock.acquire();
        match EditTransactionModal::open(&self.state.transactions, transaction_id, guard) {
            Ok(modal) => {
                tracing::debug!(transaction_id, "edit modal opened");
                self.state.edit_modal = Some(modal);
                self.state.ui.set_is_modal_edit_transaction_open(true);
            }
            Err(err) => {
                tracing::warn!(transaction_id, "cannot open edit modal: {err}");
                self.state.notify(ToastLevel::Error, err.to_string());
            }
        }
    }

    async fn handle_modal_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(modal) = self.state.edit_modal.as_mut() else {
            return Ok(());
        };
        match modal.apply(map_modal_key(key)) {
            ModalCommand::None => {}
            ModalCommand::Submit => self.handle_submit().await,
            ModalCommand::Cancel => self.handle_modal_close(),
            ModalCommand::Escape => self.close_edit_modal(),
            ModalCommand::Quit => self.should_quit = true,
        }
        Ok(())
    }

    /// Validates the form, awaits the update and refetches on success.
    ///
    /// The modal only closes once the backend confirmed the update.
    pub async fn handle_submit(&mut self) {
        let Some(modal) = self.state.edit_modal.as_mut() else {
            return;
        };
        let payload = match modal.prepare_submit() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!("edit rejected: {err}");
                self.state.notify(ToastLevel::Info, err.to_string());
                return;
            }
        };

        modal.begin_submit();
        tracing::info!(
            transaction_id = %payload.transaction_id,
            amount = payload.amount,
            "updating transaction"
        );

        let result = self.store.update_transaction(&payload).await;
        match result {
            Ok(_) => {
                if let Some(modal) = self.state.edit_modal.as_mut() {
                    modal.release_scroll_lock();
                    modal.reset_fields();
                }
                self.state
                    .notify(ToastLevel::Success, "Transaction updated successfully.");
                self.refresh_transactions().await;
                self.close_edit_modal();
            }
            Err(err) => {
                tracing::warn!(transaction_id = %payload.transaction_id, "update failed: {err:?}");
                if let Some(modal) = self.state.edit_modal.as_mut() {
                    modal.submit_failed();
                }
                self.state.notify(ToastLevel::Error, message_for_error(&err));
            }
        }
    }

    /// Cancel control: clears the inputs, then closes without saving.
    pub fn handle_modal_close(&mut self) {
        if let Some(modal) = self.state.edit_modal.as_mut() {
            modal.reset_fields();
        }
        self.close_edit_modal();
    }

    /// Drops the modal, which releases its scroll lock guard.
    fn close_edit_modal(&mut self) {
        self.state.edit_modal = None;
        self.state.ui.set_is_modal_edit_transaction_open(false);
    }

    pub async fn refresh_transactions(&mut self) {
        let user_id = self.state.session.user.id.clone();
        match self.store.fetch_transactions(&user_id).await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "transactions loaded");
                self.state.transactions.replace(items);
            }
            Err(err) => {
                tracing::warn!("failed to load transactions: {err:?}");
                self.state.transactions.error = Some(message_for_error(&err));
            }
        }
    }
}
