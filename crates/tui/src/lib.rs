//! Terminal client for a personal-finance backend, centred on editing
//! transactions from a modal form.

pub mod amount;
pub mod app;
pub mod categories;
pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod logging;
pub mod scroll_lock;
pub mod store;
pub mod ui;
