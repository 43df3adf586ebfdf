pub mod edit_transaction;
pub mod transactions;
