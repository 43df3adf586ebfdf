use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    /// The authenticated user as seen by the client.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub id: String,
        #[serde(default)]
        pub name: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// A transaction record as returned by the backend.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        #[serde(rename = "_id")]
        pub id: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        #[serde(default)]
        pub category: Option<String>,
        pub amount: f64,
        /// Either an RFC3339 timestamp, `YYYY-MM-DD` or `DD.MM.YYYY`.
        pub date: String,
        #[serde(default)]
        pub comment: String,
        pub owner: String,
    }

    /// Body of an update request.
    ///
    /// `transaction_id` travels in the URL path and is skipped in the JSON
    /// body.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionUpdate {
        #[serde(skip)]
        pub transaction_id: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        pub amount: f64,
        /// `DD.MM.YYYY`, or the stored value when the date was not edited.
        pub date: String,
        pub comment: String,
        pub owner: String,
    }
}
