use api_types::transaction::{Transaction, TransactionUpdate};
use reqwest::{RequestBuilder, Response, Url};

use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    store::TransactionStore,
};

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict(String),
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(alias = "message")]
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| AppError::InvalidBaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            token,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn transactions_list(
        &self,
        user_id: &str,
    ) -> std::result::Result<Vec<Transaction>, ClientError> {
        let endpoint = self.endpoint("transactions")?;

        let res = self
            .authorize(self.http.get(endpoint).query(&[("owner", user_id)]))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<Vec<Transaction>>()
                .await
                .map_err(ClientError::Transport);
        }
        Err(error_from_response(res).await)
    }

    pub async fn transaction_update(
        &self,
        payload: &TransactionUpdate,
    ) -> std::result::Result<Transaction, ClientError> {
        let endpoint = self.endpoint(&format!("transactions/{}", payload.transaction_id))?;

        let res = self
            .authorize(self.http.patch(endpoint).json(payload))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Transaction>().await.map_err(ClientError::Transport);
        }
        Err(error_from_response(res).await)
    }
}

impl TransactionStore for Client {
    async fn fetch_transactions(
        &self,
        user_id: &str,
    ) -> std::result::Result<Vec<Transaction>, ClientError> {
        self.transactions_list(user_id).await
    }

    async fn update_transaction(
        &self,
        payload: &TransactionUpdate,
    ) -> std::result::Result<Transaction, ClientError> {
        self.transaction_update(payload).await
    }
}

async fn error_from_response(res: Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(body),
        400 | 422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}

/// User-facing text for a failed request.
pub fn message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized | ClientError::Forbidden => {
            "Session expired or access denied.".to_string()
        }
        ClientError::NotFound => "Transaction not found.".to_string(),
        ClientError::Conflict(message) => format!("Conflict: {message}"),
        ClientError::Validation(message) => format!("Validation error: {message}"),
        ClientError::Server(message) => format!("Server error: {message}"),
        ClientError::Transport(err) => format!("Server unreachable: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use api_types::transaction::TransactionKind;
    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        routing::{get, patch},
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api/")
    }

    fn sample_update() -> TransactionUpdate {
        TransactionUpdate {
            transaction_id: "tx-1".to_string(),
            kind: TransactionKind::Expense,
            category: Some("Car".to_string()),
            amount: 12.5,
            date: "03.01.2024".to_string(),
            comment: "fuel".to_string(),
            owner: "u1".to_string(),
        }
    }

    #[tokio::test]
    async fn list_sends_owner_and_bearer_token() {
        let router = Router::new().route(
            "/api/transactions",
            get(
                |headers: HeaderMap, Query(query): Query<HashMap<String, String>>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!([{
                        "_id": "tx-1",
                        "type": "expense",
                        "category": "Car",
                        "amount": 10,
                        "date": "2024-01-03",
                        "comment": auth,
                        "owner": query.get("owner").cloned().unwrap_or_default(),
                    }]))
                },
            ),
        );
        let base = spawn(router).await;

        let client = Client::new(&base, Some("secret".to_string())).unwrap();
        let items = client.fetch_transactions("u1").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].owner, "u1");
        assert_eq!(items[0].comment, "Bearer secret");
    }

    #[tokio::test]
    async fn update_patches_by_id() {
        let router = Router::new().route(
            "/api/transactions/{id}",
            patch(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                Json(json!({
                    "_id": id,
                    "type": body["type"],
                    "category": body["category"],
                    "amount": body["amount"],
                    "date": body["date"],
                    "comment": body["comment"],
                    "owner": body["owner"],
                }))
            }),
        );
        let base = spawn(router).await;

        let client = Client::new(&base, None).unwrap();
        let updated = client.update_transaction(&sample_update()).await.unwrap();
        assert_eq!(updated.id, "tx-1");
        assert_eq!(updated.amount, 12.5);
        assert_eq!(updated.date, "03.01.2024");
    }

    #[tokio::test]
    async fn error_statuses_are_mapped() {
        let router = Router::new().route(
            "/api/transactions/{id}",
            patch(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": "amount must be positive" })),
                )
            }),
        );
        let base = spawn(router).await;

        let client = Client::new(&base, None).unwrap();
        let err = client.update_transaction(&sample_update()).await.unwrap_err();
        match err {
            ClientError::Validation(message) => assert_eq!(message, "amount must be positive"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_base_url_is_a_config_error() {
        let err = Client::new("not a url", None).unwrap_err();
        assert!(matches!(err, AppError::InvalidBaseUrl(_)));
        assert!(err.to_string().starts_with("invalid base_url"));
    }

    #[tokio::test]
    async fn missing_route_is_not_found() {
        let base = spawn(Router::new()).await;
        let client = Client::new(&base, None).unwrap();
        let err = client.fetch_transactions("u1").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
        assert_eq!(message_for_error(&err), "Transaction not found.");
    }
}
