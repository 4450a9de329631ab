use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::BackendConfig;
use crate::domain::{AssetId, NotificationId, RecordId, TabelRef, TransactionKind};
use crate::models::{
    ApprovalDetail, ApprovalRecord, Asset, AssetUpdate, Beban, Departemen, NewAsset,
    NewNotification, NewTransaction, NewUser, Notification, Transaction, User,
};
use crate::normalize::{self, APPROVAL, ASSET, BEBAN, DEPARTEMEN, NOTIFICATION, TRANSACTION, USER};
use crate::services::backend::{ApprovalApi, AssetApi, NotificationApi, UserApi};
use crate::session::Session;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend returned {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Not logged in")]
    NotAuthenticated,
}

impl BackendError {
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    fn decode(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}

/// HTTP client for the asset-management backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    session: Option<Session>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Joins path segments onto the base URL, encoding each one so asset
    /// codes like `AST/2024/001` stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, BackendError> {
        let session = self.session.as_ref().ok_or(BackendError::NotAuthenticated)?;

        let mut builder = self.client.request(method, url);
        for (name, value) in session.auth_headers() {
            builder = builder.header(name, value);
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, BackendError> {
        let response = builder.send().await?;
        let status = response.status();
        let path = response.url().path().to_string();
        let body = response.text().await?;

        debug!(%status, path = %path, bytes = body.len(), "Backend response");

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            return Err(BackendError::Http { status, message });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| BackendError::decode(&path, e))
    }

    async fn get(&self, segments: &[&str]) -> Result<Value, BackendError> {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::GET, url)?).await
    }

    async fn send_json<T: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &T,
    ) -> Result<Value, BackendError> {
        let url = self.endpoint(segments)?;
        self.send(self.request(method, url)?.json(body)).await
    }
}

/// Pulls a human-readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(object)) => ["message", "error", "msg", "detail"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        Ok(Value::String(s)) => Some(s),
        Ok(_) => None,
        Err(_) if trimmed.len() <= 200 && !trimmed.starts_with('<') => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

/// Accepts `{ "count": n }`, `{ "unread": n }`, a bare number or a numeric
/// string.
fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(object) => ["count", "unread", "unreadCount", "unread_count", "total"]
            .iter()
            .find_map(|key| object.get(*key))
            .and_then(parse_count)
            .or_else(|| object.get("data").and_then(parse_count)),
        _ => None,
    }
}

/// Login responses come either flat or as `{ "user": {...}, "token": "..." }`.
fn decode_login(value: Value) -> Result<User, serde_json::Error> {
    let envelope = USER.normalize(normalize::unwrap_object(value, &[]));
    let token = envelope.get("token").cloned();

    let mut user = USER.normalize(normalize::unwrap_object(envelope, &["user"]));
    if let (Value::Object(fields), Some(token)) = (&mut user, token) {
        fields.entry("token").or_insert(token);
    }

    serde_json::from_value(user)
}

#[async_trait]
impl AssetApi for BackendClient {
    async fn list_assets(&self) -> Result<Vec<Asset>, BackendError> {
        let value = self.get(&["aset"]).await?;
        Ok(ASSET.decode_list(value, &["aset", "assets"]))
    }

    async fn get_asset(&self, id: &AssetId) -> Result<Asset, BackendError> {
        let value = self.get(&["aset", id.as_str()]).await?;
        ASSET
            .decode_one(value, &["aset", "asset"])
            .map_err(|e| BackendError::decode("/aset/{id}", e))
    }

    async fn create_asset(&self, asset: &NewAsset) -> Result<(), BackendError> {
        self.send_json(Method::POST, &["aset"], asset).await?;
        Ok(())
    }

    async fn update_asset(&self, id: &AssetId, update: &AssetUpdate) -> Result<(), BackendError> {
        self.send_json(Method::PUT, &["aset", id.as_str()], update)
            .await?;
        Ok(())
    }

    async fn list_transactions(
        &self,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>, BackendError> {
        let value = self.get(&[kind.as_str()]).await?;
        Ok(TRANSACTION.decode_list(value, &[kind.as_str()]))
    }

    async fn submit_transaction(&self, transaction: &NewTransaction) -> Result<(), BackendError> {
        self.send_json(Method::POST, &[transaction.kind().as_str()], transaction)
            .await?;
        Ok(())
    }

    async fn list_beban(&self) -> Result<Vec<Beban>, BackendError> {
        let value = self.get(&["beban"]).await?;
        Ok(BEBAN.decode_list(value, &["beban"]))
    }

    async fn list_departemen(&self) -> Result<Vec<Departemen>, BackendError> {
        let value = self.get(&["departemen"]).await?;
        Ok(DEPARTEMEN.decode_list(value, &["departemen"]))
    }
}

#[async_trait]
impl ApprovalApi for BackendClient {
    async fn list_pending_approvals(&self) -> Result<Vec<ApprovalRecord>, BackendError> {
        let value = self.get(&["approval", "pending"]).await?;
        Ok(APPROVAL.decode_list(value, &["approvals", "pending"]))
    }

    async fn approval_detail(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
    ) -> Result<ApprovalDetail, BackendError> {
        let value = self
            .get(&["approval", tabel_ref.as_str(), record_id.as_str()])
            .await?;
        Ok(ApprovalDetail::from_response(
            tabel_ref,
            record_id.clone(),
            value,
        ))
    }

    async fn approve(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
    ) -> Result<(), BackendError> {
        self.send_json(
            Method::POST,
            &["approval", tabel_ref.as_str(), record_id.as_str(), "approve"],
            &json!({}),
        )
        .await?;
        Ok(())
    }

    async fn reject(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
        reason: &str,
    ) -> Result<(), BackendError> {
        self.send_json(
            Method::POST,
            &["approval", tabel_ref.as_str(), record_id.as_str(), "reject"],
            &json!({ "reason": reason }),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationApi for BackendClient {
    async fn list_notifications(
        &self,
        only_unread: bool,
    ) -> Result<Vec<Notification>, BackendError> {
        let mut url = self.endpoint(&["notification"])?;
        if only_unread {
            url.query_pairs_mut().append_pair("unread", "true");
        }
        let value = self.send(self.request(Method::GET, url)?).await?;
        Ok(NOTIFICATION.decode_list(value, &["notifications"]))
    }

    async fn unread_count(&self) -> Result<u64, BackendError> {
        let value = self.get(&["notification", "unread-count"]).await?;
        parse_count(&value).ok_or_else(|| {
            BackendError::decode("/notification/unread-count", "no count in response")
        })
    }

    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<(), BackendError> {
        self.send_json(Method::POST, &["notification"], notification)
            .await?;
        Ok(())
    }

    async fn mark_notification_read(&self, id: &NotificationId) -> Result<(), BackendError> {
        self.send_json(Method::PUT, &["notification", id.as_str(), "read"], &json!({}))
            .await?;
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> Result<(), BackendError> {
        self.send_json(Method::PUT, &["notification", "mark-all-read"], &json!({}))
            .await?;
        Ok(())
    }

    async fn delete_notification(&self, id: &NotificationId) -> Result<(), BackendError> {
        let url = self.endpoint(&["notification", id.as_str()])?;
        self.send(self.request(Method::DELETE, url)?).await?;
        Ok(())
    }
}

#[async_trait]
impl UserApi for BackendClient {
    async fn login(&self, username: &str, password: &str) -> Result<User, BackendError> {
        let url = self.endpoint(&["user"])?;
        let builder = self
            .client
            .post(url)
            .json(&json!({ "username": username, "password": password }));

        let value = self.send(builder).await?;
        decode_login(value).map_err(|e| BackendError::decode("/user", e))
    }

    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        let value = self.get(&["user", "list"]).await?;
        Ok(USER.decode_list(value, &["users"]))
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), BackendError> {
        self.send_json(Method::POST, &["user", "create"], user)
            .await?;
        Ok(())
    }

    async fn set_user_beban(&self, username: &str, beban: &[String]) -> Result<(), BackendError> {
        self.send_json(
            Method::PUT,
            &["user", username, "beban"],
            &json!({ "beban": beban }),
        )
        .await?;
        Ok(())
    }

    async fn reset_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), BackendError> {
        self.send_json(
            Method::PUT,
            &["user", username, "password"],
            &json!({ "password": password }),
        )
        .await?;
        Ok(())
    }
}
