//! Backend operations, split by resource.
//!
//! [`crate::clients::BackendClient`] implements these over HTTP; services take
//! them as trait objects or generics so they can run against in-memory fakes.

use crate::clients::BackendError;
use crate::domain::{AssetId, NotificationId, RecordId, TabelRef, TransactionKind};
use crate::models::{
    ApprovalDetail, ApprovalRecord, Asset, AssetUpdate, Beban, Departemen, NewAsset,
    NewNotification, NewTransaction, NewUser, Notification, Transaction, User,
};

#[async_trait::async_trait]
pub trait AssetApi: Send + Sync {
    async fn list_assets(&self) -> Result<Vec<Asset>, BackendError>;

    async fn get_asset(&self, id: &AssetId) -> Result<Asset, BackendError>;

    async fn create_asset(&self, asset: &NewAsset) -> Result<(), BackendError>;

    async fn update_asset(&self, id: &AssetId, update: &AssetUpdate) -> Result<(), BackendError>;

    async fn list_transactions(
        &self,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>, BackendError>;

    async fn submit_transaction(&self, transaction: &NewTransaction) -> Result<(), BackendError>;

    async fn list_beban(&self) -> Result<Vec<Beban>, BackendError>;

    async fn list_departemen(&self) -> Result<Vec<Departemen>, BackendError>;
}

#[async_trait::async_trait]
pub trait ApprovalApi: Send + Sync {
    async fn list_pending_approvals(&self) -> Result<Vec<ApprovalRecord>, BackendError>;

    async fn approval_detail(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
    ) -> Result<ApprovalDetail, BackendError>;

    async fn approve(&self, tabel_ref: TabelRef, record_id: &RecordId)
    -> Result<(), BackendError>;

    async fn reject(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
        reason: &str,
    ) -> Result<(), BackendError>;
}

#[async_trait::async_trait]
pub trait NotificationApi: Send + Sync {
    async fn list_notifications(&self, only_unread: bool)
    -> Result<Vec<Notification>, BackendError>;

    async fn unread_count(&self) -> Result<u64, BackendError>;

    async fn create_notification(&self, notification: &NewNotification)
    -> Result<(), BackendError>;

    async fn mark_notification_read(&self, id: &NotificationId) -> Result<(), BackendError>;

    async fn mark_all_notifications_read(&self) -> Result<(), BackendError>;

    async fn delete_notification(&self, id: &NotificationId) -> Result<(), BackendError>;
}

#[async_trait::async_trait]
pub trait UserApi: Send + Sync {
    /// Exchanges credentials for the user record and token.
    async fn login(&self, username: &str, password: &str) -> Result<User, BackendError>;

    async fn list_users(&self) -> Result<Vec<User>, BackendError>;

    async fn create_user(&self, user: &NewUser) -> Result<(), BackendError>;

    async fn set_user_beban(&self, username: &str, beban: &[String]) -> Result<(), BackendError>;

    async fn reset_user_password(&self, username: &str, password: &str)
    -> Result<(), BackendError>;
}
