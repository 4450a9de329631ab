//! In-memory backend used by service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::clients::BackendError;
use crate::domain::{
    ApprovalStatus, AssetId, AssetStatus, NotificationId, NotificationKind, RecordId, TabelRef,
    TransactionKind,
};
use crate::models::{
    ApprovalDetail, ApprovalRecord, Asset, AssetUpdate, Beban, Departemen, NewAsset,
    NewNotification, NewTransaction, NewUser, Notification, Transaction, User,
};
use crate::services::backend::{ApprovalApi, AssetApi, NotificationApi, UserApi};

#[derive(Default)]
pub struct FakeState {
    pub assets: HashMap<AssetId, Asset>,
    pub approvals: Vec<ApprovalRecord>,
    pub details: HashMap<(TabelRef, RecordId), Value>,
    pub notifications: Vec<Notification>,
    pub created_notifications: Vec<NewNotification>,
    pub submitted: Vec<NewTransaction>,
    pub users: Vec<User>,
    pub beban_updates: Vec<(String, Vec<String>)>,
    pub rejection_reasons: Vec<String>,
    pub calls: usize,
    pub fail_approve: bool,
    pub fail_asset_update: bool,
    pub fail_notification_create: bool,
    pub fail_detail: bool,
}

#[derive(Default)]
pub struct FakeBackend {
    pub state: Mutex<FakeState>,
}

fn server_error() -> BackendError {
    BackendError::Http {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "boom".to_string(),
    }
}

fn not_found(what: &str) -> BackendError {
    BackendError::Http {
        status: StatusCode::NOT_FOUND,
        message: format!("{what} not found"),
    }
}

pub fn asset(id: &str, status: AssetStatus, nilai: f64) -> Asset {
    Asset {
        aset_id: AssetId::new(id),
        id: None,
        nama_aset: Some(format!("Aset {id}")),
        kategori: Some("Elektronik".to_string()),
        kode_akun: None,
        nilai_aset: Some(nilai),
        tgl_perolehan: None,
        masa_manfaat: Some(48),
        beban: Some("4110".to_string()),
        status: Some(status),
        lokasi: Some("Gudang".to_string()),
        gambar: None,
        approval_status: None,
    }
}

pub fn pending(tabel_ref: TabelRef, id: i64, aset: &str, by: &str) -> ApprovalRecord {
    ApprovalRecord {
        id: None,
        tabel_ref,
        record_id: RecordId::from(id),
        approval_status: ApprovalStatus::Pending,
        created_by: Some(by.to_string()),
        created_at: None,
        aset_id: Some(AssetId::new(aset)),
    }
}

pub fn approval_notification(id: i64, tabel_ref: TabelRef, record: i64) -> Notification {
    Notification {
        id: NotificationId::from(id),
        user_id: None,
        username: Some("admin".to_string()),
        kind: NotificationKind::Approval,
        tabel_ref: Some(tabel_ref),
        record_id: Some(RecordId::from(record)),
        aset_id: None,
        message: Some("Pengajuan baru".to_string()),
        is_read: false,
        created_at: None,
    }
}

impl FakeBackend {
    /// Seeds a pending submission with its detail and admin notification.
    pub fn with_submission(self, tabel_ref: TabelRef, id: i64, aset: &str, by: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.approvals.push(pending(tabel_ref, id, aset, by));
            state.details.insert(
                (tabel_ref, RecordId::from(id)),
                json!({ "data": { "aset_id": aset, "created_by": by } }),
            );
            let notification_id = 100 + state.notifications.len() as i64;
            state
                .notifications
                .push(approval_notification(notification_id, tabel_ref, id));
        }
        self
    }

    pub fn with_asset(self, asset: Asset) -> Self {
        self.state
            .lock()
            .unwrap()
            .assets
            .insert(asset.aset_id.clone(), asset);
        self
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    fn touch(&self) -> std::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        state
    }

    fn decide(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
        status: ApprovalStatus,
    ) -> Result<(), BackendError> {
        let mut state = self.touch();
        if state.fail_approve {
            return Err(server_error());
        }
        let record = state
            .approvals
            .iter_mut()
            .find(|r| r.is(tabel_ref, record_id))
            .ok_or_else(|| not_found("approval"))?;
        record.approval_status = status;
        Ok(())
    }
}

#[async_trait]
impl AssetApi for FakeBackend {
    async fn list_assets(&self) -> Result<Vec<Asset>, BackendError> {
        let state = self.touch();
        let mut assets: Vec<_> = state.assets.values().cloned().collect();
        assets.sort_by(|a, b| a.aset_id.cmp(&b.aset_id));
        Ok(assets)
    }

    async fn get_asset(&self, id: &AssetId) -> Result<Asset, BackendError> {
        self.touch()
            .assets
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("asset"))
    }

    async fn create_asset(&self, asset: &NewAsset) -> Result<(), BackendError> {
        let mut state = self.touch();
        let mut created = self::asset(asset.aset_id.as_str(), asset.status, asset.nilai_aset);
        created.nama_aset = Some(asset.nama_aset.clone());
        state.assets.insert(asset.aset_id.clone(), created);
        Ok(())
    }

    async fn update_asset(&self, id: &AssetId, update: &AssetUpdate) -> Result<(), BackendError> {
        let mut state = self.touch();
        if state.fail_asset_update {
            return Err(server_error());
        }
        let asset = state.assets.get_mut(id).ok_or_else(|| not_found("asset"))?;
        if let Some(status) = update.status {
            asset.status = Some(status);
        }
        if let Some(nilai) = update.nilai_aset {
            asset.nilai_aset = Some(nilai);
        }
        if let Some(lokasi) = &update.lokasi {
            asset.lokasi = Some(lokasi.clone());
        }
        if let Some(beban) = &update.beban {
            asset.beban = Some(beban.clone());
        }
        Ok(())
    }

    async fn list_transactions(
        &self,
        _kind: TransactionKind,
    ) -> Result<Vec<Transaction>, BackendError> {
        drop(self.touch());
        Ok(Vec::new())
    }

    async fn submit_transaction(&self, transaction: &NewTransaction) -> Result<(), BackendError> {
        self.touch().submitted.push(transaction.clone());
        Ok(())
    }

    async fn list_beban(&self) -> Result<Vec<Beban>, BackendError> {
        drop(self.touch());
        Ok(vec![Beban {
            kode: "4110".to_string(),
            nama: Some("Beban Umum".to_string()),
        }])
    }

    async fn list_departemen(&self) -> Result<Vec<Departemen>, BackendError> {
        drop(self.touch());
        Ok(Vec::new())
    }
}

#[async_trait]
impl ApprovalApi for FakeBackend {
    async fn list_pending_approvals(&self) -> Result<Vec<ApprovalRecord>, BackendError> {
        // Decided records stay listed; filtering them out is the service's job.
        Ok(self.touch().approvals.clone())
    }

    async fn approval_detail(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
    ) -> Result<ApprovalDetail, BackendError> {
        let state = self.touch();
        if state.fail_detail {
            return Err(server_error());
        }
        let value = state
            .details
            .get(&(tabel_ref, record_id.clone()))
            .cloned()
            .ok_or_else(|| not_found("detail"))?;
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
        self.decide(tabel_ref, record_id, ApprovalStatus::Disetujui)
    }

    async fn reject(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
        reason: &str,
    ) -> Result<(), BackendError> {
        self.decide(tabel_ref, record_id, ApprovalStatus::Ditolak)?;
        self.state
            .lock()
            .unwrap()
            .rejection_reasons
            .push(reason.to_string());
        Ok(())
    }
}

#[async_trait]
impl NotificationApi for FakeBackend {
    async fn list_notifications(
        &self,
        only_unread: bool,
    ) -> Result<Vec<Notification>, BackendError> {
        let state = self.touch();
        Ok(state
            .notifications
            .iter()
            .filter(|n| !only_unread || !n.is_read)
            .cloned()
            .collect())
    }

    async fn unread_count(&self) -> Result<u64, BackendError> {
        let state = self.touch();
        Ok(state.notifications.iter().filter(|n| !n.is_read).count() as u64)
    }

    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<(), BackendError> {
        let mut state = self.touch();
        if state.fail_notification_create {
            return Err(server_error());
        }
        state.created_notifications.push(notification.clone());
        Ok(())
    }

    async fn mark_notification_read(&self, id: &NotificationId) -> Result<(), BackendError> {
        let mut state = self.touch();
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| not_found("notification"))?;
        notification.is_read = true;
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> Result<(), BackendError> {
        let mut state = self.touch();
        for notification in &mut state.notifications {
            notification.is_read = true;
        }
        Ok(())
    }

    async fn delete_notification(&self, id: &NotificationId) -> Result<(), BackendError> {
        let mut state = self.touch();
        let before = state.notifications.len();
        state.notifications.retain(|n| &n.id != id);
        if state.notifications.len() == before {
            return Err(not_found("notification"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserApi for FakeBackend {
    async fn login(&self, username: &str, password: &str) -> Result<User, BackendError> {
        let state = self.touch();
        if password != "rahasia123" {
            return Err(BackendError::Http {
                status: StatusCode::UNAUTHORIZED,
                message: "Username atau password salah".to_string(),
            });
        }
        let mut user = state
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| not_found("user"))?;
        user.token = Some(format!("token-{username}"));
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        Ok(self.touch().users.clone())
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), BackendError> {
        self.touch().users.push(User {
            id: None,
            username: user.username.clone(),
            nama: Some(user.nama.clone()),
            role: user.role.to_string(),
            beban: user.beban.clone(),
            token: None,
        });
        Ok(())
    }

    async fn set_user_beban(&self, username: &str, beban: &[String]) -> Result<(), BackendError> {
        self.touch()
            .beban_updates
            .push((username.to_string(), beban.to_vec()));
        Ok(())
    }

    async fn reset_user_password(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<(), BackendError> {
        drop(self.touch());
        Ok(())
    }
}
