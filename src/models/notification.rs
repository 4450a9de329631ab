use serde::{Deserialize, Serialize};

use super::de;
use crate::domain::{AssetId, NotificationId, NotificationKind, RecordId, TabelRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,

    #[serde(default)]
    pub user_id: Option<RecordId>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: NotificationKind,

    #[serde(default)]
    pub tabel_ref: Option<TabelRef>,

    #[serde(default)]
    pub record_id: Option<RecordId>,

    #[serde(default)]
    pub aset_id: Option<AssetId>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, deserialize_with = "de::lenient_bool")]
    pub is_read: bool,

    #[serde(default)]
    pub created_at: Option<String>,
}

impl Notification {
    #[must_use]
    pub fn concerns(&self, tabel_ref: TabelRef, record_id: &RecordId) -> bool {
        self.tabel_ref == Some(tabel_ref) && self.record_id.as_ref() == Some(record_id)
    }

    /// Still announcing a submission that waits for review.
    #[must_use]
    pub fn is_pending_approval_for(&self, tabel_ref: TabelRef, record_id: &RecordId) -> bool {
        self.kind == NotificationKind::Approval && self.concerns(tabel_ref, record_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub username: String,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    pub tabel_ref: TabelRef,

    pub record_id: RecordId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aset_id: Option<AssetId>,

    pub message: String,
}

impl NewNotification {
    #[must_use]
    pub fn approved(
        username: String,
        tabel_ref: TabelRef,
        record_id: RecordId,
        aset_id: Option<AssetId>,
    ) -> Self {
        let message = format!(
            "Pengajuan {} #{} telah disetujui",
            tabel_ref.label(),
            record_id
        );
        Self {
            username,
            kind: NotificationKind::Approved,
            tabel_ref,
            record_id,
            aset_id,
            message,
        }
    }

    #[must_use]
    pub fn rejected(
        username: String,
        tabel_ref: TabelRef,
        record_id: RecordId,
        aset_id: Option<AssetId>,
        reason: &str,
    ) -> Self {
        let message = format!(
            "Pengajuan {} #{} ditolak: {}",
            tabel_ref.label(),
            record_id,
            reason
        );
        Self {
            username,
            kind: NotificationKind::Rejected,
            tabel_ref,
            record_id,
            aset_id,
            message,
        }
    }
}
