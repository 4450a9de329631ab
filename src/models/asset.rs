use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use crate::domain::{ApprovalStatus, AssetId, AssetStatus, RecordId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub aset_id: AssetId,

    /// Backend row id; not used for addressing.
    #[serde(default)]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub nama_aset: Option<String>,

    #[serde(default)]
    pub kategori: Option<String>,

    #[serde(default, deserialize_with = "de::lenient_string")]
    pub kode_akun: Option<String>,

    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub nilai_aset: Option<f64>,

    #[serde(default)]
    pub tgl_perolehan: Option<String>,

    /// Useful life in months.
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub masa_manfaat: Option<i64>,

    #[serde(default, deserialize_with = "de::lenient_string")]
    pub beban: Option<String>,

    #[serde(default)]
    pub status: Option<AssetStatus>,

    #[serde(default)]
    pub lokasi: Option<String>,

    #[serde(default)]
    pub gambar: Option<String>,

    #[serde(default)]
    pub approval_status: Option<ApprovalStatus>,
}

impl Asset {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nama_aset.as_deref().unwrap_or_else(|| self.aset_id.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub aset_id: AssetId,
    pub nama_aset: String,
    pub kategori: String,
    pub kode_akun: String,
    pub nilai_aset: f64,
    pub tgl_perolehan: NaiveDate,
    pub masa_manfaat: u32,
    pub beban: String,
    pub lokasi: String,
    pub status: AssetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gambar: Option<String>,
}

/// Partial update; absent fields are left alone by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nilai_aset: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lokasi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub beban: Option<String>,
}

impl AssetUpdate {
    #[must_use]
    pub fn status(status: AssetStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Applied once a repair is approved: the asset is back in service.
    #[must_use]
    pub fn repaired() -> Self {
        Self::status(AssetStatus::Aktif)
    }

    /// Applied once a sale is approved: written off and marked sold.
    #[must_use]
    pub fn sold() -> Self {
        Self {
            status: Some(AssetStatus::Dijual),
            nilai_aset: Some(0.0),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
