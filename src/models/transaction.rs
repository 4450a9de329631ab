use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{ApprovalStatus, AssetId, RecordId, TransactionKind};

/// A transaction row as listed by `/perbaikan`, `/rusak`, `/dipinjam`,
/// `/dijual` or `/mutasi`. Type-specific columns stay in `fields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,

    pub aset_id: AssetId,

    #[serde(default)]
    pub lokasi: Option<String>,

    #[serde(default)]
    pub approval_status: Option<ApprovalStatus>,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Transaction {
    /// Renders a type-specific column for display.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Columns worth showing for a kind, in display order.
    #[must_use]
    pub const fn summary_keys(kind: TransactionKind) -> &'static [&'static str] {
        match kind {
            TransactionKind::Perbaikan => &["tglPerbaikan", "teknisi", "biaya"],
            TransactionKind::Rusak => &["tglRusak", "keterangan"],
            TransactionKind::Dipinjam => &["peminjam", "tglPinjam", "tglKembali"],
            TransactionKind::Dijual => &["tglJual", "hargaJual", "pembeli"],
            TransactionKind::Mutasi => &["departemenAsal", "departemenTujuan", "tglMutasi"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairDetails {
    pub tgl_perbaikan: NaiveDate,
    pub teknisi: String,
    pub biaya: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageDetails {
    pub tgl_rusak: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub peminjam: String,
    pub tgl_pinjam: NaiveDate,
    pub tgl_kembali: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetails {
    pub tgl_jual: NaiveDate,
    pub harga_jual: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pembeli: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDetails {
    pub departemen_asal: String,
    pub departemen_tujuan: String,
    pub tgl_mutasi: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransactionDetails {
    Repair(RepairDetails),
    Damage(DamageDetails),
    Loan(LoanDetails),
    Sale(SaleDetails),
    Transfer(TransferDetails),
}

impl TransactionDetails {
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        match self {
            Self::Repair(_) => TransactionKind::Perbaikan,
            Self::Damage(_) => TransactionKind::Rusak,
            Self::Loan(_) => TransactionKind::Dipinjam,
            Self::Sale(_) => TransactionKind::Dijual,
            Self::Transfer(_) => TransactionKind::Mutasi,
        }
    }
}

/// Submission body for a transaction endpoint. New submissions start out
/// pending on the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub aset_id: AssetId,
    pub lokasi: String,
    #[serde(flatten)]
    pub details: TransactionDetails,
}

impl NewTransaction {
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.details.kind()
    }
}
