use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{ApprovalStatus, AssetId, RecordId, TabelRef};
use crate::normalize::{self, AliasTable};

/// Cross-table view of one submission awaiting (or past) admin review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRecord {
    #[serde(default)]
    pub id: Option<RecordId>,

    pub tabel_ref: TabelRef,

    pub record_id: RecordId,

    #[serde(default)]
    pub approval_status: ApprovalStatus,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub aset_id: Option<AssetId>,
}

impl ApprovalRecord {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.approval_status == ApprovalStatus::Pending
    }

    #[must_use]
    pub fn is(&self, tabel_ref: TabelRef, record_id: &RecordId) -> bool {
        self.tabel_ref == tabel_ref && &self.record_id == record_id
    }
}

/// The submitted data behind an approval record.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalDetail {
    pub tabel_ref: TabelRef,
    pub record_id: RecordId,
    pub fields: Map<String, Value>,
}

impl ApprovalDetail {
    /// Builds a detail from `GET /approval/{tabelRef}/{recordId}`, which the
    /// backend may wrap in `data`, `detail` or `record`.
    #[must_use]
    pub fn from_response(tabel_ref: TabelRef, record_id: RecordId, value: Value) -> Self {
        let table = Self::table_for(tabel_ref);
        let fields = match table.normalize(normalize::unwrap_object(value, &["detail", "record"]))
        {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        Self {
            tabel_ref,
            record_id,
            fields,
        }
    }

    fn table_for(tabel_ref: TabelRef) -> &'static AliasTable {
        match tabel_ref {
            TabelRef::Aset => &normalize::ASSET,
            _ => &normalize::TRANSACTION,
        }
    }

    /// Username of whoever submitted the record.
    #[must_use]
    pub fn submitter(&self) -> Option<String> {
        self.string_field("createdBy")
    }

    /// The asset the submission concerns. This is the single identifier used
    /// for post-approval asset updates.
    #[must_use]
    pub fn asset_id(&self) -> Option<AssetId> {
        self.string_field("asetId").map(AssetId::new)
    }

    fn string_field(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
