//! Field-name normalization for backend responses.
//!
//! The backend spells the same field several ways across endpoints
//! (`AsetId`, `aset_id`, `asetID`, ...). Each entity has an [`AliasTable`]
//! listing its canonical camelCase keys and the spellings that map onto them.
//! Responses are normalized before serde sees them, so the models only ever
//! deal with the canonical shape.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct FieldAlias {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    /// Lowercase string values, for enum-like fields the backend capitalizes.
    pub fold_case: bool,
}

const fn field(canonical: &'static str, aliases: &'static [&'static str]) -> FieldAlias {
    FieldAlias {
        canonical,
        aliases,
        fold_case: false,
    }
}

const fn keyword(canonical: &'static str, aliases: &'static [&'static str]) -> FieldAlias {
    FieldAlias {
        canonical,
        aliases,
        fold_case: true,
    }
}

#[derive(Debug)]
pub struct AliasTable {
    pub entity: &'static str,
    pub fields: &'static [FieldAlias],
}

impl AliasTable {
    /// Looks up the entry a key belongs to, by canonical name or alias.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&FieldAlias> {
        self.fields
            .iter()
            .find(|f| f.canonical == key || f.aliases.contains(&key))
    }

    /// Renames aliased keys to their canonical name. A canonical key already
    /// present wins over any alias; unknown keys pass through untouched.
    #[must_use]
    pub fn normalize_object(&self, object: Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::with_capacity(object.len());
        let mut aliased = Vec::new();

        for (key, value) in object {
            match self.lookup(&key) {
                Some(entry) if entry.canonical == key => {
                    out.insert(key, fold(entry, value));
                }
                Some(entry) => aliased.push((entry, key, value)),
                None => {
                    out.insert(key, value);
                }
            }
        }

        for (entry, original, value) in aliased {
            if out.contains_key(entry.canonical) {
                debug!(
                    entity = self.entity,
                    key = %original,
                    canonical = entry.canonical,
                    "Dropping alias shadowed by canonical key"
                );
                continue;
            }
            out.insert(entry.canonical.to_string(), fold(entry, value));
        }

        out
    }

    #[must_use]
    pub fn normalize(&self, value: Value) -> Value {
        match value {
            Value::Object(object) => Value::Object(self.normalize_object(object)),
            other => other,
        }
    }

    /// Normalizes and deserializes a single entity, unwrapping `{ "<wrapper>": {...} }`.
    pub fn decode_one<T: DeserializeOwned>(
        &self,
        value: Value,
        wrappers: &[&str],
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.normalize(unwrap_object(value, wrappers)))
    }

    /// Normalizes and deserializes a list, skipping items that do not parse.
    #[must_use]
    pub fn decode_list<T: DeserializeOwned>(&self, value: Value, wrappers: &[&str]) -> Vec<T> {
        unwrap_list(value, wrappers)
            .into_iter()
            .filter_map(|item| match serde_json::from_value(self.normalize(item)) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!(entity = self.entity, error = %e, "Skipping malformed item");
                    None
                }
            })
            .collect()
    }
}

fn fold(entry: &FieldAlias, value: Value) -> Value {
    match value {
        Value::String(s) if entry.fold_case => Value::String(s.trim().to_ascii_lowercase()),
        other => other,
    }
}

/// Flattens a list response. Accepts a bare array, an object holding the
/// array under one of `wrappers` or `data`, and `data` nesting one level
/// deeper (`{ "data": { "notifications": [...] } }`).
#[must_use]
pub fn unwrap_list(value: Value, wrappers: &[&str]) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut object) => {
            for key in wrappers.iter().copied().chain(["data"]) {
                match object.remove(key) {
                    Some(Value::Array(items)) => return items,
                    Some(nested @ Value::Object(_)) if key == "data" => {
                        return unwrap_list(nested, wrappers);
                    }
                    _ => {}
                }
            }
            debug!("List response carried no recognizable array");
            Vec::new()
        }
        Value::Null => Vec::new(),
        other => {
            debug!(kind = ?other, "Unexpected list response");
            Vec::new()
        }
    }
}

/// Unwraps `{ "<wrapper>": {...} }` envelopes around a single object.
#[must_use]
pub fn unwrap_object(value: Value, wrappers: &[&str]) -> Value {
    if let Value::Object(object) = &value {
        for key in wrappers.iter().copied().chain(["data"]) {
            if let Some(Value::Object(inner)) = object.get(key) {
                return Value::Object(inner.clone());
            }
        }
    }
    value
}

const ASET_ID: &[&str] = &["AsetId", "aset_id", "asetID", "AsetID", "id_aset", "IdAset"];
const APPROVAL_STATUS: &[&str] = &["ApprovalStatus", "approval_status", "statusApproval"];
const CREATED_BY: &[&str] = &["CreatedBy", "created_by", "submittedBy", "submitted_by"];
const CREATED_AT: &[&str] = &["CreatedAt", "created_at", "tanggalPengajuan"];
const ID: &[&str] = &["Id", "ID"];

pub static ASSET: AliasTable = AliasTable {
    entity: "aset",
    fields: &[
        field("id", ID),
        field("asetId", ASET_ID),
        field("namaAset", &["NamaAset", "nama_aset", "nama"]),
        field("kategori", &["Kategori", "kategori_aset", "category"]),
        field("kodeAkun", &["KodeAkun", "kode_akun", "akun", "accountCode"]),
        field(
            "nilaiAset",
            &["NilaiAset", "nilai_aset", "nilai", "nilaiPerolehan", "nilai_perolehan"],
        ),
        field(
            "tglPerolehan",
            &["TglPerolehan", "tgl_perolehan", "tanggalPerolehan", "tanggal_perolehan"],
        ),
        field("masaManfaat", &["MasaManfaat", "masa_manfaat"]),
        field("beban", &["Beban", "kode_beban", "kodeBeban"]),
        keyword("status", &["Status", "status_aset", "statusAset"]),
        field("lokasi", &["Lokasi", "lokasi_aset"]),
        field("gambar", &["Gambar", "image", "foto", "imageUrl", "image_url"]),
        keyword("approvalStatus", APPROVAL_STATUS),
        field("createdBy", CREATED_BY),
        field("createdAt", CREATED_AT),
    ],
};

pub static TRANSACTION: AliasTable = AliasTable {
    entity: "transaksi",
    fields: &[
        field("id", ID),
        field("asetId", ASET_ID),
        field("lokasi", &["Lokasi", "alokasi", "lokasi_alokasi", "alokasiLokasi"]),
        keyword("approvalStatus", APPROVAL_STATUS),
        field("createdBy", CREATED_BY),
        field("createdAt", CREATED_AT),
        field("tglPerbaikan", &["TglPerbaikan", "tgl_perbaikan", "tanggal_perbaikan"]),
        field("teknisi", &["Teknisi"]),
        field("biaya", &["Biaya", "biaya_perbaikan", "biayaPerbaikan"]),
        field("keterangan", &["Keterangan", "deskripsi"]),
        field("tglRusak", &["TglRusak", "tgl_rusak", "tanggal_rusak"]),
        field("peminjam", &["Peminjam"]),
        field("tglPinjam", &["TglPinjam", "tgl_pinjam", "tanggal_pinjam"]),
        field("tglKembali", &["TglKembali", "tgl_kembali", "tanggal_kembali"]),
        field("tglJual", &["TglJual", "tgl_jual", "tanggal_jual"]),
        field("hargaJual", &["HargaJual", "harga_jual", "harga"]),
        field("pembeli", &["Pembeli"]),
        field("departemenAsal", &["DepartemenAsal", "departemen_asal", "dari"]),
        field("departemenTujuan", &["DepartemenTujuan", "departemen_tujuan", "ke"]),
        field("tglMutasi", &["TglMutasi", "tgl_mutasi", "tanggal_mutasi"]),
    ],
};

pub static APPROVAL: AliasTable = AliasTable {
    entity: "approval",
    fields: &[
        field("id", ID),
        keyword("tabelRef", &["TabelRef", "tabel_ref", "tableRef", "table_ref"]),
        field("recordId", &["RecordId", "record_id", "refId", "ref_id"]),
        keyword("approvalStatus", &["ApprovalStatus", "approval_status", "status"]),
        field("createdBy", CREATED_BY),
        field("createdAt", CREATED_AT),
        field("asetId", ASET_ID),
    ],
};

pub static NOTIFICATION: AliasTable = AliasTable {
    entity: "notification",
    fields: &[
        field("id", &["Id", "ID", "notificationId", "notification_id"]),
        field("userId", &["UserId", "user_id"]),
        field("username", &["Username", "user_name", "targetUser"]),
        keyword("type", &["Type", "tipe", "notificationType", "notification_type"]),
        keyword("tabelRef", &["TabelRef", "tabel_ref", "tableRef", "table_ref"]),
        field("recordId", &["RecordId", "record_id"]),
        field("asetId", ASET_ID),
        field("message", &["Message", "pesan"]),
        field("isRead", &["IsRead", "is_read", "read", "dibaca"]),
        field("createdAt", CREATED_AT),
    ],
};

pub static USER: AliasTable = AliasTable {
    entity: "user",
    fields: &[
        field("id", &["Id", "ID", "userId", "user_id"]),
        field("username", &["Username", "user_name"]),
        field(
            "nama",
            &["Nama", "name", "displayName", "display_name", "namaLengkap"],
        ),
        keyword("role", &["Role"]),
        field("beban", &["Beban", "bebanList", "beban_list"]),
        field("token", &["Token", "accessToken", "access_token", "jwt"]),
    ],
};

pub static BEBAN: AliasTable = AliasTable {
    entity: "beban",
    fields: &[
        field("kode", &["Kode", "kode_beban", "kodeBeban", "code"]),
        field("nama", &["Nama", "nama_beban", "namaBeban", "name"]),
    ],
};

pub static DEPARTEMEN: AliasTable = AliasTable {
    entity: "departemen",
    fields: &[
        field("id", &["Id", "ID", "departemenId", "departemen_id"]),
        field(
            "nama",
            &["Nama", "nama_departemen", "namaDepartemen", "name"],
        ),
    ],
};
