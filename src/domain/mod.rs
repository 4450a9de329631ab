//! Domain primitives for the asset-management client.
//!
//! Identifiers are newtypes so an asset code cannot be passed where a record
//! or notification id is expected. The backend is inconsistent about sending
//! numeric ids as JSON numbers or strings, so record-like ids accept both and
//! are held as strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Human-assigned asset code, e.g. `AST/2024/001`.
///
/// Asset codes may contain slashes; they are percent-encoded as a single path
/// segment when placed in a URL.
///
/// # Examples
///
/// ```rust
/// use asetrack::domain::AssetId;
///
/// let id = AssetId::new("AST/2024/001");
/// assert_eq!(id.as_str(), "AST/2024/001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl FromStr for AssetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self::new(s);
        if id.is_empty() {
            return Err("asset id cannot be empty".to_string());
        }
        Ok(id)
    }
}

/// Either spelling of an id the backend may send.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.trim().to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self(RawId::deserialize(deserializer)?.into()))
    }
}

macro_rules! loose_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id.to_string())
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(concat!(stringify!($name), " cannot be empty").to_string());
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Ok(Self(RawId::deserialize(deserializer)?.into()))
            }
        }
    };
}

loose_id!(
    /// Primary key of a transaction or approval row.
    RecordId
);

loose_id!(
    /// Primary key of a notification.
    NotificationId
);

/// Role carried by a logged-in user. Anything else forces a logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Aktif,
    Rusak,
    Diperbaiki,
    Dipinjam,
    Dijual,
}

impl AssetStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aktif => "aktif",
            Self::Rusak => "rusak",
            Self::Diperbaiki => "diperbaiki",
            Self::Dipinjam => "dipinjam",
            Self::Dijual => "dijual",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aktif" => Ok(Self::Aktif),
            "rusak" => Ok(Self::Rusak),
            "diperbaiki" => Ok(Self::Diperbaiki),
            "dipinjam" => Ok(Self::Dipinjam),
            "dijual" => Ok(Self::Dijual),
            other => Err(format!("unknown asset status: {other}")),
        }
    }
}

/// Review state of a submission. Rows without a status are pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    #[serde(alias = "approved")]
    Disetujui,
    #[serde(alias = "rejected")]
    Ditolak,
}

impl ApprovalStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Disetujui => "disetujui",
            Self::Ditolak => "ditolak",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminator naming the table an approval record points into.
///
/// Variant order is the order groups are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabelRef {
    Aset,
    Perbaikan,
    Rusak,
    Dipinjam,
    Dijual,
    Mutasi,
}

impl TabelRef {
    pub const ALL: [Self; 6] = [
        Self::Aset,
        Self::Perbaikan,
        Self::Rusak,
        Self::Dipinjam,
        Self::Dijual,
        Self::Mutasi,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aset => "aset",
            Self::Perbaikan => "perbaikan",
            Self::Rusak => "rusak",
            Self::Dipinjam => "dipinjam",
            Self::Dijual => "dijual",
            Self::Mutasi => "mutasi",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Aset => "Aset baru",
            Self::Perbaikan => "Perbaikan",
            Self::Rusak => "Laporan rusak",
            Self::Dipinjam => "Peminjaman",
            Self::Dijual => "Penjualan",
            Self::Mutasi => "Mutasi",
        }
    }

    /// The transaction kind stored in this table, if it is a transaction table.
    #[must_use]
    pub const fn transaction_kind(&self) -> Option<TransactionKind> {
        match self {
            Self::Aset => None,
            Self::Perbaikan => Some(TransactionKind::Perbaikan),
            Self::Rusak => Some(TransactionKind::Rusak),
            Self::Dipinjam => Some(TransactionKind::Dipinjam),
            Self::Dijual => Some(TransactionKind::Dijual),
            Self::Mutasi => Some(TransactionKind::Mutasi),
        }
    }
}

impl fmt::Display for TabelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabelRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| format!("unknown table: {lowered}"))
    }
}

/// The five status-changing transaction types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Perbaikan,
    Rusak,
    Dipinjam,
    Dijual,
    Mutasi,
}

impl TransactionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.tabel_ref().as_str()
    }

    #[must_use]
    pub const fn tabel_ref(&self) -> TabelRef {
        match self {
            Self::Perbaikan => TabelRef::Perbaikan,
            Self::Rusak => TabelRef::Rusak,
            Self::Dipinjam => TabelRef::Dipinjam,
            Self::Dijual => TabelRef::Dijual,
            Self::Mutasi => TabelRef::Mutasi,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<TabelRef>()?
            .transaction_kind()
            .ok_or_else(|| format!("not a transaction table: {}", s.trim()))
    }
}

/// Tag carried by a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A submission waiting for admin review.
    Approval,
    Approved,
    Rejected,
    #[default]
    #[serde(other)]
    Other,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approval => "approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
