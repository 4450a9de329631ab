use serde::{Deserialize, Serialize};

use super::de;
use crate::domain::RecordId;

/// Cost center an asset or user is charged to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beban {
    pub kode: String,
    #[serde(default)]
    pub nama: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Departemen {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub nama: Option<String>,
}
