use serde::{Deserialize, Serialize};
use std::fmt;

use super::de;
use crate::domain::{RecordId, Role};

/// A user as returned by the backend. The role stays a raw string here; the
/// session layer decides whether it is acceptable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<RecordId>,

    pub username: String,

    #[serde(default)]
    pub nama: Option<String>,

    #[serde(default)]
    pub role: String,

    #[serde(default, deserialize_with = "de::string_list")]
    pub beban: Vec<String>,

    /// Only present on login responses.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub nama: String,
    pub role: Role,
    pub password: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub beban: Vec<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("nama", &self.nama)
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .field("beban", &self.beban)
            .finish()
    }
}
