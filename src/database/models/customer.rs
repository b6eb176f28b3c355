use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored customer row. `id` comes from the `SERIAL` column and is never
/// taken from a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub status: String,
}

/// Inbound body for create and update. Unknown keys (including `id`) are
/// ignored. A field that is absent or `null` is `None`: stored as an empty
/// string on create, left unchanged on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CustomerPayload {
    /// Fill every field the body left out with the stored value.
    pub fn merged_over(self, existing: &Customer) -> Self {
        Self {
            name: self.name.or_else(|| Some(existing.name.clone())),
            email: self.email.or_else(|| Some(existing.email.clone())),
            status: self.status.or_else(|| Some(existing.status.clone())),
        }
    }
}

impl Customer {
    pub fn from_payload(id: i32, payload: CustomerPayload) -> Self {
        Self {
            id,
            name: payload.name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            status: payload.status.unwrap_or_default(),
        }
    }
}
