use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row: relational identity plus an optional photo reference
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Database-assigned id, monotonically increasing, never reused
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address, unique across all rows
    pub email: String,
    /// Reference into the asset store, absent when the user has no photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,
    /// When the row was created, immutable after insert
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Merge explicitly supplied changes over this row.
    ///
    /// Fields left `None` keep their current value; the id and the
    /// creation timestamp never change.
    pub(crate) fn merged(self, changes: UserChanges) -> Self {
        Self {
            name: changes.name.unwrap_or(self.name),
            email: changes.email.unwrap_or(self.email),
            photo_path: changes.photo_path.or(self.photo_path),
            ..self
        }
    }
}

/// Partial update for a user row; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo_path: Option<String>,
}
