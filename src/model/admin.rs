use chrono::{DateTime, Utc};

/// Stored admin account row. Not serializable: the hash must never leave
/// the store layer, callers get `models::AdminIdentity` instead.
#[derive(Debug, sqlx::FromRow)]
pub struct AdminAccount {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
