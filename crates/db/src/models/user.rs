//! Row model for the `users` table.

use prsk_core::audit::AuditInfo;
use prsk_core::catalog::User;
use prsk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub user_name: String,
    pub password: String,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Timestamp,
    pub updated_by: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            user_name: row.user_name,
            password: row.password,
            deleted: row.deleted,
            audit: AuditInfo {
                created_at: row.created_at,
                created_by: row.created_by,
                updated_at: row.updated_at,
                updated_by: row.updated_by,
            },
        }
    }
}
