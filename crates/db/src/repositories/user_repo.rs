//! Repository for the `users` table.

use async_trait::async_trait;
use prsk_core::catalog::{User, UserKey};
use prsk_core::pagination::PageRequest;
use prsk_core::store::{RowLock, StoreError, Table, Visibility};
use prsk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::UserRow;
use crate::store::{classify, liveness, lock_clause, order_by, MissingRow, PgTx};

const COLUMNS: &str =
    "id, user_name, password, deleted, created_at, created_by, updated_at, updated_by";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(conn: &mut PgConnection, user: &User) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (user_name, password, deleted, created_at, created_by, updated_at, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(&user.user_name)
            .bind(&user.password)
            .bind(user.deleted)
            .bind(user.audit.created_at)
            .bind(&user.audit.created_by)
            .bind(user.audit.updated_at)
            .bind(&user.audit.updated_by)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1{}",
            liveness(visibility)
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn lock_live(
        conn: &mut PgConnection,
        id: DbId,
        lock: RowLock,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1{}{}",
            liveness(Visibility::Live),
            lock_clause(lock)
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_live_by_name(
        conn: &mut PgConnection,
        user_name: &str,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE user_name = $1{}",
            liveness(Visibility::Live)
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(user_name)
            .fetch_optional(conn)
            .await
    }

    pub async fn update(conn: &mut PgConnection, user: &User) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                user_name = $2,
                password = $3,
                deleted = $4,
                updated_at = $5,
                updated_by = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id)
            .bind(&user.user_name)
            .bind(&user.password)
            .bind(user.deleted)
            .bind(user.audit.updated_at)
            .bind(&user.audit.updated_by)
            .fetch_optional(conn)
            .await
    }

    pub async fn list_live(
        conn: &mut PgConnection,
        page: &PageRequest,
    ) -> Result<(Vec<UserRow>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE deleted = false")
            .fetch_one(&mut *conn)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE deleted = false {} LIMIT $1 OFFSET $2",
            order_by(page)
        );
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&mut *conn)
            .await?;
        Ok((rows, total))
    }
}

#[async_trait]
impl Table<User> for PgTx {
    async fn find_by_id(
        &mut self,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<User>, StoreError> {
        let row = UserRepo::find_by_id(self.conn(), id, visibility)
            .await
            .map_err(classify)?;
        Ok(row.map(User::from))
    }

    async fn lock_live(&mut self, id: DbId, lock: RowLock) -> Result<Option<User>, StoreError> {
        let row = UserRepo::lock_live(self.conn(), id, lock)
            .await
            .map_err(classify)?;
        Ok(row.map(User::from))
    }

    async fn find_live_by_key(&mut self, key: &UserKey) -> Result<Option<User>, StoreError> {
        let row = UserRepo::find_live_by_name(self.conn(), &key.0)
            .await
            .map_err(classify)?;
        Ok(row.map(User::from))
    }

    async fn insert(&mut self, record: &User) -> Result<User, StoreError> {
        let row = UserRepo::create(self.conn(), record)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn update(&mut self, record: &User) -> Result<User, StoreError> {
        UserRepo::update(self.conn(), record)
            .await
            .map_err(classify)?
            .map(User::from)
            .ok_or_else(|| {
                StoreError::backend(MissingRow {
                    entity: "User",
                    id: record.id,
                })
            })
    }

    async fn list_live(&mut self, page: &PageRequest) -> Result<(Vec<User>, i64), StoreError> {
        let (rows, total) = UserRepo::list_live(self.conn(), page)
            .await
            .map_err(classify)?;
        Ok((rows.into_iter().map(User::from).collect(), total))
    }
}
