/*
 * Responsibility
 * - users テーブル向けの UserStore 契約と SQLx 実装
 * - PgPool を受け取り insert/find/delete を提供 (行の更新はしない)
 * - DB エラーは RepoError に変換して上位へ
 */
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

/// Durable user record; the source of truth for role resolution.
///
/// The schema is assumed to have at least these columns:
/// - users.id (text, primary key)
/// - users.name (text)
/// - users.description (text)
/// - users.role (text)
/// - users.birthday (date)
/// - users.created_at (timestamptz)
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub role: String,
    pub birthday: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Durable user store. Rows are inserted and deleted, never updated in place.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRow>, RepoError>;

    async fn insert(&self, user: &UserRow) -> Result<(), RepoError>;

    async fn delete(&self, id: &str) -> Result<bool, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRow>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, description, role, birthday, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert(&self, user: &UserRow) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, description, role, birthday, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.description)
        .bind(&user.role)
        .bind(user.birthday)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
