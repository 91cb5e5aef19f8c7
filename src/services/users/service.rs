/*
 * Responsibility
 * - User の追加/取得/削除と cache-aside な role 解決
 * - Role cache 読みは timeout 付き (timeout は miss 扱い、明示エラーは伝播)
 * - cache への書き込みは best-effort (失敗しても insert/read は成功させる)
 */
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserRow, UserStore};
use crate::services::auth::roles::Role;
use crate::services::cache::{CacheClient, CacheError};

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("user not found. id={0}")]
    NotFound(String),
    #[error("invalid birthday: {0}")]
    InvalidBirthday(String),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Input for `add_user`, already validated at the DTO layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub description: String,
    pub role: Role,
    pub birthday: String,
}

pub struct UserService {
    store: Arc<dyn UserStore>,
    cache: Arc<dyn CacheClient>,
    cache_read_timeout: Duration,
    role_ttl: Duration,
}

impl UserService {
    pub fn new(
        store: Arc<dyn UserStore>,
        cache: Arc<dyn CacheClient>,
        cache_read_timeout: Duration,
        role_ttl: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            cache_read_timeout,
            role_ttl,
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<UserRow, UserServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserServiceError::NotFound(id.to_string()))
    }

    /// Cache-aside role resolution.
    ///
    /// - cache hit: return the cached role (staleness up to TTL is accepted)
    /// - cache read timeout: treated as a miss, fall through to the store
    /// - cache read error: propagated; the store is NOT consulted
    /// - store miss: permissive GUEST fallback, never an error
    pub async fn get_role(&self, id: &str) -> Result<Role, UserServiceError> {
        match tokio::time::timeout(self.cache_read_timeout, self.cache.get_string(id)).await {
            Ok(Ok(Some(cached))) => return Ok(role_or_guest(&cached)),
            Ok(Ok(None)) => {}
            Ok(Err(err)) => {
                tracing::error!(
                    error = %err,
                    backend = self.cache.backend_name(),
                    "failed to get role from cache"
                );
                return Err(err.into());
            }
            Err(_) => {
                // Known risk: a cache outage that manifests as slowness is
                // indistinguishable from a miss here and lands on the store.
                tracing::warn!(%id, "role cache read timed out, falling back to user store");
            }
        }

        match self.store.find_by_id(id).await? {
            Some(user) => {
                tracing::info!(id = %user.id, "retrieved role from user store");
                self.write_role_back(&user.id, &user.role).await;
                Ok(role_or_guest(&user.role))
            }
            None => Ok(Role::Guest),
        }
    }

    /// Insert a new user, then populate the role cache.
    ///
    /// The two writes are not atomic; a failed cache write leaves the row in
    /// place and only loses the warm cache entry.
    pub async fn add_user(&self, input: NewUser) -> Result<UserRow, UserServiceError> {
        let birthday = parse_birthday(&input.birthday)?;
        let user = UserRow {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            role: input.role.as_str().to_string(),
            birthday,
            created_at: Utc::now(),
        };

        self.store.insert(&user).await?;
        self.write_role_back(&user.id, &user.role).await;
        Ok(user)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, UserServiceError> {
        let deleted = self.store.delete(id).await?;
        if deleted && let Err(err) = self.cache.del(id).await {
            tracing::warn!(error = %err, %id, "failed to evict role from cache");
        }
        Ok(deleted)
    }

    async fn write_role_back(&self, id: &str, role: &str) {
        if let Err(err) = self.cache.set_with_ttl(id, role, self.role_ttl).await {
            tracing::warn!(error = %err, %id, "failed to write role to cache");
        }
    }
}

fn role_or_guest(value: &str) -> Role {
    Role::lookup(value).unwrap_or_else(|| {
        tracing::warn!(%value, "unknown role value, falling back to GUEST");
        Role::Guest
    })
}

/// Parse `YYYY-M-D` into a date. Month/day widths are lenient; the values
/// themselves must form a real calendar date.
fn parse_birthday(value: &str) -> Result<NaiveDate, UserServiceError> {
    let invalid = || UserServiceError::InvalidBirthday(value.to_string());

    let mut parts = value.splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let (Ok(y), Ok(m), Ok(d)) = (y.parse::<i32>(), m.parse::<u32>(), d.parse::<u32>()) else {
        return Err(invalid());
    };

    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
}
