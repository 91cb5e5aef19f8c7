/*
 * Responsibility
 * - Handler から見える「認証済み principal」の型
 * - pre-auth middleware が解決して request extensions に格納し、
 *   handler は extractor 経由でこの型だけを受け取る
 *
 * Notes
 * - 一度作られたら変更しない (request の残りの寿命で同じ値が見える)
 */
use crate::services::auth::roles::Role;

#[derive(Debug, Clone)]
pub struct Principal {
    /// Pseudo-authenticated identity, `"id@" + token`.
    pub id: String,
    /// Role resolved through the cache-aside lookup at authentication time.
    /// Staleness up to the cache TTL is accepted.
    pub role: Role,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}
