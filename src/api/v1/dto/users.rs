/*
 * Responsibility
 * - Users の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::user_repo::UserRow;
use crate::services::auth::roles::Role;
use crate::services::users::NewUser;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub role: String,
    pub birthday: String,
}

impl CreateUserRequest {
    /// Shape checks only; the calendar validity of `birthday` is checked by
    /// the service when it parses `YYYY-M-D`.
    pub fn validate(&self) -> Result<NewUser, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is required");
        }
        if name.chars().count() > 30 {
            return Err("name must be <= 30 chars");
        }
        if self.description.chars().count() > 500 {
            return Err("description must be <= 500 chars");
        }
        let Some(role) = Role::lookup(&self.role) else {
            return Err("unknown role");
        };
        if self.birthday.trim().is_empty() {
            return Err("birthday is required");
        }

        Ok(NewUser {
            name: name.to_string(),
            description: self.description.clone(),
            role,
            birthday: self.birthday.trim().to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub role: String,
    pub birthday: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            role: row.role,
            birthday: row.birthday,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, role: &str, birthday: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            description: String::new(),
            role: role.to_string(),
            birthday: birthday.to_string(),
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        let input = request("horiga", "developer", "1999-1-5").validate().unwrap();
        assert_eq!(input.role, Role::Developer);
        assert_eq!(input.birthday, "1999-1-5");
    }

    #[test]
    fn rejects_blank_name_and_unknown_role() {
        assert!(request("   ", "GUEST", "1999-1-5").validate().is_err());
        assert!(request("horiga", "root", "1999-1-5").validate().is_err());
        assert!(request("horiga", "GUEST", "  ").validate().is_err());
    }

    #[test]
    fn name_limit_counts_characters_not_bytes() {
        // 30 multibyte characters are within the limit even though the
        // UTF-8 encoding is 90 bytes.
        let name = "あ".repeat(30);
        assert!(request(&name, "GUEST", "1999-1-5").validate().is_ok());

        let name = "あ".repeat(31);
        assert!(request(&name, "GUEST", "1999-1-5").validate().is_err());
    }
}
