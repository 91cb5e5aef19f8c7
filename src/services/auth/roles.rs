use std::fmt;

use serde::Serialize;

/// Authority set, as an explicit enum instead of a global registry.
///
/// Role values are stored as upper-case strings in both the cache and the
/// user store; `lookup` is the single place that maps them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Developer,
    Operator,
    Guest,
}

impl Role {
    pub const fn all() -> [Role; 4] {
        [Role::Admin, Role::Developer, Role::Operator, Role::Guest]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Developer => "DEVELOPER",
            Role::Operator => "OPERATOR",
            Role::Guest => "GUEST",
        }
    }

    /// Case-insensitive lookup. `None` for unknown role names.
    pub fn lookup(value: &str) -> Option<Role> {
        Role::all()
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Role::lookup("admin"), Some(Role::Admin));
        assert_eq!(Role::lookup("Operator"), Some(Role::Operator));
        assert_eq!(Role::lookup("GUEST"), Some(Role::Guest));
    }

    #[test]
    fn lookup_rejects_unknown_roles() {
        assert_eq!(Role::lookup("superuser"), None);
        assert_eq!(Role::lookup(""), None);
    }
}
