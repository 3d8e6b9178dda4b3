use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::query::Role;

/// Back-office login account. The role column holds one of the two literal
/// strings "Admin" / "CenterAdmin"; it is converted to the closed `Role`
/// enum at the session boundary and unknown values are rejected there.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub role: String,
    pub center_id: Option<i32>,
}

impl AdminUser {
    pub fn role(&self) -> Option<Role> {
        match self.role.as_str() {
            "Admin" => Some(Role::Admin),
            "CenterAdmin" => Some(Role::CenterAdmin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAdminUser {
    pub username: String,
    pub password: String,
    pub center_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPassword {
    #[serde(rename = "adminId")]
    pub admin_id: i32,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Row for the Admin-only center-admin listing, joined with centers.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminListRow {
    pub id: i32,
    pub username: String,
    pub center_name: Option<String>,
    pub center_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_strings_map_to_closed_enum() {
        let mut user = AdminUser {
            id: 1,
            username: "root".into(),
            password_digest: String::new(),
            role: "Admin".into(),
            center_id: None,
        };
        assert_eq!(user.role(), Some(Role::Admin));
        user.role = "CenterAdmin".into();
        assert_eq!(user.role(), Some(Role::CenterAdmin));
        user.role = "SuperUser".into();
        assert_eq!(user.role(), None);
    }
}
