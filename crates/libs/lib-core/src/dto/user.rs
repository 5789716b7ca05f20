//! # User Data Transfer Objects

use serde::{Deserialize, Serialize};

use super::auth::validate_credentials;
use crate::error::AppError;
use crate::model::store::models::{Role, UserForUpdate, UserWithRole};

/// Role as embedded in [`UserRead`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleRead {
    pub id: i64,
    pub name: String,
}

impl From<Role> for RoleRead {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}

/// Public view of a user. Never carries the password hash.
///
/// ```json
/// {
///   "id": 1,
///   "email": "admin@admin.com",
///   "name": "User",
///   "surname": null,
///   "last_name": null,
///   "is_active": true,
///   "role": { "id": 1, "name": "admin" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRead {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surname: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub role: RoleRead,
}

impl From<UserWithRole> for UserRead {
    fn from(row: UserWithRole) -> Self {
        let UserWithRole { user, role_name } = row;
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            surname: user.surname,
            last_name: user.last_name,
            is_active: user.is_active,
            role: RoleRead {
                id: user.role_id,
                name: role_name,
            },
        }
    }
}

/// Self-service profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<UserUpdateRequest> for UserForUpdate {
    fn from(req: UserUpdateRequest) -> Self {
        UserForUpdate {
            name: req.name,
            surname: req.surname,
            last_name: req.last_name,
            ..Default::default()
        }
    }
}

/// Account creation by an administrator.
///
/// Without `role_id` the account gets the `user` role. `is_active`
/// defaults to true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCreateRequest {
    pub email: String,
    pub password: String,
    pub repeat_password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl UserCreateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_credentials(&self.email, &self.password, &self.repeat_password)
    }
}

/// Role reassignment body for `PATCH /admin/users/{user_id}/role`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRoleUpdate {
    pub role_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::models::User;
    use chrono::Utc;

    #[test]
    fn test_user_read_from_row() {
        let now = Utc::now();
        let row = UserWithRole {
            user: User {
                id: 7,
                email: "bob@example.com".to_string(),
                password_hash: "$argon2id$...".to_string(),
                name: "Bob".to_string(),
                surname: None,
                last_name: Some("Builder".to_string()),
                is_active: true,
                role_id: 2,
                created_at: now,
                updated_at: now,
            },
            role_name: "user".to_string(),
        };

        let read = UserRead::from(row);
        assert_eq!(read.role, RoleRead { id: 2, name: "user".to_string() });

        let json = serde_json::to_string(&read).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_create_request_defaults() {
        let json = r#"{"email":"c@example.com","password":"pwd","repeat_password":"pwd"}"#;
        let request: UserCreateRequest = serde_json::from_str(json).unwrap();

        assert!(request.is_active);
        assert!(request.role_id.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_maps_to_partial_update() {
        let request: UserUpdateRequest = serde_json::from_str(r#"{"surname":"Smith"}"#).unwrap();
        let update = UserForUpdate::from(request);

        assert_eq!(update.surname.as_deref(), Some("Smith"));
        assert!(update.name.is_none());
        assert!(update.role_id.is_none());
    }
}
