use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User joined with the name of its role.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithRole {
    #[sqlx(flatten)]
    pub user: User,
    pub role_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct BusinessElement {
    pub id: i64,
    pub name: String,
}

/// Permission flags granted to one role on one business element.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct AccessRule {
    pub id: i64,
    pub role_id: i64,
    pub business_element_id: i64,
    pub read_permission: bool,
    pub read_all_permission: bool,
    pub create_permission: bool,
    pub update_permission: bool,
    pub update_all_permission: bool,
    pub delete_permission: bool,
    pub delete_all_permission: bool,
}

/// Data structure for creating a new user.
///
/// Password should be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: Option<String>,
    pub last_name: Option<String>,
    pub role_id: i64,
    pub is_active: bool,
}

impl UserForCreate {
    /// Create an active user with the default display name.
    pub fn new(email: String, password_hash: String, role_id: i64) -> Self {
        Self {
            email,
            password_hash,
            name: DEFAULT_USER_NAME.to_string(),
            surname: None,
            last_name: None,
            role_id,
            is_active: true,
        }
    }
}

/// Display name given to users who do not provide one.
pub const DEFAULT_USER_NAME: &str = "User";

/// Data structure for updating an existing user.
///
/// All fields are optional - only provided fields will be updated.
#[derive(Debug, Clone, Default)]
pub struct UserForUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub last_name: Option<String>,
    pub role_id: Option<i64>,
}

impl UserForUpdate {
    /// Create a new empty `UserForUpdate` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the role.
    pub fn role_id(mut self, role_id: i64) -> Self {
        self.role_id = Some(role_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.last_name.is_none()
            && self.role_id.is_none()
    }
}

/// The seven permission flags of an access rule, without identity columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionFlags {
    pub read_permission: bool,
    pub read_all_permission: bool,
    pub create_permission: bool,
    pub update_permission: bool,
    pub update_all_permission: bool,
    pub delete_permission: bool,
    pub delete_all_permission: bool,
}

impl PermissionFlags {
    /// Every flag set.
    pub fn all() -> Self {
        Self {
            read_permission: true,
            read_all_permission: true,
            create_permission: true,
            update_permission: true,
            update_all_permission: true,
            delete_permission: true,
            delete_all_permission: true,
        }
    }

    /// No flag set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Manager access to user records: read everything.
    pub fn manager() -> Self {
        Self {
            read_permission: true,
            read_all_permission: true,
            ..Self::default()
        }
    }

    /// Regular user access to user records: read own record.
    pub fn user() -> Self {
        Self {
            read_permission: true,
            ..Self::default()
        }
    }
}

/// Partial update of an access rule; `None` leaves a flag untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessRuleForUpdate {
    pub read_permission: Option<bool>,
    pub read_all_permission: Option<bool>,
    pub create_permission: Option<bool>,
    pub update_permission: Option<bool>,
    pub update_all_permission: Option<bool>,
    pub delete_permission: Option<bool>,
    pub delete_all_permission: Option<bool>,
}

impl AccessRuleForUpdate {
    /// Apply the provided flags on top of `rule`.
    pub fn apply_to(&self, rule: &mut AccessRule) {
        if let Some(v) = self.read_permission {
            rule.read_permission = v;
        }
        if let Some(v) = self.read_all_permission {
            rule.read_all_permission = v;
        }
        if let Some(v) = self.create_permission {
            rule.create_permission = v;
        }
        if let Some(v) = self.update_permission {
            rule.update_permission = v;
        }
        if let Some(v) = self.update_all_permission {
            rule.update_all_permission = v;
        }
        if let Some(v) = self.delete_permission {
            rule.delete_permission = v;
        }
        if let Some(v) = self.delete_all_permission {
            rule.delete_all_permission = v;
        }
    }
}
