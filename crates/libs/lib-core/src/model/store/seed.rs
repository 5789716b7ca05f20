//! # Seed Data
//!
//! Populates the baseline roles, the administrator account, the `users`
//! element and its default access rules. Every step inserts only what is
//! missing, so running the seed against a populated database changes nothing.

use super::models::{PermissionFlags, UserForCreate};
use super::{AccessRepository, DbPool, RoleRepository, UserRepository};
use crate::model::rbac::{ELEMENT_USERS, ROLE_ADMIN, ROLE_MANAGER, ROLE_USER};
use crate::{Config, Result};
use lib_auth::hash_password;
use tracing::info;

/// Demo accounts created when `SEED_DEMO_USERS` is enabled: (email, password, role).
const DEMO_USERS: [(&str, &str, &str); 2] = [
    ("user@user.com", "user", ROLE_USER),
    ("manager@manager.com", "manager", ROLE_MANAGER),
];

/// Insert baseline data that is not already present.
pub async fn seed_database(pool: &DbPool, config: &Config) -> Result<()> {
    let admin = RoleRepository::get_or_create(pool, ROLE_ADMIN).await?;
    let user = RoleRepository::get_or_create(pool, ROLE_USER).await?;
    let manager = RoleRepository::get_or_create(pool, ROLE_MANAGER).await?;

    ensure_user(pool, &config.admin_email, &config.admin_password, admin.id).await?;

    let element = AccessRepository::get_or_create_element(pool, ELEMENT_USERS).await?;
    for (role_id, flags) in [
        (admin.id, PermissionFlags::all()),
        (manager.id, PermissionFlags::manager()),
        (user.id, PermissionFlags::user()),
    ] {
        AccessRepository::create_rule_if_missing(pool, role_id, element.id, flags).await?;
    }

    if config.seed_demo_users {
        for (email, password, role_name) in DEMO_USERS {
            let role = RoleRepository::get_or_create(pool, role_name).await?;
            ensure_user(pool, email, password, role.id).await?;
        }
    }

    Ok(())
}

async fn ensure_user(pool: &DbPool, email: &str, password: &str, role_id: i64) -> Result<()> {
    if UserRepository::find_by_email(pool, email).await?.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    UserRepository::create_with(pool, UserForCreate::new(email.to_string(), password_hash, role_id)).await?;
    info!("Seeded account {}", email);

    Ok(())
}
