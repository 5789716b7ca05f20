//! # User Repository
//!
//! Provides database access layer for user-related operations.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_memory_pool, run_migrations, RoleRepository, UserRepository};
//! # use lib_core::model::store::models::UserForCreate;
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_memory_pool().await?;
//! run_migrations(&pool).await?;
//!
//! let role = RoleRepository::get_or_create(&pool, "user").await?;
//! let user = UserRepository::create_with(
//!     &pool,
//!     UserForCreate::new("alice@example.com".to_string(), "hashed".to_string(), role.id),
//! ).await?;
//!
//! let found = UserRepository::find_by_email(&pool, "alice@example.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate, UserForUpdate, UserWithRole};
use super::DbPool;
use sqlx::query_as;

const SELECT_WITH_ROLE: &str = "SELECT users.*, roles.name AS role_name \
     FROM users JOIN roles ON roles.id = users.role_id";

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their email address.
    ///
    /// Emails are compared exactly as stored.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by primary key.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by primary key together with its role name.
    pub async fn find_with_role(pool: &DbPool, id: i64) -> Result<Option<UserWithRole>, sqlx::Error> {
        query_as::<_, UserWithRole>(&format!("{SELECT_WITH_ROLE} WHERE users.id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All users with their role names, ordered by id.
    pub async fn list_with_role(pool: &DbPool) -> Result<Vec<UserWithRole>, sqlx::Error> {
        query_as::<_, UserWithRole>(&format!("{SELECT_WITH_ROLE} ORDER BY users.id"))
            .fetch_all(pool)
            .await
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Email already exists (UNIQUE constraint violation)
    /// - `role_id` does not reference a role (FOREIGN KEY violation)
    /// - Database connection fails
    pub async fn create_with(pool: &DbPool, user_data: UserForCreate) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, name, surname, last_name, is_active, role_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user_data.email)
        .bind(&user_data.password_hash)
        .bind(&user_data.name)
        .bind(&user_data.surname)
        .bind(&user_data.last_name)
        .bind(user_data.is_active)
        .bind(user_data.role_id)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Update an existing user using `UserForUpdate`.
    ///
    /// Only fields that are `Some` in `user_data` will be updated.
    /// Returns `Ok(None)` when no user has this id.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        user_data: UserForUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        if user_data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let mut updates = Vec::new();

        if user_data.name.is_some() {
            updates.push("name = ?");
        }
        if user_data.surname.is_some() {
            updates.push("surname = ?");
        }
        if user_data.last_name.is_some() {
            updates.push("last_name = ?");
        }
        if user_data.role_id.is_some() {
            updates.push("role_id = ?");
        }

        updates.push("updated_at = CURRENT_TIMESTAMP");
        let query_str = format!("UPDATE users SET {} WHERE id = ?", updates.join(", "));

        let mut query = sqlx::query(&query_str);

        if let Some(ref name) = user_data.name {
            query = query.bind(name);
        }
        if let Some(ref surname) = user_data.surname {
            query = query.bind(surname);
        }
        if let Some(ref last_name) = user_data.last_name {
            query = query.bind(last_name);
        }
        if let Some(role_id) = user_data.role_id {
            query = query.bind(role_id);
        }

        query.bind(id).execute(pool).await?;

        Self::find_by_id(pool, id).await
    }

    /// Soft-delete a user: the record stays, but the account can no longer
    /// authenticate. Returns whether a row was changed.
    pub async fn deactivate(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_active = 0, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND is_active = 1",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::{create_memory_pool, run_migrations, RoleRepository};
    use lib_auth::hash_password;

    async fn setup_test_db() -> (DbPool, i64) {
        let pool = create_memory_pool().await.expect("Failed to create test database");
        run_migrations(&pool).await.expect("Failed to run migrations");
        let role = RoleRepository::get_or_create(&pool, "user").await.unwrap();
        (pool, role.id)
    }

    fn new_user(email: &str, role_id: i64) -> UserForCreate {
        let password_hash = hash_password("TestPassword123!").unwrap();
        UserForCreate::new(email.to_string(), password_hash, role_id)
    }

    #[tokio::test]
    async fn test_create_user() {
        let (pool, role_id) = setup_test_db().await;

        let user = UserRepository::create_with(&pool, new_user("test@example.com", role_id))
            .await
            .unwrap();

        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name, "User");
        assert!(user.is_active);
        assert_eq!(user.role_id, role_id);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let (pool, role_id) = setup_test_db().await;

        UserRepository::create_with(&pool, new_user("test@example.com", role_id))
            .await
            .unwrap();
        let result = UserRepository::create_with(&pool, new_user("test@example.com", role_id)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_user_unknown_role() {
        let (pool, _) = setup_test_db().await;

        let result = UserRepository::create_with(&pool, new_user("test@example.com", 9999)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_find_by_email_not_found() {
        let (pool, _) = setup_test_db().await;

        let found = UserRepository::find_by_email(&pool, "nonexistent@example.com")
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_with_role() {
        let (pool, role_id) = setup_test_db().await;
        let user = UserRepository::create_with(&pool, new_user("test@example.com", role_id))
            .await
            .unwrap();

        let found = UserRepository::find_with_role(&pool, user.id)
            .await
            .unwrap()
            .expect("User should exist after creation");

        assert_eq!(found.user.email, "test@example.com");
        assert_eq!(found.role_name, "user");
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let (pool, role_id) = setup_test_db().await;
        let mut data = new_user("test@example.com", role_id);
        data.surname = Some("Testovich".to_string());
        let user = UserRepository::create_with(&pool, data).await.unwrap();

        let updated = UserRepository::update(&pool, user.id, UserForUpdate::new().name("Test".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Test");
        assert_eq!(updated.surname.as_deref(), Some("Testovich"));
    }

    #[tokio::test]
    async fn test_update_nonexistent_user() {
        let (pool, _) = setup_test_db().await;

        let updated = UserRepository::update(&pool, 99999, UserForUpdate::new().name("X".to_string()))
            .await
            .unwrap();

        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_deactivate() {
        let (pool, role_id) = setup_test_db().await;
        let user = UserRepository::create_with(&pool, new_user("test@example.com", role_id))
            .await
            .unwrap();

        assert!(UserRepository::deactivate(&pool, user.id).await.unwrap());
        // Second call changes nothing
        assert!(!UserRepository::deactivate(&pool, user.id).await.unwrap());

        let found = UserRepository::find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert!(!found.is_active);
    }

    #[tokio::test]
    async fn test_list_with_role_ordered() {
        let (pool, role_id) = setup_test_db().await;
        for email in ["a@example.com", "b@example.com", "c@example.com"] {
            UserRepository::create_with(&pool, new_user(email, role_id))
                .await
                .unwrap();
        }

        let users = UserRepository::list_with_role(&pool).await.unwrap();
        let emails: Vec<_> = users.iter().map(|u| u.user.email.as_str()).collect();
        assert_eq!(emails, ["a@example.com", "b@example.com", "c@example.com"]);
    }
}
