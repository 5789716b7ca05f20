//! # Role Repository

use super::models::Role;
use super::DbPool;
use sqlx::query_as;

pub struct RoleRepository;

impl RoleRepository {
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Role>, sqlx::Error> {
        query_as::<_, Role>("SELECT id, name FROM roles WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_name(pool: &DbPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        query_as::<_, Role>("SELECT id, name FROM roles WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &DbPool) -> Result<Vec<Role>, sqlx::Error> {
        query_as::<_, Role>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Return the role named `name`, inserting it first if absent.
    pub async fn get_or_create(pool: &DbPool, name: &str) -> Result<Role, sqlx::Error> {
        sqlx::query("INSERT INTO roles (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;

        query_as::<_, Role>("SELECT id, name FROM roles WHERE name = ?")
            .bind(name)
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::{create_memory_pool, run_migrations};

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let first = RoleRepository::get_or_create(&pool, "manager").await.unwrap();
        let second = RoleRepository::get_or_create(&pool, "manager").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(RoleRepository::list(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_role() {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        assert!(RoleRepository::find_by_id(&pool, 42).await.unwrap().is_none());
        assert!(RoleRepository::find_by_name(&pool, "ghost").await.unwrap().is_none());
    }
}
