//! # Access Repository
//!
//! Business elements and the per-role access rules attached to them.

use super::models::{AccessRule, AccessRuleForUpdate, BusinessElement, PermissionFlags, Role};
use super::DbPool;
use crate::model::rbac::ROLE_ADMIN;
use sqlx::query_as;
use tracing::debug;

const RULE_COLUMNS: &str = "id, role_id, business_element_id, read_permission, read_all_permission, \
     create_permission, update_permission, update_all_permission, delete_permission, delete_all_permission";

pub struct AccessRepository;

impl AccessRepository {
    // region: --- Business elements

    pub async fn find_element_by_name(pool: &DbPool, name: &str) -> Result<Option<BusinessElement>, sqlx::Error> {
        query_as::<_, BusinessElement>("SELECT id, name FROM business_elements WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_elements(pool: &DbPool) -> Result<Vec<BusinessElement>, sqlx::Error> {
        query_as::<_, BusinessElement>("SELECT id, name FROM business_elements ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Return the element named `name`, inserting it first if absent.
    /// No access rules are created.
    pub async fn get_or_create_element(pool: &DbPool, name: &str) -> Result<BusinessElement, sqlx::Error> {
        sqlx::query("INSERT INTO business_elements (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;

        query_as::<_, BusinessElement>("SELECT id, name FROM business_elements WHERE name = ?")
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Insert a new element and one access rule per existing role, in a
    /// single transaction. The `admin` role receives every permission; every
    /// other role receives none.
    ///
    /// Fails with a UNIQUE violation when the name is taken.
    pub async fn create_element_with_rules(pool: &DbPool, name: &str) -> Result<BusinessElement, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let element = query_as::<_, BusinessElement>(
            "INSERT INTO business_elements (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        let roles = query_as::<_, Role>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;

        for role in &roles {
            let flags = if role.name == ROLE_ADMIN {
                PermissionFlags::all()
            } else {
                PermissionFlags::none()
            };
            insert_rule(&mut *tx, role.id, element.id, flags).await?;
        }

        tx.commit().await?;
        debug!("Created element '{}' with {} access rules", element.name, roles.len());

        Ok(element)
    }

    // endregion: --- Business elements

    // region: --- Access rules

    pub async fn find_rule(
        pool: &DbPool,
        role_id: i64,
        element_id: i64,
    ) -> Result<Option<AccessRule>, sqlx::Error> {
        query_as::<_, AccessRule>(&format!(
            "SELECT {RULE_COLUMNS} FROM access_rules WHERE role_id = ? AND business_element_id = ?"
        ))
        .bind(role_id)
        .bind(element_id)
        .fetch_optional(pool)
        .await
    }

    /// Rule for `role_id` on the element named `element_name`.
    pub async fn find_rule_by_element_name(
        pool: &DbPool,
        role_id: i64,
        element_name: &str,
    ) -> Result<Option<AccessRule>, sqlx::Error> {
        query_as::<_, AccessRule>(
            "SELECT r.id, r.role_id, r.business_element_id, r.read_permission, r.read_all_permission, \
             r.create_permission, r.update_permission, r.update_all_permission, r.delete_permission, \
             r.delete_all_permission \
             FROM access_rules r JOIN business_elements e ON e.id = r.business_element_id \
             WHERE r.role_id = ? AND e.name = ?",
        )
        .bind(role_id)
        .bind(element_name)
        .fetch_optional(pool)
        .await
    }

    pub async fn list_rules(pool: &DbPool) -> Result<Vec<AccessRule>, sqlx::Error> {
        query_as::<_, AccessRule>(&format!(
            "SELECT {RULE_COLUMNS} FROM access_rules ORDER BY business_element_id, role_id"
        ))
        .fetch_all(pool)
        .await
    }

    /// Insert a rule unless one already exists for the pair. Existing rules
    /// are never overwritten. Returns whether a row was inserted.
    pub async fn create_rule_if_missing(
        pool: &DbPool,
        role_id: i64,
        element_id: i64,
        flags: PermissionFlags,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let inserted = insert_rule(&mut *conn, role_id, element_id, flags).await?;
        Ok(inserted)
    }

    /// Apply a partial flag update. Returns `Ok(None)` when no rule exists
    /// for the pair.
    pub async fn update_rule(
        pool: &DbPool,
        role_id: i64,
        element_id: i64,
        update: &AccessRuleForUpdate,
    ) -> Result<Option<AccessRule>, sqlx::Error> {
        let Some(mut rule) = Self::find_rule(pool, role_id, element_id).await? else {
            return Ok(None);
        };

        update.apply_to(&mut rule);

        sqlx::query(
            "UPDATE access_rules SET read_permission = ?, read_all_permission = ?, create_permission = ?, \
             update_permission = ?, update_all_permission = ?, delete_permission = ?, delete_all_permission = ? \
             WHERE id = ?",
        )
        .bind(rule.read_permission)
        .bind(rule.read_all_permission)
        .bind(rule.create_permission)
        .bind(rule.update_permission)
        .bind(rule.update_all_permission)
        .bind(rule.delete_permission)
        .bind(rule.delete_all_permission)
        .bind(rule.id)
        .execute(pool)
        .await?;

        Ok(Some(rule))
    }

    // endregion: --- Access rules
}

async fn insert_rule(
    conn: &mut sqlx::SqliteConnection,
    role_id: i64,
    element_id: i64,
    flags: PermissionFlags,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO access_rules (role_id, business_element_id, read_permission, read_all_permission, \
         create_permission, update_permission, update_all_permission, delete_permission, delete_all_permission) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(role_id, business_element_id) DO NOTHING",
    )
    .bind(role_id)
    .bind(element_id)
    .bind(flags.read_permission)
    .bind(flags.read_all_permission)
    .bind(flags.create_permission)
    .bind(flags.update_permission)
    .bind(flags.update_all_permission)
    .bind(flags.delete_permission)
    .bind(flags.delete_all_permission)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::{create_memory_pool, run_migrations, RoleRepository};

    async fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        for role in ["admin", "user", "manager"] {
            RoleRepository::get_or_create(&pool, role).await.unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn test_create_element_grants_admin_only() {
        let pool = setup_test_db().await;

        let element = AccessRepository::create_element_with_rules(&pool, "orders").await.unwrap();
        assert_eq!(element.name, "orders");

        let admin = RoleRepository::find_by_name(&pool, "admin").await.unwrap().unwrap();
        let user = RoleRepository::find_by_name(&pool, "user").await.unwrap().unwrap();

        let admin_rule = AccessRepository::find_rule(&pool, admin.id, element.id).await.unwrap().unwrap();
        let user_rule = AccessRepository::find_rule(&pool, user.id, element.id).await.unwrap().unwrap();

        assert!(admin_rule.read_all_permission && admin_rule.delete_all_permission);
        assert!(!user_rule.read_permission && !user_rule.create_permission);
        assert_eq!(AccessRepository::list_rules(&pool).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_element_leaves_no_partial_rules() {
        let pool = setup_test_db().await;

        AccessRepository::create_element_with_rules(&pool, "orders").await.unwrap();
        assert!(AccessRepository::create_element_with_rules(&pool, "orders").await.is_err());

        assert_eq!(AccessRepository::list_elements(&pool).await.unwrap().len(), 1);
        assert_eq!(AccessRepository::list_rules(&pool).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_rule_if_missing_keeps_existing() {
        let pool = setup_test_db().await;
        let user = RoleRepository::find_by_name(&pool, "user").await.unwrap().unwrap();
        let element = AccessRepository::get_or_create_element(&pool, "users").await.unwrap();

        assert!(AccessRepository::create_rule_if_missing(&pool, user.id, element.id, PermissionFlags::user())
            .await
            .unwrap());
        assert!(!AccessRepository::create_rule_if_missing(&pool, user.id, element.id, PermissionFlags::all())
            .await
            .unwrap());

        let rule = AccessRepository::find_rule_by_element_name(&pool, user.id, "users")
            .await
            .unwrap()
            .unwrap();
        assert!(rule.read_permission);
        assert!(!rule.read_all_permission);
    }

    #[tokio::test]
    async fn test_update_rule_partial() {
        let pool = setup_test_db().await;
        let user = RoleRepository::find_by_name(&pool, "user").await.unwrap().unwrap();
        let element = AccessRepository::get_or_create_element(&pool, "users").await.unwrap();
        AccessRepository::create_rule_if_missing(&pool, user.id, element.id, PermissionFlags::user())
            .await
            .unwrap();

        let update = AccessRuleForUpdate {
            update_permission: Some(true),
            ..Default::default()
        };
        let rule = AccessRepository::update_rule(&pool, user.id, element.id, &update)
            .await
            .unwrap()
            .unwrap();

        assert!(rule.update_permission);
        assert!(rule.read_permission);

        let stored = AccessRepository::find_rule(&pool, user.id, element.id).await.unwrap().unwrap();
        assert_eq!(stored, rule);
    }

    #[tokio::test]
    async fn test_update_missing_rule() {
        let pool = setup_test_db().await;
        let result = AccessRepository::update_rule(&pool, 1, 999, &AccessRuleForUpdate::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
