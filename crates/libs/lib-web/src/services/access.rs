//! # Access Service
//!
//! Evaluates a role's access rule for an action and manages business
//! elements and their rules.

use lib_core::dto::{AccessRuleUpdate, BusinessElementCreate};
use lib_core::model::rbac::{is_allowed, Action};
use lib_core::model::store::models::{AccessRule, BusinessElement};
use lib_core::model::store::AccessRepository;
use lib_core::{AppError, DbPool};
use tracing::{debug, info, warn};

pub struct AccessService {
    db: DbPool,
}

impl AccessService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Fail with `Forbidden` unless `role_id`'s rule on `element` grants
    /// `action`. `is_owner` says whether the target belongs to the caller.
    pub async fn check(&self, role_id: i64, element: &str, action: Action, is_owner: bool) -> Result<(), AppError> {
        let rule = AccessRepository::find_rule_by_element_name(&self.db, role_id, element).await?;

        if !is_allowed(rule.as_ref(), action, is_owner) {
            warn!("[ACCESS] Role {} denied {} on '{}' (owner: {})", role_id, action, element, is_owner);
            return Err(AppError::Forbidden("Not enough permissions".to_string()));
        }

        debug!("[ACCESS] Role {} granted {} on '{}'", role_id, action, element);
        Ok(())
    }

    /// Create a business element together with a rule for every role.
    pub async fn create_element(&self, req: BusinessElementCreate) -> Result<BusinessElement, AppError> {
        req.validate()?;

        if AccessRepository::find_element_by_name(&self.db, &req.name).await?.is_some() {
            return Err(element_exists(&req.name));
        }

        let element = AccessRepository::create_element_with_rules(&self.db, &req.name)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => element_exists(&req.name),
                e => AppError::from(e),
            })?;

        info!("[ELEMENTS] Created business element '{}' (id: {})", element.name, element.id);
        Ok(element)
    }

    pub async fn list_elements(&self) -> Result<Vec<BusinessElement>, AppError> {
        Ok(AccessRepository::list_elements(&self.db).await?)
    }

    pub async fn list_rules(&self) -> Result<Vec<AccessRule>, AppError> {
        Ok(AccessRepository::list_rules(&self.db).await?)
    }

    pub async fn update_rule(
        &self,
        role_id: i64,
        element_id: i64,
        update: &AccessRuleUpdate,
    ) -> Result<AccessRule, AppError> {
        let rule = AccessRepository::update_rule(&self.db, role_id, element_id, update)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Access rule not found. Check the role and element ids".to_string())
            })?;

        info!("[ADMIN] Updated access rule for role {} on element {}", role_id, element_id);
        Ok(rule)
    }
}

fn element_exists(name: &str) -> AppError {
    AppError::InvalidInput(format!("Element {} already exists", name))
}
