//! # Business Element Handlers
//!
//! Admin-only management of the named resources that access rules guard.

use axum::extract::{Json, State};
use lib_core::dto::{BusinessElementCreate, BusinessElementRead};
use lib_core::{AppError, DbPool};
use tracing::instrument;

use crate::extract::JsonBody;
use crate::services::AccessService;

/// Create an element. Every existing role receives a rule for it: `admin`
/// with all permissions, every other role with none. Duplicate name → 400.
#[instrument(skip_all, fields(name = %req.name))]
pub async fn create_element(
    State(pool): State<DbPool>,
    JsonBody(req): JsonBody<BusinessElementCreate>,
) -> Result<Json<BusinessElementRead>, AppError> {
    let element = AccessService::new(pool).create_element(req).await?;
    Ok(Json(element))
}

pub async fn list_elements(State(pool): State<DbPool>) -> Result<Json<Vec<BusinessElementRead>>, AppError> {
    let elements = AccessService::new(pool).list_elements().await?;
    Ok(Json(elements))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_admin_creates_element() {
        let app = test_app().await;
        let token = login_token(&app, "admin@admin.com", "admin").await;

        let (status, body) = send(
            &app,
            json_request("POST", "/business-elements/elements", Some(&token), json!({ "name": "test_element" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "test_element");
        let element_id = body["id"].as_i64().unwrap();

        let (_, rules) = send(&app, empty_request("GET", "/admin/permissions", Some(&token))).await;
        let rules: Vec<_> = rules
            .as_array()
            .unwrap()
            .iter()
            .filter(|r| r["business_element_id"] == element_id)
            .cloned()
            .collect();
        assert_eq!(rules.len(), 3);
        for rule in rules {
            let is_admin = rule["role_id"] == 1;
            assert_eq!(rule["delete_all_permission"], is_admin);
            assert_eq!(rule["read_permission"], is_admin);
        }

        let (status, _) = send(
            &app,
            json_request("POST", "/business-elements/elements", Some(&token), json!({ "name": "test_element" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, elements) = send(&app, empty_request("GET", "/business-elements/elements", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(elements.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_user_cannot_create_element() {
        let app = test_app().await;
        let token = login_token(&app, "user@user.com", "user").await;

        let (status, _) = send(
            &app,
            json_request("POST", "/business-elements/elements", Some(&token), json!({ "name": "test_element" })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
