//! # Access Control Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use lib_utils::validate_not_empty;

pub use crate::model::store::models::AccessRuleForUpdate as AccessRuleUpdate;
pub use crate::model::store::models::{AccessRule as AccessRuleRead, BusinessElement as BusinessElementRead};

/// Body of `POST /business-elements/elements`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusinessElementCreate {
    pub name: String,
}

impl BusinessElementCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_not_empty(&self.name, "name").map_err(AppError::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_element_name_rejected() {
        let request = BusinessElementCreate { name: "   ".to_string() };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rule_update_rejects_unknown_flag() {
        let result: Result<AccessRuleUpdate, _> = serde_json::from_str(r#"{"read_permissions":true}"#);
        assert!(result.is_err());

        let update: AccessRuleUpdate = serde_json::from_str(r#"{"read_all_permission":true}"#).unwrap();
        assert_eq!(update.read_all_permission, Some(true));
        assert!(update.read_permission.is_none());
    }
}
