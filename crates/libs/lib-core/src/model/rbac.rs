//! # Access Policy
//!
//! Evaluates an [`AccessRule`] for an action. Rules pair a plain flag, which
//! covers objects the caller owns, with an `*_all` flag covering every object.
//! Creation has no ownership dimension.

use std::fmt;

use super::store::models::AccessRule;

/// Names of the built-in roles.
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
pub const ROLE_MANAGER: &str = "manager";

/// Name of the built-in element guarding user records.
pub const ELEMENT_USERS: &str = "users";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => write!(f, "read"),
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

impl AccessRule {
    /// Whether this rule grants `action`. `is_owner` says whether the target
    /// object belongs to the caller.
    pub fn allows(&self, action: Action, is_owner: bool) -> bool {
        match action {
            Action::Read => self.read_all_permission || (self.read_permission && is_owner),
            Action::Create => self.create_permission,
            Action::Update => self.update_all_permission || (self.update_permission && is_owner),
            Action::Delete => self.delete_all_permission || (self.delete_permission && is_owner),
        }
    }
}

/// Evaluate an optional rule; a missing rule denies everything.
pub fn is_allowed(rule: Option<&AccessRule>, action: Action, is_owner: bool) -> bool {
    rule.is_some_and(|rule| rule.allows(action, is_owner))
}
