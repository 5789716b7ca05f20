//! # Model
//!
//! Persistence ([`store`]) and the access-control policy ([`rbac`]).

pub mod rbac;
pub mod store;
