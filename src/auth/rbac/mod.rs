//! Department and role based access control
//!
//! Answers whether a navigation path is shown to a user and whether an HTTP
//! method may be used on a feature. Evaluation is pure and never fails; a
//! missing table entry is a denial.

mod helpers;
mod loader;
mod permissions;
mod roles;
mod system;
mod types;

pub use system::{AccessPolicy, DepartmentRules};
pub use types::{AccessDecision, Department, DepartmentScope, HttpMethod, MethodGrant, Role};
