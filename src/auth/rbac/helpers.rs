//! Helpers shared by the policy queries

use super::types::{Department, Role};

/// Drop values the tables can never grant anything to
pub(super) fn known_department(department: Option<Department>) -> Option<Department> {
    department.filter(|d| *d != Department::Unknown)
}

pub(super) fn known_role(role: Option<Role>) -> Option<Role> {
    role.filter(|r| *r != Role::Unknown)
}

pub(super) fn describe<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "<none>".to_string(), |v| v.to_string())
}
