//! Role-oriented queries over the policy tables

use std::collections::{BTreeSet, HashSet};

use super::helpers::{known_department, known_role};
use super::system::AccessPolicy;
use super::types::{Department, HttpMethod, Role};

impl AccessPolicy {
    /// Every method the role may use on a feature, in a stable order
    pub fn allowed_methods(
        &self,
        feature: &str,
        department: Option<Department>,
        role: Option<Role>,
    ) -> BTreeSet<HttpMethod> {
        let (Some(department), Some(role)) = (known_department(department), known_role(role))
        else {
            return BTreeSet::new();
        };

        self.grants(feature, department)
            .unwrap_or_default()
            .iter()
            .filter(|grant| grant.roles.contains(&role))
            .flat_map(|grant| grant.methods.iter().copied())
            .collect()
    }

    /// Paths from the visibility table that the caller may see, sorted
    pub fn visible_paths(&self, department: Option<Department>, role: Option<Role>) -> Vec<&str> {
        self.list_paths()
            .into_iter()
            .filter(|path| self.can_access_feature(path, department, role))
            .collect()
    }

    /// Roles that may see a path within a department
    ///
    /// `None` when the path has no role gate at all.
    pub fn roles_for_path(&self, path: &str, department: Department) -> Option<HashSet<Role>> {
        self.feature_roles
            .get(path)
            .map(|by_department| by_department.get(&department).cloned().unwrap_or_default())
    }
}
