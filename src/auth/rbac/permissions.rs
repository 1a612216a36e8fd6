//! Permission checking methods

use crate::auth::profile::Profile;

use super::helpers::{describe, known_department, known_role};
use super::system::AccessPolicy;
use super::types::{AccessDecision, Department, HttpMethod, Role};

impl AccessPolicy {
    /// Whether navigation for `path` should be shown
    ///
    /// The department gate passes when the path has no entry or a
    /// department-agnostic one. The role gate applies only to paths listed in
    /// the role table; for those, a department without an entry is denied.
    pub fn can_access_feature(
        &self,
        path: &str,
        department: Option<Department>,
        role: Option<Role>,
    ) -> bool {
        self.check_feature_detailed(path, department, role).granted
    }

    /// Whether `method` may be used on `feature`
    ///
    /// True iff some grant listed for the caller's department contains both
    /// the role and the method. There is no inheritance between departments.
    pub fn can_use_method(
        &self,
        feature: &str,
        method: HttpMethod,
        department: Option<Department>,
        role: Option<Role>,
    ) -> bool {
        self.check_method_detailed(feature, method, department, role)
            .granted
    }

    /// Detailed navigation check
    pub fn check_feature_detailed(
        &self,
        path: &str,
        department: Option<Department>,
        role: Option<Role>,
    ) -> AccessDecision {
        let department = known_department(department);
        let role = known_role(role);

        if let Some(scope) = self.feature_visibility.get(path) {
            if !scope.admits(department) {
                return AccessDecision::denied(format!(
                    "Department {} cannot see {}",
                    describe(department),
                    path
                ));
            }
        }

        let Some(roles_by_department) = self.feature_roles.get(path) else {
            return AccessDecision::granted();
        };

        let Some(roles) = department.and_then(|d| roles_by_department.get(&d)) else {
            return AccessDecision::denied(format!(
                "No role entry for department {} on {}",
                describe(department),
                path
            ));
        };

        if role.is_some_and(|r| roles.contains(&r)) {
            AccessDecision::granted()
        } else {
            AccessDecision::denied(format!(
                "Role {} cannot see {} in {}",
                describe(role),
                path,
                describe(department)
            ))
        }
    }

    /// Detailed method check
    pub fn check_method_detailed(
        &self,
        feature: &str,
        method: HttpMethod,
        department: Option<Department>,
        role: Option<Role>,
    ) -> AccessDecision {
        let Some(by_department) = self.access_rules.get(feature) else {
            return AccessDecision::denied(format!("No access rules for feature {}", feature));
        };

        let Some(department) = known_department(department) else {
            return AccessDecision::denied("No department");
        };

        let grants = match by_department.get(&department) {
            Some(grants) if !grants.is_empty() => grants,
            _ => {
                return AccessDecision::denied(format!(
                    "Department {} has no access to {}",
                    department, feature
                ));
            }
        };

        let role = known_role(role);
        let permitted = role.is_some_and(|r| grants.iter().any(|grant| grant.permits(r, method)));

        if permitted {
            AccessDecision::granted()
        } else {
            AccessDecision::denied(format!(
                "Role {} may not {} {} in {}",
                describe(role),
                method,
                feature,
                department
            ))
        }
    }

    /// Navigation check for a logged-in profile
    pub fn profile_can_access(&self, profile: &Profile, path: &str) -> bool {
        self.can_access_feature(path, profile.department, profile.role)
    }

    /// Method check for a logged-in profile
    pub fn profile_can_use(&self, profile: &Profile, feature: &str, method: HttpMethod) -> bool {
        self.can_use_method(feature, method, profile.department, profile.role)
    }
}
