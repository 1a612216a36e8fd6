//! Access policy tables and their built-in defaults

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::types::{Department, DepartmentScope, HttpMethod, MethodGrant, Role};

/// Per-department method grants for a single feature
///
/// An empty list is an explicit "no access" entry for that department.
pub type DepartmentRules = HashMap<Department, Vec<MethodGrant>>;

/// Static access-control tables for the admin dashboard
///
/// Three independent tables answer two questions: whether a navigation path
/// is shown (`feature_visibility` then `feature_roles`) and whether an HTTP
/// method may be used on a feature (`access_rules`). Tables are built once
/// and never mutated; every lookup treats a missing entry as a denial except
/// where noted on the query methods.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    /// Path -> departments allowed to see it
    pub(super) feature_visibility: HashMap<String, DepartmentScope>,
    /// Path -> department -> roles allowed to see it
    pub(super) feature_roles: HashMap<String, HashMap<Department, HashSet<Role>>>,
    /// Feature -> department -> method grants
    pub(super) access_rules: HashMap<String, DepartmentRules>,
}

const ALL_METHODS: [HttpMethod; 4] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Patch,
    HttpMethod::Delete,
];

impl AccessPolicy {
    /// Create the policy with the built-in dashboard tables
    pub fn new() -> Self {
        let mut policy = Self::empty();
        policy.initialize_default_visibility();
        policy.initialize_default_role_visibility();
        policy.initialize_default_rules();
        policy
    }

    /// A policy that denies every method and shows every path
    pub fn empty() -> Self {
        Self::default()
    }

    pub(super) fn initialize_default_visibility(&mut self) {
        use Department::*;
        use DepartmentScope::*;

        let entries = [
            ("/dashboard", All),
            ("/chats", All),
            ("/metrics", All),
            ("/settings", All),
            ("/manual-review", Only(QualityAssurance)),
            ("/projects", Only(QualityAssurance)),
            ("/integrations", Only(QualityAssurance)),
            ("/groups", AnyOf([QualityAssurance, Support].into())),
            ("/agents", AnyOf([QualityAssurance, Support].into())),
            ("/users", AnyOf([QualityAssurance, Support].into())),
        ];

        for (path, scope) in entries {
            self.feature_visibility.insert(path.to_string(), scope);
        }

        debug!(
            "Initialized {} feature visibility entries",
            self.feature_visibility.len()
        );
    }

    pub(super) fn initialize_default_role_visibility(&mut self) {
        use Department::*;
        use Role::*;

        let managers: HashSet<Role> = [Admin, Head, SuperAdmin].into();
        let administrators: HashSet<Role> = [Admin, SuperAdmin].into();

        let entries: [(&str, Vec<(Department, HashSet<Role>)>); 5] = [
            (
                "/projects",
                vec![(QualityAssurance, [Admin, TeamLead, Head].into())],
            ),
            (
                "/integrations",
                vec![(QualityAssurance, administrators.clone())],
            ),
            (
                "/manual-review",
                vec![(
                    QualityAssurance,
                    [Admin, TeamLead, Head, Supervisor, Agent].into(),
                )],
            ),
            (
                "/users",
                vec![
                    (QualityAssurance, managers.clone()),
                    (Support, managers),
                ],
            ),
            (
                "/settings",
                vec![
                    (QualityAssurance, administrators.clone()),
                    (Support, administrators),
                ],
            ),
        ];

        for (path, by_department) in entries {
            self.feature_roles
                .insert(path.to_string(), by_department.into_iter().collect());
        }

        debug!(
            "Initialized {} feature role entries",
            self.feature_roles.len()
        );
    }

    pub(super) fn initialize_default_rules(&mut self) {
        use Department::*;
        use HttpMethod::*;
        use Role::*;

        let read = [Get];

        let rules: Vec<(&str, Vec<(Department, Vec<MethodGrant>)>)> = vec![
            (
                "projects",
                vec![
                    (
                        QualityAssurance,
                        vec![MethodGrant::new([Admin, TeamLead, Head], ALL_METHODS)],
                    ),
                    (Support, vec![]),
                ],
            ),
            (
                "groupsQa",
                vec![
                    (
                        QualityAssurance,
                        vec![
                            MethodGrant::new([Admin, TeamLead, Head], ALL_METHODS),
                            MethodGrant::new([Agent], read),
                        ],
                    ),
                    (Support, vec![]),
                ],
            ),
            (
                "groupsSupport",
                vec![
                    (QualityAssurance, vec![]),
                    (
                        Support,
                        vec![
                            MethodGrant::new([Admin, Head, Supervisor], ALL_METHODS),
                            MethodGrant::new([Agent], read),
                        ],
                    ),
                ],
            ),
            (
                "chats",
                vec![
                    (
                        QualityAssurance,
                        vec![
                            MethodGrant::new([Admin, TeamLead, Head, Supervisor], [Get, Patch]),
                            MethodGrant::new([Agent], read),
                        ],
                    ),
                    (
                        Support,
                        vec![MethodGrant::new([Admin, Head, Supervisor, Agent], read)],
                    ),
                ],
            ),
            (
                "agents",
                vec![
                    (
                        QualityAssurance,
                        vec![
                            MethodGrant::new([Admin, Head], ALL_METHODS),
                            MethodGrant::new([TeamLead], [Get, Patch]),
                        ],
                    ),
                    (
                        Support,
                        vec![MethodGrant::new([Admin, Head], [Get, Post, Patch])],
                    ),
                ],
            ),
            (
                "users",
                vec![
                    (
                        QualityAssurance,
                        vec![
                            MethodGrant::new([Admin, SuperAdmin], ALL_METHODS),
                            MethodGrant::new([Head], read),
                        ],
                    ),
                    (
                        Support,
                        vec![
                            MethodGrant::new([Admin, SuperAdmin], ALL_METHODS),
                            MethodGrant::new([Head], read),
                        ],
                    ),
                ],
            ),
            (
                "manualReview",
                vec![
                    (
                        QualityAssurance,
                        vec![
                            MethodGrant::new([Admin, TeamLead, Head], [Get, Post, Patch]),
                            MethodGrant::new([Agent], [Get, Post]),
                        ],
                    ),
                    (Support, vec![]),
                ],
            ),
            (
                "metrics",
                vec![
                    (QualityAssurance, vec![MethodGrant::new(Role::ALL, read)]),
                    (Support, vec![MethodGrant::new(Role::ALL, read)]),
                ],
            ),
            (
                "integrations",
                vec![
                    (
                        QualityAssurance,
                        vec![MethodGrant::new([Admin, SuperAdmin], ALL_METHODS)],
                    ),
                    (Support, vec![]),
                ],
            ),
        ];

        for (feature, by_department) in rules {
            self.access_rules
                .insert(feature.to_string(), by_department.into_iter().collect());
        }

        debug!("Initialized {} access rules", self.access_rules.len());
    }

    /// Navigation paths with a department gate
    pub fn list_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.feature_visibility.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Features with method-level rules
    pub fn list_features(&self) -> Vec<&str> {
        let mut features: Vec<&str> = self.access_rules.keys().map(String::as_str).collect();
        features.sort_unstable();
        features
    }

    /// Department gate for a path, if one is declared
    pub fn department_scope(&self, path: &str) -> Option<&DepartmentScope> {
        self.feature_visibility.get(path)
    }

    /// Method grants for a feature within a department
    ///
    /// `None` when no entry exists, `Some(&[])` when the department is
    /// explicitly denied.
    pub fn grants(&self, feature: &str, department: Department) -> Option<&[MethodGrant]> {
        self.access_rules
            .get(feature)
            .and_then(|by_department| by_department.get(&department))
            .map(Vec::as_slice)
    }
}

