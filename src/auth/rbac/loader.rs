//! Loading access tables from YAML
//!
//! ```yaml
//! feature_visibility:
//!   /dashboard: null
//!   /integrations: quality_assurance
//!   /groups: [quality_assurance, support]
//! feature_roles:
//!   /projects:
//!     quality_assurance: [admin, team_lead, head]
//! access_rules:
//!   groupsQa:
//!     quality_assurance:
//!       - { roles: [admin, team_lead, head], methods: [GET, POST, PATCH, DELETE] }
//!       - { roles: [agent], methods: [GET] }
//!     support: null
//! ```
//!
//! A department under `access_rules` may hold `null`, a single grant or a list
//! of grants; all three are normalized to a list, `null` becoming an empty one.
//! Unknown department, role or method names are rejected at load time.

use crate::utils::error::{ClientError, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use super::system::{AccessPolicy, DepartmentRules};
use super::types::{Department, DepartmentScope, HttpMethod, MethodGrant, Role};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScope {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct RawGrant {
    roles: Vec<String>,
    methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRule {
    One(RawGrant),
    Many(Vec<RawGrant>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPolicy {
    #[serde(default)]
    feature_visibility: HashMap<String, Option<RawScope>>,
    #[serde(default)]
    feature_roles: HashMap<String, HashMap<String, Vec<String>>>,
    #[serde(default)]
    access_rules: HashMap<String, HashMap<String, Option<RawRule>>>,
}

fn parse_name<T>(value: &str, context: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e: String| ClientError::config(format!("{} ({})", e, context)))
}

fn parse_all<T>(values: &[String], context: &str) -> Result<HashSet<T>>
where
    T: FromStr<Err = String> + Eq + std::hash::Hash,
{
    values.iter().map(|v| parse_name(v, context)).collect()
}

impl AccessPolicy {
    /// Load tables from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading access policy from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ClientError::config(format!("Failed to read policy file: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// Parse tables from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let raw: RawPolicy = if content.trim().is_empty() {
            RawPolicy::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let mut policy = Self::empty();

        for (path, scope) in raw.feature_visibility {
            let scope = match scope {
                None => DepartmentScope::All,
                Some(RawScope::One(name)) => DepartmentScope::Only(parse_name(&name, &path)?),
                Some(RawScope::Many(names)) => DepartmentScope::AnyOf(parse_all(&names, &path)?),
            };
            policy.feature_visibility.insert(path, scope);
        }

        for (path, by_department) in raw.feature_roles {
            let mut parsed: HashMap<Department, HashSet<Role>> = HashMap::new();
            for (department, roles) in by_department {
                parsed.insert(parse_name(&department, &path)?, parse_all(&roles, &path)?);
            }
            policy.feature_roles.insert(path, parsed);
        }

        for (feature, by_department) in raw.access_rules {
            let mut parsed: DepartmentRules = HashMap::new();
            for (department, rule) in by_department {
                let grants = match rule {
                    None => Vec::new(),
                    Some(RawRule::One(grant)) => vec![grant],
                    Some(RawRule::Many(grants)) => grants,
                };
                let grants = grants
                    .iter()
                    .map(|grant| {
                        Ok(MethodGrant {
                            roles: parse_all::<Role>(&grant.roles, &feature)?,
                            methods: parse_all::<HttpMethod>(&grant.methods, &feature)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                parsed.insert(parse_name::<Department>(&department, &feature)?, grants);
            }
            policy.access_rules.insert(feature, parsed);
        }

        debug!(
            paths = policy.feature_visibility.len(),
            role_gates = policy.feature_roles.len(),
            features = policy.access_rules.len(),
            "Access policy parsed"
        );
        Ok(policy)
    }
}
