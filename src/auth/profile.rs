//! Profile of the logged-in user

use serde::{Deserialize, Serialize};

use super::rbac::{Department, Role};

/// The `{department, role, ...}` object returned by the profile endpoint
///
/// Fields the server adds beyond these are ignored. A missing or unknown
/// department/role never grants anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub role: Option<Role>,
}
