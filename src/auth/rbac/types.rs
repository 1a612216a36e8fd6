//! Access policy type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Organizational scope of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    QualityAssurance,
    Support,
    /// Any value the tables do not know; never granted anything
    #[serde(other)]
    Unknown,
}

/// Permission level of a user within a department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Head,
    TeamLead,
    Supervisor,
    Agent,
    #[serde(other)]
    Unknown,
}

/// HTTP verb subject to method-level rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Departments allowed to see a navigation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentScope {
    /// Department-agnostic
    All,
    Only(Department),
    AnyOf(HashSet<Department>),
}

/// One access rule entry: these roles may use these methods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodGrant {
    pub roles: HashSet<Role>,
    pub methods: HashSet<HttpMethod>,
}

/// Result of a detailed access check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    /// Whether access is granted
    pub granted: bool,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}

impl Department {
    pub const ALL: [Department; 2] = [Department::QualityAssurance, Department::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::QualityAssurance => "quality_assurance",
            Department::Support => "support",
            Department::Unknown => "unknown",
        }
    }
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Head,
        Role::TeamLead,
        Role::Supervisor,
        Role::Agent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Head => "head",
            Role::TeamLead => "team_lead",
            Role::Supervisor => "supervisor",
            Role::Agent => "agent",
            Role::Unknown => "unknown",
        }
    }
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quality_assurance" => Ok(Department::QualityAssurance),
            "support" => Ok(Department::Support),
            other => Err(format!("Unknown department: {}", other)),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "head" => Ok(Role::Head),
            "team_lead" => Ok(Role::TeamLead),
            "supervisor" => Ok(Role::Supervisor),
            "agent" => Ok(Role::Agent),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(format!("Unsupported method: {}", other)),
        }
    }
}

impl TryFrom<&reqwest::Method> for HttpMethod {
    type Error = String;

    fn try_from(method: &reqwest::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DepartmentScope {
    /// Whether `department` passes this gate
    pub fn admits(&self, department: Option<Department>) -> bool {
        match self {
            DepartmentScope::All => true,
            DepartmentScope::Only(allowed) => department == Some(*allowed),
            DepartmentScope::AnyOf(allowed) => department.is_some_and(|d| allowed.contains(&d)),
        }
    }
}

impl MethodGrant {
    pub fn new(
        roles: impl IntoIterator<Item = Role>,
        methods: impl IntoIterator<Item = HttpMethod>,
    ) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            methods: methods.into_iter().collect(),
        }
    }

    pub fn permits(&self, role: Role, method: HttpMethod) -> bool {
        self.roles.contains(&role) && self.methods.contains(&method)
    }
}

impl AccessDecision {
    pub(super) fn granted() -> Self {
        Self {
            granted: true,
            denial_reason: None,
        }
    }

    pub(super) fn denied(reason: impl Into<String>) -> Self {
        Self {
            granted: false,
            denial_reason: Some(reason.into()),
        }
    }
}
