//! Shared test data

use serde_json::{Value, json};

pub const REFRESH_PATH: &str = "/api/v1/authorization/token/refresh";
pub const PROFILE_PATH: &str = "/api/v1/profile/user/me";
pub const LOGIN_PATH: &str = "/api/v1/authorization/token";

/// Profile body as the API returns it
pub fn profile_json(department: &str, role: &str) -> Value {
    json!({
        "id": 7,
        "email": format!("{}@example.com", role),
        "name": "Test User",
        "department": department,
        "role": role,
        "created_at": "2024-01-01T00:00:00Z"
    })
}

/// Refresh or login body carrying tokens
pub fn token_json(access: &str, refresh: Option<&str>) -> Value {
    match refresh {
        Some(refresh) => json!({ "access_token": access, "refresh_token": refresh }),
        None => json!({ "access_token": access }),
    }
}
