use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub role: String,
}

/// Full user record from the user-management endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role_id: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub peer_count: u64,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The authenticated identity returned by `/api/users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_user_role_check() {
        let admin = CurrentUser {
            id: "u1".to_string(),
            username: "root".to_string(),
            role: "admin".to_string(),
        };
        let plain = CurrentUser {
            id: "u2".to_string(),
            username: "alice".to_string(),
            role: "user".to_string(),
        };
        assert!(admin.is_admin());
        assert!(!plain.is_admin());
    }

    #[test]
    fn user_decodes_without_optional_fields() {
        let json = r#"{
            "id": "u3",
            "username": "bob",
            "role_id": "r1"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(user.peer_count, 0);
        assert!(!user.paused);
        assert!(user.role.is_none());
    }
}
