//! Signed-in user

use serde::{Deserialize, Serialize};

use super::nullable;

/// Current user (`api/auth/token/users/me/`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
}

impl User {
    /// Full name, or the username when no name is set
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut user = User {
            username: "llopez".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "llopez");
        user.first_name = "Luis".to_string();
        assert_eq!(user.display_name(), "Luis");
        user.last_name = "López".to_string();
        assert_eq!(user.display_name(), "Luis López");
    }
}
