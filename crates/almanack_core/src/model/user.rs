use serde_json::Value;

use crate::getter::{prop_str, prop_strings};

/// The signed-in account as reported by the identity record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserInfo {
    pub full_name: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl UserInfo {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            full_name: prop_str(raw, "user_metadata.full_name"),
            email: prop_str(raw, "email"),
            roles: prop_strings(raw, "app_metadata.roles"),
        }
    }

    /// `admin` holds every role.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role == name || role == "admin")
    }

    pub fn is_editor(&self) -> bool {
        self.has_role("editor")
    }

    pub fn is_spotlight_user(&self) -> bool {
        self.has_role("Spotlight PA")
    }

    pub fn is_arc_user(&self) -> bool {
        self.has_role("arc user")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admin_implies_every_role() {
        let admin = UserInfo::from_raw(&json!({
            "email": "ed@example.org",
            "user_metadata": {"full_name": "Ed Itor"},
            "app_metadata": {"roles": ["admin"]}
        }));
        assert_eq!(admin.full_name, "Ed Itor");
        assert!(admin.is_editor());
        assert!(admin.is_spotlight_user());
        assert!(admin.is_arc_user());

        let partner = UserInfo::from_raw(&json!({"app_metadata": {"roles": ["arc user"]}}));
        assert!(partner.is_arc_user());
        assert!(!partner.is_editor());

        assert!(!UserInfo::from_raw(&json!({})).has_role("editor"));
    }
}
