//! Realm domain model.

use serde::{Deserialize, Serialize};

/// An organization managing its own properties, tenants and rents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Realm {
    pub id: String,
    pub name: String,
    /// Account emails permitted to act within this realm.
    #[serde(default)]
    pub members: Vec<String>,
}

impl Realm {
    pub fn has_member(&self, email: &str) -> bool {
        self.members.iter().any(|m| m.eq_ignore_ascii_case(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_ignores_case() {
        let realm = Realm {
            id: "r1".to_string(),
            name: "Acme".to_string(),
            members: vec!["Owner@Example.com".to_string()],
        };
        assert!(realm.has_member("owner@example.com"));
        assert!(!realm.has_member("other@example.com"));
    }
}
