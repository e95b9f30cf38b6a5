//! Session and role models

use serde::{Deserialize, Serialize};

use super::Identity;

/// Numeric user identifier, as stored in `user_ID` fields
pub type UserId = i64;

/// Account roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular member - books rooms and manages own bookings
    User,
    /// Staff - reviews pending bookings
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::User => "Member",
            UserRole::Admin => "Administrator",
        }
    }

    /// Parse the stored lowercase form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The logged-in identity cached in the `<app>_user` entry.
///
/// Field names match the stored JSON layout. Sessions never expire; they are
/// removed on logout only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "user_ID")]
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(rename = "isLoggedIn", default)]
    pub is_logged_in: bool,
}

impl Session {
    pub fn new(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            role: identity.role,
            is_logged_in: true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_logged_in
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Initials shown in the navigation badge ("Rendy Reza" -> "RR")
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_wire_format() {
        let json = r#"{"user_ID":1,"name":"RendyReza","email":"rendyreza@rendyws.com","role":"user","isLoggedIn":true}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.user_id, 1);
        assert_eq!(session.role, UserRole::User);
        assert!(session.is_valid());

        let back = serde_json::to_string(&session).unwrap();
        assert!(back.contains("\"user_ID\":1"));
        assert!(back.contains("\"isLoggedIn\":true"));
    }

    #[test]
    fn test_missing_logged_in_flag_is_logged_out() {
        let json = r#"{"user_ID":999,"name":"Admin","email":"a@b.c","role":"admin"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert!(!session.is_valid());
        assert!(session.is_admin());
    }

    #[test]
    fn test_initials() {
        let session = Session {
            user_id: 1,
            name: "Rendy Reza".to_string(),
            email: "r@r.com".to_string(),
            role: UserRole::User,
            is_logged_in: true,
        };
        assert_eq!(session.initials(), "RR");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("user"), Some(UserRole::User));
        assert_eq!(UserRole::parse("root"), None);
    }
}
