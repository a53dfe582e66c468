use serde::{Deserialize, Serialize};

use super::{normalize_variant, ParseEnumError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Basic,
    Admin,
    Partner,
    SuperAdmin,
    Tester,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Basic => write!(f, "Utilisateur"),
            Role::Admin => write!(f, "Administrateur"),
            Role::Partner => write!(f, "Partenaire"),
            Role::SuperAdmin => write!(f, "Super administrateur"),
            Role::Tester => write!(f, "Testeur"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "BASIC" => Ok(Role::Basic),
            "ADMIN" => Ok(Role::Admin),
            "PARTNER" => Ok(Role::Partner),
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "TESTER" => Ok(Role::Tester),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

/// A marketplace user. Embedded selections often carry only the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<Role>,
    pub created_at: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone().unwrap_or_else(|| "Utilisateur".to_string())
        } else {
            parts.join(" ")
        }
    }

    /// Two-letter avatar initials, e.g. "JD" for Jane Doe.
    pub fn initials(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(|s| s.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_me_payload_parses() {
        let json = r#"{"id":"u1","email":"jane@ecodeli.fr","firstName":"Jane","lastName":"Doe","phone":null,"avatar":null,"role":"SUPER_ADMIN","createdAt":"2025-01-02T10:00:00.000Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Some(Role::SuperAdmin));
        assert_eq!(user.full_name(), "Jane Doe");
        assert_eq!(user.initials(), "JD");
    }

    #[test]
    fn test_full_name_fallbacks() {
        let user: User = serde_json::from_str(r#"{"email":"x@ecodeli.fr","firstName":"  "}"#).unwrap();
        assert_eq!(user.full_name(), "x@ecodeli.fr");

        let anonymous: User = serde_json::from_str("{}").unwrap();
        assert_eq!(anonymous.full_name(), "Utilisateur");
        assert_eq!(anonymous.initials(), "");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("super-admin".parse::<Role>(), Ok(Role::SuperAdmin));
        assert_eq!("tester".parse::<Role>(), Ok(Role::Tester));
        assert!("root".parse::<Role>().is_err());
    }
}
