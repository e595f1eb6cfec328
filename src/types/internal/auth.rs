use serde::{Deserialize, Serialize};
use std::fmt;

/// JWT claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

/// Role attached to a user account. Unauthenticated requests act as Guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Adviser,
    Officer,
    Student,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Adviser => "adviser",
            Role::Officer => "officer",
            Role::Student => "student",
            Role::Guest => "guest",
        }
    }

    /// Parse a stored/claimed role string. Guest is never stored.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "adviser" => Some(Role::Adviser),
            "officer" => Some(Role::Officer),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated actor resolved from verified claims
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        Some(Self {
            id: claims.sub.clone(),
            username: claims.username.clone(),
            email: claims.email.clone(),
            role: Role::parse(&claims.role)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_stored_roles_only() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("adviser"), Some(Role::Adviser));
        assert_eq!(Role::parse("officer"), Some(Role::Officer));
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("guest"), None);
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn role_round_trips_through_as_str() {
        for role in [Role::Admin, Role::Adviser, Role::Officer, Role::Student] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }
}
