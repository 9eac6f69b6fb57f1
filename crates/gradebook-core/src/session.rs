//! Ephemeral session identity established by a successful login.

use std::fmt;

/// Header carrying the lowercase session identity on authenticated calls.
pub const USERNAME_HEADER: &str = "X-Username";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Role reported by the service at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Full access: manages all students and grades.
    Admin,
    /// May only view its own grades.
    Student,
    /// Any role string the console does not know about.
    Other(String),
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Admin" => Role::Admin,
            "Student" => Role::Student,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Student => write!(f, "Student"),
            Role::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Headers sent with every request; unauthenticated calls carry only the content type.
pub fn json_headers() -> Vec<(String, String)> {
    vec![(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string())]
}

/// Logged-in identity. Created by login, dropped by logout; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    display_name: String,
    role: Role,
    auth_headers: Vec<(String, String)>,
}

impl Session {
    /// Builds a session for `username` as typed at login. The identity is lowercased.
    pub fn new(username: &str, role: Role) -> Self {
        let lowered = username.to_lowercase();
        let mut auth_headers = json_headers();
        auth_headers.push((USERNAME_HEADER.to_string(), lowered.clone()));
        Self {
            username: lowered,
            display_name: username.to_string(),
            role,
            auth_headers,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The username exactly as it was entered at login.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn auth_headers(&self) -> &[(String, String)] {
        &self.auth_headers
    }
}
