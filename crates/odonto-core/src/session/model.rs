//! Session domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::user::{Role, UserProfile};

/// The client-held record of the authenticated identity and its token.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub auth_token: String,
}

impl Session {
    pub fn new(profile: UserProfile, auth_token: impl Into<String>) -> Self {
        Self {
            user_id: profile.id,
            display_name: profile.name,
            email: profile.email,
            role: profile.role,
            auth_token: auth_token.into(),
        }
    }

    /// The profile as persisted under the profile key.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id.clone(),
            name: self.display_name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

// The token never reaches logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

/// Authentication state of the client.
///
/// Transitions: `Loading → Authenticated | Anonymous` on startup,
/// `Authenticated → Anonymous` on logout or a rejected token, and
/// `Anonymous → Authenticated` on a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Authenticated(Session),
    Anonymous,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.session().map(|s| s.role)
    }
}

/// Login request body.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    pub user: UserProfile,
}

/// Account registration request body.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
