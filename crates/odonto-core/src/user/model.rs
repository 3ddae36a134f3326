//! User domain models.
//!
//! Holds the single normalized shape of the signed-in user (`UserProfile`)
//! and the `User` record managed by administrators.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::resource::{ReconcilePolicy, Resource, Searchable};

/// Role of an account, gating which views and actions are permitted.
///
/// Serialized as the uppercase literal. Lowercase spellings are accepted
/// when reading so older payloads still load.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Role {
    #[serde(alias = "admin")]
    Admin,
    #[serde(alias = "professional")]
    Professional,
    #[serde(alias = "client")]
    Client,
}

/// The signed-in user as persisted under the profile storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A user account as listed on the user management view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Payload for creating or editing a user account.
///
/// `password` is omitted on edits that keep the current password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

impl Resource for User {
    type Input = UserInput;

    const KIND: &'static str = "user";
    // The backend decides which accounts a listing includes, so the
    // collection is always re-read after a change.
    const POLICY: ReconcilePolicy = ReconcilePolicy::Refetch;

    fn id(&self) -> &str {
        &self.id
    }
}
