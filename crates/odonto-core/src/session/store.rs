//! Durable session storage.
//!
//! The session is persisted as two independent entries, the serialized
//! profile and the bearer token. They are always written and cleared
//! together.

use crate::error::Result;
use crate::user::UserProfile;

/// Storage key of the serialized current-user profile.
pub const PROFILE_KEY: &str = "odontoUser";

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "odontoAccessToken";

/// A small durable key/value store.
///
/// Implementations must apply `set_many` and `remove_many` as a unit.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    fn remove_many(&self, keys: &[&str]) -> Result<()>;
}

/// What the store held at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedSession {
    /// Neither key present
    Empty,
    /// Both keys present and the profile parses
    Complete { profile: UserProfile, token: String },
    /// Only one key present, or an unreadable profile
    Stale,
}

/// Writes both entries of a session.
pub fn persist_session(store: &dyn SessionStore, profile: &UserProfile, token: &str) -> Result<()> {
    let profile_json = serde_json::to_string(profile)?;
    store.set_many(&[(PROFILE_KEY, profile_json), (TOKEN_KEY, token.to_string())])
}

/// Reads the persisted session without judging its validity.
pub fn read_session(store: &dyn SessionStore) -> Result<PersistedSession> {
    let profile = store.get(PROFILE_KEY)?;
    let token = store.get(TOKEN_KEY)?.filter(|t| !t.trim().is_empty());

    Ok(match (profile, token) {
        (None, None) => PersistedSession::Empty,
        (Some(raw), Some(token)) => match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) => PersistedSession::Complete { profile, token },
            Err(_) => PersistedSession::Stale,
        },
        _ => PersistedSession::Stale,
    })
}

/// Removes both entries. Succeeds when they are already absent.
pub fn clear_session(store: &dyn SessionStore) -> Result<()> {
    store.remove_many(&[PROFILE_KEY, TOKEN_KEY])
}
