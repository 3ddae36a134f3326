//! Authentication gateway trait.

use async_trait::async_trait;

use super::model::{Credentials, LoginResponse, Registration};
use crate::error::Result;
use crate::user::UserProfile;

/// Backend operations the session manager depends on.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a token and profile.
    ///
    /// Bad credentials surface as `OdontoError::Authentication`.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Returns the profile the backend associates with `token`.
    ///
    /// An expired or unknown token surfaces as `OdontoError::Unauthorized`.
    async fn current_user(&self, token: &str) -> Result<UserProfile>;

    /// Creates a new account.
    async fn register(&self, registration: &Registration) -> Result<UserProfile>;
}
