//! REST implementation of `AuthGateway`.

use async_trait::async_trait;
use odonto_core::Result;
use odonto_core::session::{AuthGateway, Credentials, LoginResponse, Registration};
use odonto_core::user::UserProfile;
use reqwest::Method;
use std::sync::Arc;

use super::api_client::{ApiClient, Auth};

/// `POST /sessions` to log in, `GET /sessions/me` to check a token,
/// `POST /users` to register.
pub struct RestAuthGateway {
    api: Arc<ApiClient>,
}

impl RestAuthGateway {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let url = self.api.url(&["sessions"])?;
        self.api
            .send_json(Method::POST, url, credentials, Auth::Login)
            .await
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile> {
        let url = self.api.url(&["sessions", "me"])?;
        self.api.get_json(url, Auth::Token(token)).await
    }

    async fn register(&self, registration: &Registration) -> Result<UserProfile> {
        let url = self.api.url(&["users"])?;
        self.api
            .send_json(Method::POST, url, registration, Auth::Stored)
            .await
    }
}
