use odonto_core::user::{Role, User, UserInput};
use odonto_core::{OdontoError, Result};
use std::sync::Arc;

use super::{ListController, Settled, UserController};

/// The account management view: a user controller plus the rules about
/// which accounts may be shown and removed.
pub struct UserDirectory {
    controller: Arc<UserController>,
    protected_emails: Vec<String>,
}

impl UserDirectory {
    pub fn new(controller: Arc<UserController>, protected_emails: Vec<String>) -> Self {
        Self {
            controller,
            protected_emails: protected_emails
                .into_iter()
                .map(|email| email.trim().to_lowercase())
                .collect(),
        }
    }

    pub fn controller(&self) -> &Arc<ListController<User>> {
        &self.controller
    }

    pub async fn fetch_all(&self) -> Result<Settled<usize>> {
        self.controller.fetch_all().await
    }

    /// Staff accounts (admins and professionals) matching `query`.
    pub async fn visible(&self, query: &str) -> Vec<User> {
        self.controller
            .filtered(query)
            .await
            .into_iter()
            .filter(|user| matches!(user.role, Role::Admin | Role::Professional))
            .collect()
    }

    pub async fn create(&self, input: &UserInput) -> Result<Settled<User>> {
        self.controller.create(input).await
    }

    pub async fn update(&self, id: &str, input: &UserInput) -> Result<Settled<User>> {
        self.controller.update(id, input).await
    }

    pub fn is_protected(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.protected_emails.iter().any(|protected| *protected == email)
    }

    /// Deletes an account unless it is the signed-in one or a protected one.
    pub async fn delete(&self, id: &str) -> Result<Settled<()>> {
        if let Some(session) = self.controller.session().current().await {
            if session.user_id == id {
                return Err(OdontoError::validation("You cannot delete your own account."));
            }
        }
        if self.controller.find(id).await.is_none()
            && self.controller.fetch_all().await?.is_discarded()
        {
            return Ok(Settled::Discarded);
        }
        let Some(user) = self.controller.find(id).await else {
            return Err(OdontoError::not_found("user", id));
        };
        if self.is_protected(&user.email) {
            return Err(OdontoError::validation(format!(
                "The account {} is protected and cannot be deleted.",
                user.email
            )));
        }
        self.controller.delete(id).await
    }
}
