//! Resource gateway trait.
//!
//! Defines the interface a list controller uses to talk to the backend.

use async_trait::async_trait;

use super::model::Resource;
use crate::error::Result;

/// An abstract gateway for one resource collection.
///
/// This trait decouples list controllers from the transport (REST over
/// HTTP in production, in-memory fakes in tests).
#[async_trait]
pub trait ResourceGateway<R: Resource>: Send + Sync {
    /// Fetches the whole collection visible to the signed-in user.
    async fn list(&self) -> Result<Vec<R>>;

    /// Creates an entity and returns it as stored by the backend.
    async fn create(&self, input: &R::Input) -> Result<R>;

    /// Replaces an entity and returns it as stored by the backend.
    async fn update(&self, id: &str, input: &R::Input) -> Result<R>;

    /// Deletes an entity.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Entity deleted
    /// - `Err(OdontoError::Conflict)`: Entity is referenced elsewhere
    /// - `Err(_)`: Any other failure
    async fn delete(&self, id: &str) -> Result<()>;
}
