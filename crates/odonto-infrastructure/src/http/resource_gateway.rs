//! Generic REST implementation of `ResourceGateway`.

use async_trait::async_trait;
use odonto_core::appointment::Appointment;
use odonto_core::client::Client;
use odonto_core::professional::Professional;
use odonto_core::resource::{Resource, ResourceGateway};
use odonto_core::treatment::Treatment;
use odonto_core::user::User;
use odonto_core::{OdontoError, Result};
use reqwest::Method;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

use super::api_client::{ApiClient, Auth};

/// One segment of an endpoint path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Literal(String),
    /// Id of the signed-in user, resolved when the request is made
    CurrentUser,
}

impl From<&str> for PathSegment {
    fn from(segment: &str) -> Self {
        Self::Literal(segment.to_string())
    }
}

/// Where a resource lives on the backend.
///
/// Mutations go to `collection` (`POST`) and `collection/{id}`
/// (`PUT`/`DELETE`). Listing defaults to `collection` but may use another
/// path and unwrap the array from an envelope field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    collection: Vec<PathSegment>,
    listing: Vec<PathSegment>,
    envelope: Option<String>,
}

impl Endpoint {
    pub fn new(collection: &str) -> Self {
        let segments = vec![PathSegment::from(collection)];
        Self {
            collection: segments.clone(),
            listing: segments,
            envelope: None,
        }
    }

    /// Lists from `listing` instead, taking the array from `envelope` if set.
    pub fn with_listing(mut self, listing: Vec<PathSegment>, envelope: Option<&str>) -> Self {
        self.listing = listing;
        self.envelope = envelope.map(str::to_string);
        self
    }

    pub fn clients() -> Self {
        Self::new("clients")
    }

    pub fn treatments() -> Self {
        Self::new("treatments")
    }

    pub fn professionals() -> Self {
        Self::new("professionals")
    }

    pub fn users() -> Self {
        Self::new("users")
    }

    /// Consultations are created at `/consultations` but listed per user
    /// at `/users/{id}/consultations` inside a `consultations` field.
    pub fn consultations() -> Self {
        Self::new("consultations").with_listing(
            vec![
                PathSegment::from("users"),
                PathSegment::CurrentUser,
                PathSegment::from("consultations"),
            ],
            Some("consultations"),
        )
    }
}

/// Unwraps the collection array from a listing response.
///
/// A bare array is accepted even when an envelope is expected.
fn unwrap_listing<R: Resource>(body: Value, envelope: Option<&str>) -> Result<Vec<R>> {
    let items = match (body, envelope) {
        (Value::Array(items), _) => Value::Array(items),
        (Value::Object(mut fields), Some(key)) => fields.remove(key).ok_or_else(|| {
            OdontoError::Serialization {
                format: "JSON".to_string(),
                message: format!("listing response has no '{}' field", key),
            }
        })?,
        (other, _) => other,
    };
    Ok(serde_json::from_value(items)?)
}

/// CRUD gateway for resource `R` at `endpoint`.
pub struct RestResourceGateway<R> {
    api: Arc<ApiClient>,
    endpoint: Endpoint,
    _phantom: PhantomData<fn() -> R>,
}

impl<R: Resource> RestResourceGateway<R> {
    pub fn new(api: Arc<ApiClient>, endpoint: Endpoint) -> Self {
        Self {
            api,
            endpoint,
            _phantom: PhantomData,
        }
    }

    fn resolve(&self, segments: &[PathSegment]) -> Result<Vec<String>> {
        segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal(text) => Ok(text.clone()),
                PathSegment::CurrentUser => self.api.current_user_id(),
            })
            .collect()
    }

    fn item_url(&self, id: &str) -> Result<reqwest::Url> {
        let mut segments = self.resolve(&self.endpoint.collection)?;
        segments.push(id.to_string());
        self.api.url(&segments)
    }
}

impl RestResourceGateway<Client> {
    pub fn clients(api: Arc<ApiClient>) -> Self {
        Self::new(api, Endpoint::clients())
    }
}

impl RestResourceGateway<Treatment> {
    pub fn treatments(api: Arc<ApiClient>) -> Self {
        Self::new(api, Endpoint::treatments())
    }
}

impl RestResourceGateway<Appointment> {
    pub fn appointments(api: Arc<ApiClient>) -> Self {
        Self::new(api, Endpoint::consultations())
    }
}

impl RestResourceGateway<User> {
    pub fn users(api: Arc<ApiClient>) -> Self {
        Self::new(api, Endpoint::users())
    }
}

impl RestResourceGateway<Professional> {
    pub fn professionals(api: Arc<ApiClient>) -> Self {
        Self::new(api, Endpoint::professionals())
    }
}

#[async_trait]
impl<R: Resource> ResourceGateway<R> for RestResourceGateway<R> {
    async fn list(&self) -> Result<Vec<R>> {
        let url = self.api.url(&self.resolve(&self.endpoint.listing)?)?;
        let body: Value = self.api.get_json(url, Auth::Stored).await?;
        let items = unwrap_listing::<R>(body, self.endpoint.envelope.as_deref())?;
        tracing::debug!("Fetched {} {} records", items.len(), R::KIND);
        Ok(items)
    }

    async fn create(&self, input: &R::Input) -> Result<R> {
        let url = self.api.url(&self.resolve(&self.endpoint.collection)?)?;
        self.api.send_json(Method::POST, url, input, Auth::Stored).await
    }

    async fn update(&self, id: &str, input: &R::Input) -> Result<R> {
        let url = self.item_url(id)?;
        self.api.send_json(Method::PUT, url, input, Auth::Stored).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.item_url(id)?;
        self.api.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::storage::MemorySessionStore;
    use odonto_core::session::{SessionStore, persist_session};
    use odonto_core::user::{Role, UserProfile};
    use serde_json::json;

    fn api_with_user() -> Arc<ApiClient> {
        let store = Arc::new(MemorySessionStore::new());
        persist_session(
            store.as_ref(),
            &UserProfile {
                id: "u-42".to_string(),
                name: "Ana".to_string(),
                email: "ana@clinic.test".to_string(),
                role: Role::Professional,
            },
            "tok",
        )
        .unwrap();
        let store: Arc<dyn SessionStore> = store;
        let config = ApiConfig {
            base_url: "http://localhost:3333/api".to_string(),
            timeout_secs: 5,
        };
        Arc::new(ApiClient::new(&config, store).unwrap())
    }

    #[test]
    fn test_listing_resolves_current_user() {
        let gateway = RestResourceGateway::<Appointment>::appointments(api_with_user());
        let segments = gateway.resolve(&gateway.endpoint.listing).unwrap();
        assert_eq!(segments, vec!["users", "u-42", "consultations"]);
    }

    #[test]
    fn test_item_url() {
        let gateway = RestResourceGateway::<Client>::clients(api_with_user());
        assert_eq!(
            gateway.item_url("c-1").unwrap().as_str(),
            "http://localhost:3333/api/clients/c-1"
        );

        let consultations = RestResourceGateway::<Appointment>::appointments(api_with_user());
        assert_eq!(
            consultations.item_url("a-9").unwrap().as_str(),
            "http://localhost:3333/api/consultations/a-9"
        );
    }

    #[test]
    fn test_unwrap_listing_envelope() {
        let body = json!({
            "consultations": [{
                "id": "a-1",
                "clientId": "c-1",
                "professionalId": "p-1",
                "treatmentId": "t-1",
                "date": "2024-06-10",
                "time": "09:00",
                "status": "SCHEDULED"
            }]
        });
        let items = unwrap_listing::<Appointment>(body, Some("consultations")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a-1");
    }

    #[test]
    fn test_unwrap_listing_accepts_bare_array() {
        let body = json!([{ "id": "t-1", "name": "Cleaning", "duration": 30, "price": 120.0 }]);
        let items = unwrap_listing::<Treatment>(body, Some("treatments")).unwrap();
        assert_eq!(items[0].name, "Cleaning");
    }

    #[test]
    fn test_unwrap_listing_missing_envelope() {
        let err = unwrap_listing::<Treatment>(json!({ "data": [] }), Some("treatments")).unwrap_err();
        assert!(matches!(err, OdontoError::Serialization { .. }));
    }
}
