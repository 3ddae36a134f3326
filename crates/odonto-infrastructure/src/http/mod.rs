//! REST adapters for the clinic backend.
//!
//! # Module Structure
//!
//! - `api_client`: shared reqwest client (base URL, bearer token, status mapping)
//! - `auth_gateway`: login, identity check, registration
//! - `resource_gateway`: generic CRUD gateway plus the per-resource endpoints
//! - `statistics_gateway`: dashboard statistics

mod api_client;
mod auth_gateway;
mod resource_gateway;
mod statistics_gateway;

pub use api_client::{ApiClient, error_message};
pub use auth_gateway::RestAuthGateway;
pub use resource_gateway::{Endpoint, PathSegment, RestResourceGateway};
pub use statistics_gateway::RestStatisticsGateway;
