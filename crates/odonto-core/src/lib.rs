//! Domain layer of the Odonto clinic client.
//!
//! Holds the models, the error type, the access policy and the ports
//! (`AuthGateway`, `ResourceGateway`, `SessionStore`, ...) that the
//! infrastructure crate implements.

pub mod access;
pub mod appointment;
pub mod client;
pub mod error;
pub mod professional;
pub mod resource;
pub mod session;
pub mod statistics;
pub mod summary;
pub mod treatment;
pub mod user;
pub mod wire;

// Re-export common error type
pub use error::{OdontoError, Result};
