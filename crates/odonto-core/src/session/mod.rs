//! Session domain module.
//!
//! This module contains the session model, the durable storage port and
//! the authentication gateway port.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `SessionState`, login/registration payloads
//! - `store`: `SessionStore` port and the two-key persistence helpers
//! - `gateway`: `AuthGateway` port for login and identity checks
//!
//! # Usage
//!
//! ```ignore
//! use odonto_core::session::{Session, SessionState, SessionStore, AuthGateway};
//! ```

mod gateway;
mod model;
mod store;

// Re-export public API
pub use gateway::AuthGateway;
pub use model::{Credentials, LoginResponse, Registration, Session, SessionState};
pub use store::{PROFILE_KEY, PersistedSession, SessionStore, TOKEN_KEY, clear_session, persist_session, read_session};
