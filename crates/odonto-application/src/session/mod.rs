//! Session lifecycle.
//!
//! # Module Structure
//!
//! - `manager`: `SessionManager`, the authentication state machine and
//!   owner of the persisted token and profile

mod manager;

pub use manager::SessionManager;
