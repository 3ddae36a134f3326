//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: `Role`, the signed-in `UserProfile`, and the `User` resource
//!
//! # Usage
//!
//! ```ignore
//! use odonto_core::user::{Role, User, UserInput, UserProfile};
//! ```

mod model;

// Re-export public API
pub use model::{Role, User, UserInput, UserProfile};
