//! Resource domain module.
//!
//! A resource is a server-authoritative record (client, treatment,
//! appointment, user, professional) that views cache locally as a list.
//!
//! # Module Structure
//!
//! - `model`: the `Resource` and `Searchable` traits and `ReconcilePolicy`
//! - `gateway`: the `ResourceGateway` port implemented by backend adapters
//! - `filter`: local, case-insensitive search over cached collections

mod filter;
mod gateway;
mod model;

// Re-export public API
pub use filter::{filter_by_query, matches_query};
pub use gateway::ResourceGateway;
pub use model::{ReconcilePolicy, Resource, Searchable, merge_entity, remove_entity};
