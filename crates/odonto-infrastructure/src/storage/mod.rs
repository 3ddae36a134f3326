//! Storage layer for durable session state.

mod file_session_store;
mod memory_session_store;
mod toml_document;

pub use file_session_store::FileSessionStore;
pub use memory_session_store::MemorySessionStore;
pub use toml_document::{TomlDocument, TomlDocumentError};
