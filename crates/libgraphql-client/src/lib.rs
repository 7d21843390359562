//! Compose GraphQL operations and fragments declared under nested scope
//! paths into flat, deterministic documents, validate them against a
//! schema, and project JSON responses into read-only accessor objects.

pub mod ast;
mod client;
mod config;
pub mod definition;
pub mod document;
mod file_reader;
pub mod loc;
pub mod projection;
pub mod registry;
pub mod schema;
pub mod validation;

pub use client::Client;
pub use client::ClientBuilder;
pub use config::ClientConfig;
pub use config::DEFAULT_SEPARATOR;
pub use config::DEFAULT_TYPENAME_KEY;
pub use config::SpreadMode;
pub use definition::ScopePath;
pub use file_reader::ReadContentError;

#[cfg(test)]
mod tests;
