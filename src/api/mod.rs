/// GraphQL API layer
///
/// This module talks to the external endpoint:
/// - HTTP transport and response decoding (client.rs)
/// - The fixed operation documents and typed wrappers (operations.rs)
/// - The explicit response cache keyed by operation + variables (cache.rs)

pub mod cache;
pub mod client;
pub mod operations;

pub use client::GqlClient;
