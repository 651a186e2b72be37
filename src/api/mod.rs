// Template API module.
// Client and types for the gitignore.io-compatible template API.

pub mod client;
pub mod endpoints;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::GitignoreClient;
pub use endpoints::TemplateSource;
pub use types::{LanguageName, Languages};
