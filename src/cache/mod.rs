// Cache module for local filesystem caching.
// Stores the supported language list so completion and listing work offline.

pub mod languages;
pub mod paths;
pub mod store;

pub use languages::LanguageCache;
pub use paths::languages_path;
pub use store::{entry_exists, read_optional, remove_if_present, write_atomic};
