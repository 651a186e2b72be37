// gignore: generate .gitignore files from remote templates.
// Locates the repository root, caches the supported language list, and fetches template text.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod gignore;
pub mod root;

pub use crate::error::{GignoreError, Result};
pub use crate::gignore::{Buffer, GenerateOutcome, Gignore, OverwritePrompt};
