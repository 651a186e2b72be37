// Runtime configuration.
// Resolves the cache directory and API base URL from flags, environment, and platform defaults.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{GignoreError, Result};

pub const DEFAULT_API_BASE: &str = "https://www.toptal.com/developers/gitignore/api";

pub const CACHE_DIR_ENV: &str = "GIGNORE_CACHE_DIR";
pub const API_BASE_ENV: &str = "GIGNORE_API_BASE";

/// Resolved settings passed to the cache and the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the cached language list.
    pub cache_dir: PathBuf,
    /// Base URL of the template API, without a trailing slash.
    pub api_base: String,
}

impl Config {
    pub fn new(cache_dir: impl Into<PathBuf>, api_base: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            api_base: normalize_base(&api_base.into()),
        }
    }

    /// Build a config from explicit overrides, falling back to the environment
    /// and then to the platform cache directory.
    pub fn resolve(cache_dir: Option<&str>, api_base: Option<&str>) -> Result<Self> {
        let env_cache = std::env::var(CACHE_DIR_ENV).ok();
        let cache_dir = match cache_dir.or(env_cache.as_deref()) {
            Some(raw) => expand_path(raw)?,
            None => default_cache_dir()?,
        };

        let env_base = std::env::var(API_BASE_ENV).ok();
        let api_base = api_base
            .or(env_base.as_deref())
            .unwrap_or(DEFAULT_API_BASE);

        Ok(Self::new(cache_dir, api_base))
    }
}

/// Get the base cache directory (~/.cache/gignore on Linux).
pub fn default_cache_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "gignore")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .ok_or_else(|| GignoreError::Config("could not determine home directory".to_string()))
}

/// Expand `~` and environment variables in a user-supplied path.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| GignoreError::Config(format!("cannot expand {raw:?}: {e}")))
}

fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
