// Cached list of supported template names.
// Fetched once from the API and kept on disk with no expiry.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::api::TemplateSource;
use crate::error::Result;

use super::{paths, store};

/// Language list backed by a file in the cache directory.
///
/// Once written, the file is trusted until it is deleted with [`LanguageCache::clear`].
pub struct LanguageCache<'a, S: ?Sized> {
    cache_dir: PathBuf,
    source: &'a S,
}

impl<'a, S: TemplateSource + ?Sized> LanguageCache<'a, S> {
    pub fn new(cache_dir: impl Into<PathBuf>, source: &'a S) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            source,
        }
    }

    /// Path to the cache file.
    pub fn path(&self) -> PathBuf {
        paths::languages_path(&self.cache_dir)
    }

    /// Return the language list, fetching and caching it on first use.
    pub async fn languages(&self) -> Result<Vec<String>> {
        fs::create_dir_all(&self.cache_dir)?;

        let path = self.path();
        if let Some(contents) = store::read_optional(&path)? {
            debug!(path = %path.display(), "language list cache hit");
            return Ok(contents.split('\n').map(str::to_string).collect());
        }

        info!(path = %path.display(), "language list not cached, fetching");
        let languages = self.source.language_list().await?;
        store::write_atomic(&path, &languages.join("\n"))?;
        Ok(languages)
    }

    /// Delete the cache file so the next lookup fetches again.
    pub fn clear(&self) -> Result<()> {
        store::remove_if_present(&self.path())
    }
}
