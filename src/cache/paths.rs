// Cache path utilities.

use std::path::{Path, PathBuf};

/// File name of the cached language list inside the cache directory.
pub const LANGUAGES_FILE: &str = "languages";

/// Path to the cached language list.
pub fn languages_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(LANGUAGES_FILE)
}
