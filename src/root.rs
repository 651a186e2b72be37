// Repository root lookup.
// Walks up from a path to the nearest directory containing a `.git` entry.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Marker entry identifying a repository root. May be a directory or a
/// worktree/submodule `.git` file.
pub const GIT_MARKER: &str = ".git";

/// Find the nearest ancestor of `start` (inclusive) that contains `.git`.
///
/// `start` defaults to the current directory. Relative paths are joined onto
/// the current directory; a file path starts the search from its parent. A
/// path that does not exist is an error rather than `None`.
pub fn find_git_root(start: Option<&Path>) -> Result<Option<PathBuf>> {
    let cwd = std::env::current_dir()?;
    let start = match start {
        Some(path) => normalize(&cwd.join(path)),
        None => cwd,
    };

    let mut current = if fs::metadata(&start)?.is_dir() {
        start
    } else {
        parent_of(&start)
    };

    loop {
        if has_marker(&current) {
            return Ok(Some(current));
        }
        let parent = parent_of(&current);
        if parent == current {
            return Ok(None);
        }
        current = parent;
    }
}

/// Lexically resolve `.` and `..` so parent steps follow the path as written.
/// Symlinks are not resolved.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// lstat, so a dangling `.git` symlink still marks the root
fn has_marker(dir: &Path) -> bool {
    fs::symlink_metadata(dir.join(GIT_MARKER)).is_ok()
}

// `Path::parent` is lexical and returns `None` at the root; clamp there so the
// walk sees the root as its own parent.
fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => path.to_path_buf(),
    }
}
