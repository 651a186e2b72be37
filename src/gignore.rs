// Command handlers.
// One method per user-facing operation; the CLI calls these directly.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::api::{Languages, TemplateSource};
use crate::cache::{self, LanguageCache};
use crate::error::{GignoreError, Result};
use crate::root;

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Asks the user whether an existing `.gitignore` may be replaced.
pub trait OverwritePrompt {
    fn confirm_overwrite(&self, path: &Path) -> Result<bool>;
}

/// Answers every prompt with yes.
pub struct AssumeYes;

impl OverwritePrompt for AssumeYes {
    fn confirm_overwrite(&self, _path: &Path) -> Result<bool> {
        Ok(true)
    }
}

/// Result of [`Gignore::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The file was written at this path.
    Written(PathBuf),
    /// The user declined to overwrite; nothing changed.
    Canceled,
}

/// Text buffer as a list of lines. An empty buffer is a single empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Load file contents the way an editor does: a final `\n` ends the last
    /// line instead of opening a new one, so `""` and `"\n"` are both blank.
    pub fn from_file_contents(contents: &str) -> Self {
        Self::from_text(contents.strip_suffix('\n').unwrap_or(contents))
    }

    /// File contents for this buffer, every line newline-terminated.
    pub fn to_file_contents(&self) -> String {
        let mut contents = self.to_text();
        contents.push('\n');
        contents
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.lines.as_slice(), [only] if only.is_empty())
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop exactly one leading `\n`; the API prefixes its bodies with one.
pub fn strip_leading_newline(text: &str) -> &str {
    text.strip_prefix('\n').unwrap_or(text)
}

/// Operations over a template source and a cache directory.
pub struct Gignore<S> {
    pub(crate) source: S,
    cache_dir: PathBuf,
}

impl<S: TemplateSource> Gignore<S> {
    pub fn new(source: S, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache(&self) -> LanguageCache<'_, S> {
        LanguageCache::new(&self.cache_dir, &self.source)
    }

    /// Supported template names, from the cache when present.
    pub async fn languages(&self) -> Result<Vec<String>> {
        self.cache().languages().await
    }

    /// Raw ignore text for the given templates.
    pub async fn text(&self, languages: &Languages) -> Result<String> {
        self.source.text(languages).await
    }

    /// Replace the buffer with the ignore text for `languages`.
    ///
    /// A blank buffer gets the text without its leading newline.
    pub async fn setlines(&self, buffer: &mut Buffer, languages: &Languages) -> Result<()> {
        let text = self.text(languages).await?;
        let text = if buffer.is_blank() {
            strip_leading_newline(&text)
        } else {
            text.as_str()
        };
        *buffer = Buffer::from_text(text);
        Ok(())
    }

    /// Apply [`Gignore::setlines`] to a file. A missing file is a blank buffer.
    pub async fn insert_file(&self, file: &Path, languages: &Languages) -> Result<()> {
        let mut buffer = match fs::read_to_string(file) {
            Ok(contents) => Buffer::from_file_contents(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Buffer::new(),
            Err(e) => return Err(e.into()),
        };
        self.setlines(&mut buffer, languages).await?;
        fs::write(file, buffer.to_file_contents())?;
        Ok(())
    }

    /// Write `.gitignore` at the repository root enclosing `start`.
    ///
    /// An existing file is only replaced if `prompt` agrees; it is deleted
    /// before the fetch, so a failed request leaves no `.gitignore` behind.
    pub async fn generate(
        &self,
        start: Option<&Path>,
        languages: &Languages,
        prompt: &dyn OverwritePrompt,
    ) -> Result<GenerateOutcome> {
        let root = root::find_git_root(start)?.ok_or(GignoreError::NotARepository)?;
        let gitignore = root.join(GITIGNORE_FILE);

        if cache::entry_exists(&gitignore) {
            if !prompt.confirm_overwrite(&gitignore)? {
                info!(path = %gitignore.display(), "overwrite declined");
                return Ok(GenerateOutcome::Canceled);
            }
            warn!(path = %gitignore.display(), "removing existing file");
            cache::remove_if_present(&gitignore)?;
        }

        let text = self.text(languages).await?;
        cache::write_atomic(&gitignore, strip_leading_newline(&text))?;
        info!(path = %gitignore.display(), %languages, "generated");

        Ok(GenerateOutcome::Written(gitignore))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeSource;
    use tempfile::TempDir;

    struct Answer(bool);

    impl OverwritePrompt for Answer {
        fn confirm_overwrite(&self, _path: &Path) -> Result<bool> {
            Ok(self.0)
        }
    }

    struct NeverAsk;

    impl OverwritePrompt for NeverAsk {
        fn confirm_overwrite(&self, path: &Path) -> Result<bool> {
            panic!("unexpected prompt for {}", path.display());
        }
    }

    fn python() -> Languages {
        Languages::parse(["Python"]).unwrap()
    }

    fn repo() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("repo");
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        (temp_dir, root)
    }

    fn gignore(source: FakeSource, tmp: &TempDir) -> Gignore<FakeSource> {
        Gignore::new(source, tmp.path().join("cache"))
    }

    #[test]
    fn test_strip_only_one_newline() {
        assert_eq!(strip_leading_newline("\n*.pyc\n"), "*.pyc\n");
        assert_eq!(strip_leading_newline("\n\n*.pyc"), "\n*.pyc");
        assert_eq!(strip_leading_newline(" \n*.pyc"), " \n*.pyc");
        assert_eq!(strip_leading_newline(""), "");
    }

    #[test]
    fn test_buffer_blank() {
        assert!(Buffer::new().is_blank());
        assert!(Buffer::from_text("").is_blank());
        assert!(!Buffer::from_text("\n").is_blank());
        assert!(!Buffer::from_text("x").is_blank());
    }

    #[test]
    fn test_file_with_only_newline_is_blank() {
        assert!(Buffer::from_file_contents("").is_blank());
        assert!(Buffer::from_file_contents("\n").is_blank());
        assert!(!Buffer::from_file_contents("\n\n").is_blank());
    }

    #[test]
    fn test_file_contents_keep_final_newline() {
        let buffer = Buffer::from_file_contents("target/\n*.o\n");
        assert_eq!(buffer.lines(), ["target/", "*.o"]);
        assert_eq!(buffer.to_file_contents(), "target/\n*.o\n");
    }

    #[tokio::test]
    async fn test_insert_into_newline_only_file_strips_newline() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("ignore.txt");
        fs::write(&file, "\n").unwrap();
        let app = gignore(FakeSource::with_text("\n*.pyc"), &tmp);

        app.insert_file(&file, &python()).await.unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "*.pyc\n");
    }

    #[tokio::test]
    async fn test_insert_into_missing_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("new.gitignore");
        let app = gignore(FakeSource::with_text("\n*.pyc\n"), &tmp);

        app.insert_file(&file, &python()).await.unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "*.pyc\n\n");
    }

    #[tokio::test]
    async fn test_insert_replaces_existing_content() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("notes");
        fs::write(&file, "old\nlines\n").unwrap();
        let app = gignore(FakeSource::with_text("\n*.pyc"), &tmp);

        app.insert_file(&file, &python()).await.unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "\n*.pyc\n");
    }

    #[tokio::test]
    async fn test_text_is_returned_verbatim() {
        let tmp = TempDir::new().unwrap();
        let app = gignore(FakeSource::with_text("\n*.pyc\n"), &tmp);

        assert_eq!(app.text(&python()).await.unwrap(), "\n*.pyc\n");
        assert_eq!(app.source.requested(), vec!["Python"]);
    }

    #[tokio::test]
    async fn test_text_joins_languages_with_commas() {
        let tmp = TempDir::new().unwrap();
        let app = gignore(FakeSource::with_text("x"), &tmp);

        let langs = Languages::parse(["rust", "go", "macos"]).unwrap();
        app.text(&langs).await.unwrap();
        assert_eq!(app.source.requested(), vec!["rust,go,macos"]);
    }

    #[tokio::test]
    async fn test_setlines_blank_buffer_strips_newline() {
        let tmp = TempDir::new().unwrap();
        let app = gignore(FakeSource::with_text("\n*.pyc\n__pycache__/"), &tmp);

        let mut buffer = Buffer::new();
        app.setlines(&mut buffer, &python()).await.unwrap();
        assert_eq!(buffer.lines(), ["*.pyc", "__pycache__/"]);
    }

    #[tokio::test]
    async fn test_setlines_nonblank_buffer_keeps_newline() {
        let tmp = TempDir::new().unwrap();
        let app = gignore(FakeSource::with_text("\n*.pyc"), &tmp);

        let mut buffer = Buffer::from_text("old\ncontent\nhere");
        app.setlines(&mut buffer, &python()).await.unwrap();
        assert_eq!(buffer.lines(), ["", "*.pyc"]);
    }

    #[tokio::test]
    async fn test_languages_uses_cache_dir() {
        let tmp = TempDir::new().unwrap();
        let app = gignore(FakeSource::with_languages(&["Rust", "Go"]), &tmp);

        assert_eq!(app.languages().await.unwrap(), vec!["Rust", "Go"]);
        assert_eq!(
            fs::read_to_string(tmp.path().join("cache").join("languages")).unwrap(),
            "Rust\nGo"
        );
    }

    #[tokio::test]
    async fn test_generate_writes_stripped_text_at_root() {
        let tmp = TempDir::new().unwrap();
        let (_repo_tmp, root) = repo();
        let app = gignore(FakeSource::with_text("\n*.pyc\n"), &tmp);

        let outcome = app
            .generate(Some(&root.join("src")), &python(), &NeverAsk)
            .await
            .unwrap();

        let path = root.join(".gitignore");
        assert_eq!(outcome, GenerateOutcome::Written(path.clone()));
        assert_eq!(fs::read_to_string(path).unwrap(), "*.pyc\n");
    }

    #[tokio::test]
    async fn test_generate_declined_leaves_file_unchanged() {
        let tmp = TempDir::new().unwrap();
        let (_repo_tmp, root) = repo();
        let path = root.join(".gitignore");
        fs::write(&path, b"keep-me\r\n\x00binary").unwrap();
        let app = gignore(FakeSource::with_text("\n*.pyc\n"), &tmp);

        let outcome = app
            .generate(Some(&root), &python(), &Answer(false))
            .await
            .unwrap();

        assert_eq!(outcome, GenerateOutcome::Canceled);
        assert_eq!(fs::read(&path).unwrap(), b"keep-me\r\n\x00binary");
        assert_eq!(app.source.text_calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_confirmed_overwrites() {
        let tmp = TempDir::new().unwrap();
        let (_repo_tmp, root) = repo();
        let path = root.join(".gitignore");
        fs::write(&path, "old\n").unwrap();
        let app = gignore(FakeSource::with_text("\ntarget/\n"), &tmp);

        app.generate(Some(&root), &python(), &AssumeYes)
            .await
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "target/\n");
    }

    #[tokio::test]
    async fn test_generate_failed_fetch_after_delete_leaves_no_file() {
        let tmp = TempDir::new().unwrap();
        let (_repo_tmp, root) = repo();
        let path = root.join(".gitignore");
        fs::write(&path, "old\n").unwrap();
        let app = gignore(FakeSource::failing(500), &tmp);

        let err = app
            .generate(Some(&root), &python(), &AssumeYes)
            .await
            .unwrap_err();

        assert!(matches!(err, GignoreError::Http { status: 500 }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_generate_outside_repository() {
        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("plain");
        fs::create_dir(&plain).unwrap();
        if plain.ancestors().any(|a| a.join(".git").exists()) {
            return;
        }
        let app = gignore(FakeSource::with_text("x"), &tmp);

        let err = app
            .generate(Some(&plain), &python(), &NeverAsk)
            .await
            .unwrap_err();
        assert!(matches!(err, GignoreError::NotARepository));
        assert_eq!(app.source.text_calls(), 0);
    }
}
