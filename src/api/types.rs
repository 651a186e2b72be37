// Template API request types.
// Validated language identifiers used to build request paths.

use std::fmt;
use std::str::FromStr;

use crate::error::{GignoreError, Result};

/// A single template name understood by the remote API (e.g. `rust`, `python`).
///
/// Only the syntax is checked: characters that would change the request path
/// are rejected. Whether the API knows the name is left to the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageName(String);

impl LanguageName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.chars().any(is_reserved) {
            return Err(GignoreError::InvalidLanguage(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_reserved(c: char) -> bool {
    matches!(c, ',' | '/' | '?' | '#' | '\\') || c.is_whitespace() || c.is_control()
}

impl FromStr for LanguageName {
    type Err = GignoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for LanguageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty, ordered selection of templates for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Languages(Vec<LanguageName>);

impl Languages {
    pub fn new(names: Vec<LanguageName>) -> Result<Self> {
        if names.is_empty() {
            return Err(GignoreError::InvalidLanguage(String::new()));
        }
        Ok(Self(names))
    }

    /// Parse and validate every name.
    pub fn parse<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| LanguageName::new(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(names)
    }

    /// Comma-joined form used as the request path segment.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(LanguageName::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Languages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}
