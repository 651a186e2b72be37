// In-memory template source for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{GignoreError, Result};

use super::endpoints::TemplateSource;
use super::types::Languages;

#[derive(Default)]
pub struct FakeSource {
    pub languages: Vec<String>,
    pub text: String,
    /// When set, every request fails with this HTTP status.
    pub fail_status: Option<u16>,
    list_calls: AtomicUsize,
    text_calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_languages(languages: &[&str]) -> Self {
        Self {
            languages: languages.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    /// Comma-joined path segments of every text request so far.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TemplateSource for FakeSource {
    async fn language_list(&self) -> Result<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_status {
            return Err(GignoreError::Http { status });
        }
        Ok(self.languages.clone())
    }

    async fn text(&self, languages: &Languages) -> Result<String> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(languages.joined());
        if let Some(status) = self.fail_status {
            return Err(GignoreError::Http { status });
        }
        Ok(self.text.clone())
    }
}
