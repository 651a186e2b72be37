// Template API endpoint functions.
// Typed methods for the language list and combined template text.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;

use super::client::GitignoreClient;
use super::types::Languages;

/// Where language lists and ignore templates come from.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// All template names the API knows, in server order.
    async fn language_list(&self) -> Result<Vec<String>>;

    /// Combined ignore text for the given templates, body returned verbatim.
    async fn text(&self, languages: &Languages) -> Result<String>;
}

impl GitignoreClient {
    /// Get the supported template names (`/list?format=json`).
    pub async fn get_language_list(&self) -> Result<Vec<String>> {
        let response = self.get_with_params("/list", &[("format", "json")]).await?;
        let object: Map<String, Value> = response.json().await?;
        Ok(object.into_iter().map(|(name, _)| name).collect())
    }

    /// Get ignore text for one or more templates (`/{a,b,c}`).
    pub async fn get_text(&self, languages: &Languages) -> Result<String> {
        let response = self.get(&format!("/{}", languages.joined())).await?;
        let text = response.text().await?;
        Ok(text)
    }
}

#[async_trait]
impl TemplateSource for GitignoreClient {
    async fn language_list(&self) -> Result<Vec<String>> {
        self.get_language_list().await
    }

    async fn text(&self, languages: &Languages) -> Result<String> {
        self.get_text(languages).await
    }
}
