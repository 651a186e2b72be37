// Template API HTTP client.
// Builds request URLs and turns non-success responses into errors.

use reqwest::{
    Client, Response,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{GignoreError, Result};

/// HTTP client for the gitignore template API.
pub struct GitignoreClient {
    client: Client,
    base: String,
}

impl GitignoreClient {
    /// Create a client against an API base URL without a trailing slash
    /// (see `Config`).
    pub fn new(base: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gignore/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(GignoreError::Api)?;

        Ok(Self {
            client,
            base: base.to_string(),
        })
    }

    /// Full URL for an endpoint path such as `/list`.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base, endpoint)
    }

    /// Make a GET request to the API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(GignoreError::Api)?;
        check_response(response)
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(GignoreError::Api)?;
        check_response(response)
    }
}

/// Any non-2xx status is an error carrying the code.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GignoreError::Http {
            status: status.as_u16(),
        })
    }
}
