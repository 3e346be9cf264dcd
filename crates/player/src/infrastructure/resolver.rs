//! HTTP client for the intent resolver service.

use std::time::Duration;

use async_trait::async_trait;
use echoes_domain::SessionAttributes;
use echoes_protocol::{ResolverReply, ResolverRequest};
use reqwest::Client;

use crate::ports::{ResolverError, ResolverPort};

/// Default resolver service base URL.
pub const DEFAULT_RESOLVER_BASE_URL: &str = "http://localhost:8700";

/// Client for the resolver's `POST {base}/resolve` endpoint.
#[derive(Clone)]
pub struct HttpResolverClient {
    client: Client,
    base_url: String,
}

impl HttpResolverClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create client from `RESOLVER_URL`, falling back to the default.
    pub fn from_env() -> Self {
        let base_url = std::env::var("RESOLVER_URL")
            .unwrap_or_else(|_| DEFAULT_RESOLVER_BASE_URL.to_string());
        Self::new(&base_url)
    }
}

#[async_trait]
impl ResolverPort for HttpResolverClient {
    async fn resolve(
        &self,
        utterance: &str,
        session_attributes: &SessionAttributes,
    ) -> Result<ResolverReply, ResolverError> {
        let request = ResolverRequest {
            utterance: utterance.to_string(),
            session_attributes: session_attributes.clone(),
        };

        let response = self
            .client
            .post(format!("{}/resolve", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ResolverError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| ResolverError::RequestFailed(e.to_string()))?;
            return Err(ResolverError::RequestFailed(error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ResolverError::InvalidResponse(e.to_string()))
    }
}
