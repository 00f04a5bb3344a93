use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{error, info};

use crate::core::models::DigestSecrets;
use crate::digest::build_ugc_post_payload;
use crate::errors::DigestError;

const RESTLI_PROTOCOL_HEADER: &str = "X-Restli-Protocol-Version";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Result of a publish attempt that reached the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Published,
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait SocialPoster: Send + Sync {
    async fn publish(
        &self,
        secrets: &DigestSecrets,
        post_text: &str,
    ) -> Result<PostOutcome, DigestError>;
}

/// Publishes share posts through the UGC posts endpoint.
pub struct LinkedInPoster {
    endpoint: String,
}

impl LinkedInPoster {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

/// # Errors
///
/// Returns an error if the token contains bytes not allowed in a header.
pub fn build_linkedin_headers(access_token: &str) -> Result<HeaderMap, DigestError> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))
        .map_err(|e| DigestError::ConfigError(format!("LINKEDIN_ACCESS_TOKEN: {e}")))?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        RESTLI_PROTOCOL_HEADER,
        HeaderValue::from_static(RESTLI_PROTOCOL_VERSION),
    );
    Ok(headers)
}

#[async_trait]
impl SocialPoster for LinkedInPoster {
    async fn publish(
        &self,
        secrets: &DigestSecrets,
        post_text: &str,
    ) -> Result<PostOutcome, DigestError> {
        let token = secrets
            .linkedin_access_token
            .as_deref()
            .ok_or_else(|| DigestError::MissingSecret("LINKEDIN_ACCESS_TOKEN".to_string()))?;
        let author = secrets
            .linkedin_author_urn
            .as_deref()
            .ok_or_else(|| DigestError::MissingSecret("LINKEDIN_AUTHOR_URN".to_string()))?;

        let resp = HTTP_CLIENT
            .post(&self.endpoint)
            .headers(build_linkedin_headers(token)?)
            .json(&build_ugc_post_payload(author, post_text))
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            info!("Posted to LinkedIn successfully!");
            return Ok(PostOutcome::Published);
        }

        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        error!("Error posting to LinkedIn: {} - {}", status.as_u16(), body);
        Ok(PostOutcome::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
