use serde::{Deserialize, Serialize};

use crate::errors::DigestError;

/// Keys stored in the agent's secret. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestSecrets {
    #[serde(rename = "NEWS_API_KEY")]
    pub news_api_key: String,
    #[serde(rename = "SENDER_EMAIL", default)]
    pub sender_email: Option<String>,
    #[serde(rename = "RECIPIENT_EMAIL", default)]
    pub recipient_email: Option<String>,
    #[serde(rename = "LINKEDIN_ACCESS_TOKEN", default)]
    pub linkedin_access_token: Option<String>,
    #[serde(rename = "LINKEDIN_AUTHOR_URN", default)]
    pub linkedin_author_urn: Option<String>,
}

/// Email addressing extracted from [`DigestSecrets`] once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRoute {
    pub sender: String,
    pub recipients: Vec<String>,
}

impl DigestSecrets {
    /// # Errors
    ///
    /// Returns [`DigestError::MissingSecret`] when either email key is absent.
    pub fn email_route(&self) -> Result<EmailRoute, DigestError> {
        let (Some(sender), Some(recipients)) = (&self.sender_email, &self.recipient_email) else {
            return Err(DigestError::MissingSecret(
                "SENDER_EMAIL and RECIPIENT_EMAIL".to_string(),
            ));
        };
        Ok(EmailRoute {
            sender: sender.clone(),
            recipients: split_recipients(recipients),
        })
    }
}

/// Splits a comma-separated recipient list, trimming whitespace and dropping
/// empty entries.
#[must_use]
pub fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: ArticleSource,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Payload returned to the Lambda runtime on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    #[must_use]
    pub fn completed() -> Self {
        Self {
            status_code: 200,
            // JSON-encoded string
            body: "\"Process completed!\"".to_string(),
        }
    }
}
