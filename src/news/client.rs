//! News API client module
//!
//! Fetches the week's top fraud and security stories from the `/v2/everything`
//! search endpoint, with retry logic for transient failures.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate};
use reqwest::Client;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::{Article, NewsResponse};
use crate::errors::DigestError;

/// Search expression sent as `q`.
pub const FRAUD_NEWS_QUERY: &str = "(\"payment fraud\" OR \"financial crime\" OR \"identity theft\" OR \"kyc\" OR \"aml\" OR \"messaging spam\" OR \"daiting scam\" OR \"policy abuse\") AND (update OR news OR trend)";

const EVERYTHING_PATH: &str = "/v2/everything";

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

const MAX_RETRIES: usize = 3;

/// Delays between news fetch attempts before jitter: 100ms, 1s, then 2s.
/// No single wait exceeds 2s.
pub fn news_retry_schedule() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(10)
        .factor(10)
        .max_delay(Duration::from_secs(2))
        .take(MAX_RETRIES)
}

/// Anything that can produce the week's articles.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_articles(&self, api_key: &str) -> Result<Vec<Article>, DigestError>;
}

/// Parameters of one news search, independent of the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub query: String,
    pub from: NaiveDate,
    pub page_size: u32,
}

impl NewsQuery {
    /// Query covering the `lookback_days` before `today`.
    #[must_use]
    pub fn last_days(today: NaiveDate, lookback_days: i64, page_size: u32) -> Self {
        Self {
            query: FRAUD_NEWS_QUERY.to_string(),
            from: today - ChronoDuration::days(lookback_days),
            page_size,
        }
    }

    /// Builds the full request URL. Every parameter is percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn to_url(&self, base_url: &str, api_key: &str) -> Result<Url, DigestError> {
        let mut url = Url::parse(base_url)
            .and_then(|base| base.join(EVERYTHING_PATH))
            .map_err(|e| DigestError::ConfigError(format!("news base url {base_url}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("q", &self.query)
            .append_pair("from", &self.from.format("%Y-%m-%d").to_string())
            .append_pair("sortBy", "popularity")
            .append_pair("language", "en")
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("apiKey", api_key);
        Ok(url)
    }
}

/// Parses a search response body. A missing `articles` array is an empty list.
///
/// # Errors
///
/// Returns an error if the body is not valid JSON.
pub fn parse_articles(body: &str) -> Result<Vec<Article>, DigestError> {
    let resp: NewsResponse = serde_json::from_str(body)?;
    Ok(resp.articles)
}

/// HTTP client for the news search API
pub struct NewsClient {
    base_url: String,
    page_size: u32,
    lookback_days: i64,
}

impl NewsClient {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.news_api_base_url.clone(),
            page_size: config.page_size,
            lookback_days: config.lookback_days,
        }
    }

    async fn fetch_once(&self, url: &Url) -> Result<Vec<Article>, DigestError> {
        let resp = HTTP_CLIENT.get(url.clone()).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(DigestError::NewsApiError {
                status: status.as_u16(),
                body,
            });
        }
        parse_articles(&body)
    }
}

#[async_trait]
impl NewsSource for NewsClient {
    async fn fetch_articles(&self, api_key: &str) -> Result<Vec<Article>, DigestError> {
        let today = chrono::Local::now().date_naive();
        let query = NewsQuery::last_days(today, self.lookback_days, self.page_size);
        let url = query.to_url(&self.base_url, api_key)?;

        info!(from = %query.from, page_size = query.page_size, "Fetching fraud news");

        let strategy = news_retry_schedule().map(jitter);
        let articles = RetryIf::start(
            strategy,
            || self.fetch_once(&url),
            |e: &DigestError| {
                let transient = e.is_transient();
                if transient {
                    warn!("Retrying news fetch after transient error: {}", e);
                }
                transient
            },
        )
        .await?;

        info!("Fetched {} articles", articles.len());
        Ok(articles)
    }
}
