//! News search integration

pub mod client;

pub use client::{
    FRAUD_NEWS_QUERY, NewsClient, NewsQuery, NewsSource, news_retry_schedule, parse_articles,
};
