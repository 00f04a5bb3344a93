//! Fraud Digest - a weekly fraud and security news digest agent for AWS Lambda.
//!
//! This crate contains two deliverables:
//! 1. The digest agent Lambda (`bootstrap`), which reads its API keys from
//!    Secrets Manager, fetches the week's top fraud news, emails an HTML digest
//!    through SES and shares the top stories on LinkedIn
//! 2. The deploy tool (`fraud-digest-deploy`), a fail-fast build, package and
//!    `UpdateFunctionCode` pipeline run by CI on every push to `main`
//!
//! # Example
//!
//! ```no_run
//! use fraud_digest::core::config::AppConfig;
//! use fraud_digest::digest::{format_digest_for_email, format_digest_for_linkedin};
//! use fraud_digest::news::{NewsClient, NewsSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     fraud_digest::setup_logging();
//!
//!     let config = AppConfig::default();
//!     let articles = NewsClient::new(&config).fetch_articles("dummy_key").await?;
//!
//!     println!("{}", format_digest_for_email(&articles));
//!     if let Some(post) = format_digest_for_linkedin(&articles) {
//!         println!("{post}");
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod core;
pub mod delivery;
pub mod digest;
pub mod errors;
pub mod news;
pub mod pipeline;
pub mod worker;

pub use errors::DigestError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. The level comes from `RUST_LOG` and defaults
/// to `info` (`debug` with the `debug-logs` feature). Calling it more than once
/// is harmless.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// fraud_digest::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;

    let default_level = if cfg!(feature = "debug-logs") {
        "debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
