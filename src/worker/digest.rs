use chrono::NaiveDate;
use tracing::{error, info};

use crate::core::models::HandlerResponse;
use crate::core::secrets::SecretsProvider;
use crate::delivery::{EmailSender, OutgoingEmail, PostOutcome, SocialPoster};
use crate::digest::{
    email_subject, format_digest_for_email, format_digest_for_linkedin, plain_text_alternative,
};
use crate::errors::DigestError;
use crate::news::NewsSource;

/// Collaborators for one digest run.
pub struct DigestAgent<'a> {
    pub secrets: &'a dyn SecretsProvider,
    pub news: &'a dyn NewsSource,
    pub email: &'a dyn EmailSender,
    pub social: &'a dyn SocialPoster,
}

/// What a run actually delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestSummary {
    pub article_count: usize,
    pub email_sent: bool,
    pub social_outcome: Option<PostOutcome>,
}

impl DigestAgent<'_> {
    /// Runs one digest: secrets, news, email flow, then social flow.
    ///
    /// Email delivery failures are logged and do not fail the run.
    ///
    /// # Errors
    ///
    /// Returns an error if secrets cannot be loaded or lack the email keys,
    /// if the news fetch fails, or if the social post cannot be sent at all.
    pub async fn run(&self, today: NaiveDate) -> Result<DigestSummary, DigestError> {
        let secrets = self.secrets.load().await?;
        let route = secrets.email_route()?;

        let articles = self.news.fetch_articles(&secrets.news_api_key).await?;

        // 1. Email flow
        let html = format_digest_for_email(&articles);
        let email = OutgoingEmail {
            subject: email_subject(today),
            text: plain_text_alternative(&html),
            html,
        };
        let email_sent = match self.email.send(&route, &email).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error sending email: {}", e);
                false
            }
        };

        // 2. LinkedIn flow
        let social_outcome = match format_digest_for_linkedin(&articles) {
            Some(post_text) => Some(self.social.publish(&secrets, &post_text).await?),
            None => {
                info!("No content to post to LinkedIn.");
                None
            }
        };

        Ok(DigestSummary {
            article_count: articles.len(),
            email_sent,
            social_outcome,
        })
    }

    /// Runs the digest and maps the result to the Lambda response payload.
    ///
    /// # Errors
    ///
    /// See [`DigestAgent::run`].
    pub async fn respond(&self, today: NaiveDate) -> Result<HandlerResponse, DigestError> {
        match self.run(today).await {
            Ok(summary) => {
                info!(
                    articles = summary.article_count,
                    email_sent = summary.email_sent,
                    "Agent finished."
                );
                Ok(HandlerResponse::completed())
            }
            Err(e) => {
                error!("An error occurred: {}", e);
                Err(e)
            }
        }
    }
}
