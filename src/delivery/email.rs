use async_trait::async_trait;
use aws_sdk_ses::Client as SesClient;
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use tracing::info;

use crate::core::models::EmailRoute;
use crate::errors::DigestError;

/// Rendered email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, route: &EmailRoute, email: &OutgoingEmail) -> Result<(), DigestError>;
}

/// Sends the digest through Amazon SES.
pub struct SesEmailSender {
    client: SesClient,
}

impl SesEmailSender {
    #[must_use]
    pub fn new(client: SesClient) -> Self {
        Self { client }
    }
}

fn utf8_content(data: &str) -> Result<Content, DigestError> {
    Ok(Content::builder().data(data).charset("UTF-8").build()?)
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send(&self, route: &EmailRoute, email: &OutgoingEmail) -> Result<(), DigestError> {
        if route.recipients.is_empty() {
            return Err(DigestError::ConfigError(
                "RECIPIENT_EMAIL has no addresses".to_string(),
            ));
        }

        let destination = Destination::builder()
            .set_to_addresses(Some(route.recipients.clone()))
            .build();
        let body = Body::builder()
            .html(utf8_content(&email.html)?)
            .text(utf8_content(&email.text)?)
            .build();
        let message = Message::builder()
            .subject(utf8_content(&email.subject)?)
            .body(body)
            .build();

        self.client
            .send_email()
            .source(&route.sender)
            .destination(destination)
            .message(message)
            .send()
            .await?;

        info!(
            "Email sent successfully to: {}",
            route.recipients.join(", ")
        );
        Ok(())
    }
}
