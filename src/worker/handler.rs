#![allow(clippy::missing_errors_doc)]
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};

use super::digest::DigestAgent;
use crate::core::config::AppConfig;
use crate::core::models::HandlerResponse;
use crate::core::secrets::SecretsManagerProvider;
use crate::delivery::{LinkedInPoster, SesEmailSender};
use crate::news::NewsClient;

/// Lambda handler for the digest agent. The event payload is ignored.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<HandlerResponse, Error> {
    let run_id = uuid::Uuid::new_v4();
    let span = info_span!("digest_run", %run_id, request_id = %event.context.request_id);

    async move {
        info!("Agent starting...");
        let config = AppConfig::from_env().map_err(|e| {
            error!("Config error: {}", e);
            Error::from(e)
        })?;

        let shared = aws_config::from_env()
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let secrets = SecretsManagerProvider::new(
            aws_sdk_secretsmanager::Client::new(&shared),
            config.secret_name.clone(),
        );
        let news = NewsClient::new(&config);
        let email = SesEmailSender::new(aws_sdk_ses::Client::new(&shared));
        let social = LinkedInPoster::new(config.linkedin_api_url.clone());

        let agent = DigestAgent {
            secrets: &secrets,
            news: &news,
            email: &email,
            social: &social,
        };

        let today = chrono::Local::now().date_naive();
        agent.respond(today).await.map_err(Error::from)
    }
    .instrument(span)
    .await
}

pub use self::function_handler as handler;
