use async_trait::async_trait;
use aws_sdk_secretsmanager::Client as SecretsClient;
use tracing::{error, info};

use super::models::DigestSecrets;
use crate::errors::DigestError;

/// Source of the agent's API keys and addressing.
#[async_trait]
pub trait SecretsProvider: Send + Sync {
    async fn load(&self) -> Result<DigestSecrets, DigestError>;
}

/// Reads the digest secret from AWS Secrets Manager.
pub struct SecretsManagerProvider {
    client: SecretsClient,
    secret_name: String,
}

impl SecretsManagerProvider {
    #[must_use]
    pub fn new(client: SecretsClient, secret_name: impl Into<String>) -> Self {
        Self {
            client,
            secret_name: secret_name.into(),
        }
    }
}

#[async_trait]
impl SecretsProvider for SecretsManagerProvider {
    async fn load(&self) -> Result<DigestSecrets, DigestError> {
        let resp = self
            .client
            .get_secret_value()
            .secret_id(&self.secret_name)
            .send()
            .await
            .map_err(|e| {
                error!("Unable to retrieve secrets: {}", e);
                DigestError::SecretsError(format!("get_secret_value {}: {e}", self.secret_name))
            })?;

        let Some(raw) = resp.secret_string() else {
            return Err(DigestError::SecretsError(format!(
                "secret {} has no SecretString",
                self.secret_name
            )));
        };

        let secrets = parse_secret_string(raw)?;
        info!(secret = %self.secret_name, "Loaded secrets");
        Ok(secrets)
    }
}

/// # Errors
///
/// Returns an error if the secret is not a JSON object with `NEWS_API_KEY`.
pub fn parse_secret_string(raw: &str) -> Result<DigestSecrets, DigestError> {
    serde_json::from_str(raw)
        .map_err(|e| DigestError::SecretsError(format!("secret parse: {e}")))
}
