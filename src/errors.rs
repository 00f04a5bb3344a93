use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to retrieve secrets: {0}")]
    SecretsError(String),

    #[error("{0} must be in secrets")]
    MissingSecret(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("News API returned {status}: {body}")]
    NewsApiError { status: u16, body: String },

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to (de)serialize payload: {0}")]
    SerializationError(String),
}

impl DigestError {
    /// Whether a retry of the same request could reasonably succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            DigestError::HttpError(_) => true,
            DigestError::NewsApiError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for DigestError {
    fn from(error: reqwest::Error) -> Self {
        DigestError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for DigestError {
    fn from(error: serde_json::Error) -> Self {
        DigestError::SerializationError(error.to_string())
    }
}

// Generic implementation for AWS SDK errors
impl<E> From<aws_sdk_ses::error::SdkError<E>> for DigestError
where
    E: std::fmt::Display,
{
    fn from(error: aws_sdk_ses::error::SdkError<E>) -> Self {
        DigestError::AwsError(error.to_string())
    }
}

impl From<aws_sdk_ses::error::BuildError> for DigestError {
    fn from(error: aws_sdk_ses::error::BuildError) -> Self {
        DigestError::AwsError(format!("request build: {error}"))
    }
}
