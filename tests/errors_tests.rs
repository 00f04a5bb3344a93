use fraud_digest::errors::DigestError;
use fraud_digest::pipeline::PipelineError;
use std::error::Error;
use std::path::PathBuf;

#[test]
fn test_digest_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = DigestError::SecretsError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_digest_error_display() {
    let error = DigestError::MissingSecret("SENDER_EMAIL and RECIPIENT_EMAIL".to_string());
    assert_eq!(
        format!("{error}"),
        "SENDER_EMAIL and RECIPIENT_EMAIL must be in secrets"
    );

    let error = DigestError::NewsApiError {
        status: 401,
        body: "apiKeyInvalid".to_string(),
    };
    assert_eq!(format!("{error}"), "News API returned 401: apiKeyInvalid");

    let error = DigestError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );
}

#[test]
fn test_transient_classification() {
    assert!(DigestError::HttpError("reset".into()).is_transient());
    assert!(
        DigestError::NewsApiError {
            status: 503,
            body: String::new()
        }
        .is_transient()
    );
    assert!(
        DigestError::NewsApiError {
            status: 429,
            body: String::new()
        }
        .is_transient()
    );
    assert!(
        !DigestError::NewsApiError {
            status: 401,
            body: String::new()
        }
        .is_transient()
    );
    assert!(!DigestError::MissingSecret("X".into()).is_transient());
}

#[test]
fn test_digest_error_from_conversions() {
    let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let digest_err: DigestError = err.into();
    assert!(matches!(digest_err, DigestError::SerializationError(_)));

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> DigestError {
        DigestError::from(err)
    }
}

#[test]
fn test_pipeline_error_display() {
    let error = PipelineError::ManifestMissing {
        path: PathBuf::from("missing/Cargo.toml"),
    };
    assert_eq!(
        format!("{error}"),
        "dependency manifest not found at missing/Cargo.toml"
    );

    let error = PipelineError::Deploy {
        function: "FraudNewsAgent".to_string(),
        detail: "AccessDenied".to_string(),
    };
    assert_eq!(
        format!("{error}"),
        "failed to update function FraudNewsAgent: AccessDenied"
    );
}
