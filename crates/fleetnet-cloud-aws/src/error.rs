//! EC2 error classification
//!
//! EC2 reports failures as string codes. They are mapped onto
//! [`ProviderErrorKind`] here and nowhere else.

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use fleetnet_cloud::{ProviderError, ProviderErrorKind};

/// Map an EC2 error code to a provider-independent kind
pub fn classify_code(code: &str) -> ProviderErrorKind {
    match code {
        "UnauthorizedOperation" | "AuthFailure" | "Blocked" | "OptInRequired" => {
            ProviderErrorKind::Unauthorized
        }
        "RequestLimitExceeded" | "Throttling" | "ThrottlingException" => {
            ProviderErrorKind::Throttled
        }
        c if c.ends_with(".NotFound") => ProviderErrorKind::NotFound,
        c if c.ends_with(".Malformed") => ProviderErrorKind::Malformed,
        c if c.ends_with(".Duplicate") => ProviderErrorKind::Duplicate,
        _ => ProviderErrorKind::Other,
    }
}

/// Build a [`ProviderError`] from an optional code and a message
pub fn provider_error(code: Option<&str>, message: impl Into<String>) -> ProviderError {
    match code {
        Some(code) => ProviderError::new(classify_code(code), message).with_code(code),
        None => ProviderError::new(ProviderErrorKind::Other, message),
    }
}

/// Classify a failed SDK call.
///
/// Service errors keep their code and message; transport, timeout and
/// construction failures become [`ProviderErrorKind::Other`] with the full
/// error chain as message.
pub fn from_sdk_error<E, R>(err: SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let code = err.code().map(str::to_string);
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    provider_error(code.as_deref(), message)
}
