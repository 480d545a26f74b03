//! Network substrate error types

use thiserror::Error;

/// Provider-independent classification of a failed remote call.
///
/// Provider SDKs report failures with their own string codes
/// (`InvalidVpcID.NotFound`, `InvalidGroup.Duplicate`, ...). Those codes are
/// mapped onto this enum once, at the provider boundary, and the rest of the
/// crate only ever matches on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The referenced resource does not exist
    NotFound,
    /// An identifier was not well formed for the resource kind
    Malformed,
    /// A resource with the same name already exists
    Duplicate,
    /// Credentials are missing or not allowed to perform the call
    Unauthorized,
    /// Request rate exceeded
    Throttled,
    /// Anything else, including transport failures
    Other,
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderErrorKind::NotFound => write!(f, "not found"),
            ProviderErrorKind::Malformed => write!(f, "malformed"),
            ProviderErrorKind::Duplicate => write!(f, "duplicate"),
            ProviderErrorKind::Unauthorized => write!(f, "unauthorized"),
            ProviderErrorKind::Throttled => write!(f, "throttled"),
            ProviderErrorKind::Other => write!(f, "other"),
        }
    }
}

/// A failed remote call, already classified
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,

    /// Provider-specific reason code, kept for diagnostics
    pub code: Option<String>,

    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Whether the provider answered "no such resource" (or "that is not even
    /// an identifier"), which lookups treat as an empty result.
    pub fn is_absent(&self) -> bool {
        matches!(
            self.kind,
            ProviderErrorKind::NotFound | ProviderErrorKind::Malformed
        )
    }
}

/// Network substrate errors
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("{0}")]
    NotFound(String),

    #[error("vpc mismatch: expected '{group}' to have vpc '{expected}', got '{actual}'")]
    Mismatch {
        group: String,
        expected: String,
        actual: String,
    },

    #[error("{context}: a resource with that name already exists ({source})")]
    AlreadyExists {
        context: String,
        #[source]
        source: ProviderError,
    },

    #[error("{context}: referenced resource not found ({source})")]
    ReferenceNotFound {
        context: String,
        #[source]
        source: ProviderError,
    },

    #[error("{context}: {source}")]
    ProviderRejected {
        context: String,
        #[source]
        source: ProviderError,
    },

    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("no unused CIDR block left to allocate")]
    CidrExhausted,
}

impl NetworkError {
    /// The one translation policy applied to every failed remote call.
    ///
    /// Only the kind decides the domain variant; the provider reason code
    /// survives inside [`ProviderError`].
    pub fn from_provider(context: impl Into<String>, source: ProviderError) -> Self {
        let context = context.into();
        match source.kind {
            ProviderErrorKind::Duplicate => NetworkError::AlreadyExists { context, source },
            ProviderErrorKind::NotFound => NetworkError::ReferenceNotFound { context, source },
            _ => NetworkError::ProviderRejected { context, source },
        }
    }

    /// The classified provider error, if this error came from a remote call
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            NetworkError::AlreadyExists { source, .. }
            | NetworkError::ReferenceNotFound { source, .. }
            | NetworkError::ProviderRejected { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Provider reason code, if this error came from a remote call
    pub fn provider_code(&self) -> Option<&str> {
        self.provider_error().and_then(|e| e.code.as_deref())
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Result of a single remote call
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message_names_both_vpcs() {
        let err = NetworkError::Mismatch {
            group: "web-sg".to_string(),
            expected: "vpc-111".to_string(),
            actual: "vpc-999".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("vpc-111"));
        assert!(msg.contains("vpc-999"));
        assert!(msg.contains("web-sg"));
    }

    #[test]
    fn test_provider_rejected_keeps_code() {
        let source = ProviderError::new(ProviderErrorKind::Throttled, "Rate exceeded")
            .with_code("RequestLimitExceeded");
        let err = NetworkError::from_provider("unable to describe VPCs", source);

        assert_eq!(err.provider_code(), Some("RequestLimitExceeded"));
        assert_eq!(err.to_string(), "unable to describe VPCs: Rate exceeded");
    }

    #[test]
    fn test_translation_follows_kind() {
        let dup = ProviderError::new(ProviderErrorKind::Duplicate, "exists")
            .with_code("InvalidGroup.Duplicate");
        let err = NetworkError::from_provider("unable to create security group 'web'", dup);
        assert!(matches!(err, NetworkError::AlreadyExists { .. }));
        assert_eq!(err.provider_code(), Some("InvalidGroup.Duplicate"));

        let missing = ProviderError::new(ProviderErrorKind::NotFound, "no such vpc");
        let err = NetworkError::from_provider("unable to create security group 'web'", missing);
        assert!(matches!(err, NetworkError::ReferenceNotFound { .. }));

        let other = ProviderError::new(ProviderErrorKind::Unauthorized, "denied");
        let err = NetworkError::from_provider("unable to describe VPCs", other);
        assert!(matches!(err, NetworkError::ProviderRejected { .. }));
        assert!(err.provider_code().is_none());
    }

    #[test]
    fn test_absent_kinds() {
        assert!(ProviderError::new(ProviderErrorKind::NotFound, "x").is_absent());
        assert!(ProviderError::new(ProviderErrorKind::Malformed, "x").is_absent());
        assert!(!ProviderError::new(ProviderErrorKind::Duplicate, "x").is_absent());
        assert!(!ProviderError::new(ProviderErrorKind::Other, "x").is_absent());
    }
}
