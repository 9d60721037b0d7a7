//! Domain-level error types.

use std::fmt;

use thiserror::Error;

/// Caller-facing status classification, named after the gRPC status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    InvalidArgument,
    NotFound,
    Internal,
}

impl Code {
    /// Canonical upper-snake name, e.g. `NOT_FOUND`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::NotFound => "NOT_FOUND",
            Code::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain errors - failures surfaced by the post service.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn post_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "post",
            id: id.into(),
        }
    }

    /// The caller-facing status this error maps to.
    pub fn code(&self) -> Code {
        match self {
            DomainError::InvalidArgument(_) => Code::InvalidArgument,
            DomainError::NotFound { .. } => Code::NotFound,
            DomainError::Internal(_) => Code::Internal,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_codes() {
        assert_eq!(
            DomainError::invalid_argument("title is required").code(),
            Code::InvalidArgument
        );
        assert_eq!(DomainError::post_not_found("abc").code(), Code::NotFound);
        assert_eq!(
            DomainError::Internal("boom".to_string()).code(),
            Code::Internal
        );
    }

    #[test]
    fn test_not_found_message_names_id() {
        let err = DomainError::post_not_found("abc");
        assert_eq!(err.to_string(), "post not found: abc");
    }

    #[test]
    fn test_code_names() {
        assert_eq!(Code::InvalidArgument.as_str(), "INVALID_ARGUMENT");
        assert_eq!(Code::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(Code::Internal.to_string(), "INTERNAL");
    }
}
