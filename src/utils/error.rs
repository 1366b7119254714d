use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Errors raised by the store and the resolvers.
///
/// Cloneable so that batch loaders can hand the same failure to every
/// waiting field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Failed to add comment")]
    CommentRejected,
    #[error("Comment text is required")]
    EmptyCommentText,
    #[error("Token error: {0}")]
    Token(String),
    #[error("Store error: {0}")]
    Store(String),
}

impl AppError {
    /// Machine readable code placed under `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials | AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::EmptyCommentText => "BAD_USER_INPUT",
            AppError::CommentRejected | AppError::Token(_) | AppError::Store(_) => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_code_is_attached() {
        let err = AppError::EmptyCommentText.extend();
        assert_eq!(err.message, "Comment text is required");

        let extensions = serde_json::to_value(&err.extensions).unwrap();
        assert_eq!(extensions["code"], "BAD_USER_INPUT");
    }

    #[test]
    fn test_masked_comment_error_hides_cause() {
        let err = AppError::CommentRejected;
        assert!(!err.to_string().to_lowercase().contains("auth"));
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
    }
}
