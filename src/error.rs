use thiserror::Error;

/// Failures surfaced to the user. None of them end the session; every
/// variant renders as an inline state the user can retry from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortfolioError {
    /// Network failure or a `success: false` envelope while reading content.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Client-side form rules, reported together.
    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("Could not send your message: {0}")]
    SubmissionFailed(String),

    #[error("Category not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
