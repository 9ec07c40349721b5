use thiserror::Error;

/// Result type for live pricing adapter operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors a live pricing adapter can produce.
///
/// None of these escape the pricing-resolution boundary: the unified service
/// logs them and degrades to "unavailable", letting the caller fall back to
/// the static rate card.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u64),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),
}
