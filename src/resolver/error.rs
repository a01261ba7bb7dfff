use thiserror::Error;

/// Failures the resolver surfaces to the router.
///
/// Quota exhaustion and a failed related-hashtags call are not here: both
/// are recovered inside the resolver and show up as annotated results.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0}")]
    Configuration(String),

    #[error("{provider} API error: {status} - {body}")]
    Upstream {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid API response: {0}")]
    InvalidResponseShape(String),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] worker::Error),
}
