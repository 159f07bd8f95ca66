use thiserror::Error;
use youtube_client::YouTubeError;

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Failures that stop a run before it starts.
///
/// Remote failures during a run are degraded to "skip this unit" and never
/// surface here; `Remote` exists for callers that talk to the API directly.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("YT_API_KEY is missing or empty")]
    MissingCredential,

    #[error("Invalid channel reference: {0:?}")]
    InvalidChannelRef(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Remote(#[from] YouTubeError),
}
