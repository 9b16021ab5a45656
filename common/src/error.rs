use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

/// Describes things that can go wrong while reading claims out of a token
#[derive(Debug, Error)]
pub enum CodecError {
  #[error("Token must consist of {expected} segments, found {found}")]
  SegmentCount { expected: usize, found: usize },
  #[error("Failed to decode claims segment: {0}")]
  Base64(#[from] base64::DecodeError),
  #[error("Failed to parse claims: {0}")]
  Json(#[from] serde_json::Error),
  #[error("No exp in token claims")]
  NoExpiration,
}
