use thiserror::Error;

pub type GateResult<T> = Result<T, GateError>;

/// Describes things that can go wrong below the gate. None of them crosses the gate itself.
#[derive(Debug, Error)]
pub enum GateError {
  #[error("Failed to access cookie jar: {0}")]
  CookieJarIo(#[from] std::io::Error),
  #[error("Malformed cookie jar: {0}")]
  CookieJarFormat(#[from] serde_json::Error),
  #[error("Cookie jar lock is poisoned")]
  CookieJarPoisoned,
  #[error("Retention of {0} days is out of range")]
  RetentionOutOfRange(i64),
}
