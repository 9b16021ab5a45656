use serde::Serialize;
use std::fmt;

/// Why a client is not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialReason {
  /// Token carried in the url was already expired
  UrlTokenExpired,
  /// Stored session token expired
  SessionExpired,
  /// Neither the url nor the store had a token
  NoToken,
  /// Session was closed explicitly
  LoggedOut,
}

impl DenialReason {
  pub fn message(&self) -> &'static str {
    match self {
      DenialReason::UrlTokenExpired => "URL token expired",
      DenialReason::SessionExpired => "session expired, obtain a new token",
      DenialReason::NoToken => "no token provided",
      DenialReason::LoggedOut => "logged out",
    }
  }
}

impl fmt::Display for DenialReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}

/// Gate state. CHECKING only until the first admission check completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
  #[default]
  Checking,
  Admitted,
  Denied(DenialReason),
}

impl GateState {
  pub fn is_admitted(&self) -> bool {
    matches!(self, GateState::Admitted)
  }

  pub fn denial_reason(&self) -> Option<DenialReason> {
    match self {
      GateState::Denied(reason) => Some(*reason),
      _ => None,
    }
  }

  /// Verdict as published to the rest of the application
  pub fn verdict(&self) -> Verdict {
    Verdict {
      authenticated: self.is_admitted(),
      error: self.denial_reason().map(|r| r.message().to_string()),
    }
  }
}

impl fmt::Display for GateState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateState::Checking => f.write_str("checking"),
      GateState::Admitted => f.write_str("admitted"),
      GateState::Denied(reason) => write!(f, "denied ({reason})"),
    }
  }
}

/// Admission verdict. Derived on every check, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
  pub authenticated: bool,
  pub error: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn verdict_of_each_state() {
    assert_eq!(
      GateState::Checking.verdict(),
      Verdict {
        authenticated: false,
        error: None
      }
    );
    assert_eq!(
      GateState::Admitted.verdict(),
      Verdict {
        authenticated: true,
        error: None
      }
    );
    assert_eq!(
      GateState::Denied(DenialReason::NoToken).verdict(),
      Verdict {
        authenticated: false,
        error: Some("no token provided".to_string())
      }
    );
  }

  #[test]
  fn verdict_json() -> anyhow::Result<()> {
    let json = serde_json::to_string(&GateState::Denied(DenialReason::LoggedOut).verdict())?;
    assert_eq!(json, r#"{"authenticated":false,"error":"logged out"}"#);
    Ok(())
  }
}
