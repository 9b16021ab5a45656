mod clock;
mod constants;
mod cookie;
mod error;
mod gate;
mod location;
mod log;
mod presentation;
mod store;
mod verdict;

use std::time::Duration;

pub use crate::{
  clock::{Clock, SystemClock},
  constants::{COOKIE_PATH, DEFAULT_RETENTION_DAYS, JWT_COOKIE_NAME, RECHECK_INTERVAL_SEC, URL_TOKEN_PARAMS},
  cookie::{Cookie, CookieJar, FileCookieJar, MemoryCookieJar, SameSite},
  error::{GateError, GateResult},
  gate::{admit, Admission, SessionGate},
  location::{extract_url_token, scrub_url, Location, MemoryLocation},
  presentation::{DenialSurface, GateView},
  store::SessionStore,
  verdict::{DenialReason, GateState, Verdict},
};
pub mod token {
  pub use libcommon::*;
}

#[derive(PartialEq, Eq, Debug, Clone)]
/// Where the session token lives and how often it is re-checked
pub struct GateConfig {
  /// Name of the session cookie
  pub cookie_name: String,
  /// Path scope of the session cookie
  pub cookie_path: String,
  /// SameSite policy of the session cookie
  pub same_site: SameSite,
  /// Retention of the session cookie in days
  pub retention_days: i64,
  /// Period of the background expiry check
  pub recheck_interval: Duration,
  /// Query parameters that may carry a token, in lookup order
  pub url_token_params: Vec<String>,
}

impl Default for GateConfig {
  fn default() -> Self {
    Self {
      cookie_name: JWT_COOKIE_NAME.to_string(),
      cookie_path: COOKIE_PATH.to_string(),
      same_site: SameSite::Strict,
      retention_days: DEFAULT_RETENTION_DAYS,
      recheck_interval: Duration::from_secs(RECHECK_INTERVAL_SEC),
      url_token_params: URL_TOKEN_PARAMS.iter().map(|p| p.to_string()).collect(),
    }
  }
}

impl GateConfig {
  /// Parameter shown to users as the way to pass a token
  pub fn primary_token_param(&self) -> &str {
    self
      .url_token_params
      .first()
      .map(String::as_str)
      .unwrap_or(URL_TOKEN_PARAMS[0])
  }
}
