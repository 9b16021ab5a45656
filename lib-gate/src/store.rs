use crate::{
  clock::Clock,
  cookie::{Cookie, CookieJar, SameSite},
  error::*,
  log::*,
  GateConfig,
};
use chrono::TimeDelta;
use libcommon::token_fields::{Field, SessionToken, TryNewField};

/// Session store holding at most one session record in a cookie
pub struct SessionStore<J, C>
where
  J: CookieJar,
  C: Clock,
{
  jar: J,
  clock: C,
  cookie_name: String,
  cookie_path: String,
  same_site: SameSite,
  retention_days: i64,
}

impl<J, C> SessionStore<J, C>
where
  J: CookieJar,
  C: Clock,
{
  pub fn new(config: &GateConfig, jar: J, clock: C) -> Self {
    Self {
      jar,
      clock,
      cookie_name: config.cookie_name.clone(),
      cookie_path: config.cookie_path.clone(),
      same_site: config.same_site,
      retention_days: config.retention_days,
    }
  }

  /// Current session record if any. Unreadable records are absent.
  pub fn get(&self) -> Option<SessionToken> {
    let cookie = match self.jar.get(&self.cookie_name, self.clock.now()) {
      Ok(cookie) => cookie?,
      Err(e) => {
        warn!("Failed to read session cookie: {e}");
        return None;
      }
    };
    match SessionToken::new(cookie.value) {
      Ok(token) => Some(token),
      Err(e) => {
        debug!("Ignored unusable session cookie: {e}");
        None
      }
    }
  }

  /// Replace the session record, retained for `retention_days`
  pub fn set(&self, token: &SessionToken, retention_days: i64) -> GateResult<()> {
    let now = self.clock.now();
    let expires = TimeDelta::try_days(retention_days)
      .and_then(|retention| now.checked_add_signed(retention))
      .ok_or(GateError::RetentionOutOfRange(retention_days))?;
    let cookie = Cookie {
      name: self.cookie_name.clone(),
      value: token.as_str().to_string(),
      path: self.cookie_path.clone(),
      same_site: self.same_site,
      expires,
    };
    self.jar.put(cookie, now)
  }

  /// Replace the session record with the configured retention
  pub fn set_default(&self, token: &SessionToken) -> GateResult<()> {
    self.set(token, self.retention_days)
  }

  /// Delete the session record. No-op if there is none.
  pub fn remove(&self) -> GateResult<()> {
    self.jar.put(
      Cookie::removal(&self.cookie_name, &self.cookie_path, self.same_site),
      self.clock.now(),
    )
  }

  pub fn clock(&self) -> &C {
    &self.clock
  }

  pub fn jar(&self) -> &J {
    &self.jar
  }
}
