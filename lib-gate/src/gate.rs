use crate::{
  clock::Clock,
  constants::RECHECK_INTERVAL_SEC,
  cookie::CookieJar,
  location::{extract_url_token, scrub_url, Location},
  log::*,
  store::SessionStore,
  verdict::{DenialReason, GateState, Verdict},
  GateConfig,
};
use libcommon::{
  token_fields::{Field, SessionToken, TryNewField},
  Claims,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::{
  sync::watch,
  task::JoinHandle,
  time::{interval_at, Duration, Instant, MissedTickBehavior},
};

/// Decision of an admission check, before any side effect is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
  /// Fresh token found in the url. It replaces the session record and is scrubbed from the url.
  FromUrl(SessionToken),
  /// Stored session record is still fresh
  FromStore,
  /// Not admitted. The session record is cleared if `clear_store`.
  Denied { reason: DenialReason, clear_store: bool },
}

/// Admission decision from the url candidate and the session record at `now` (unix time in secs).
/// A url candidate, even an expired one, shadows the session record.
pub fn admit(url_token: Option<&str>, stored: Option<&SessionToken>, now: i64) -> Admission {
  if let Some(candidate) = url_token {
    return match SessionToken::new(candidate) {
      Ok(token) if !token.is_expired_at(now) => Admission::FromUrl(token),
      _ => Admission::Denied {
        reason: DenialReason::UrlTokenExpired,
        clear_store: true,
      },
    };
  }

  match stored {
    None => Admission::Denied {
      reason: DenialReason::NoToken,
      clear_store: false,
    },
    Some(token) if token.is_expired_at(now) => Admission::Denied {
      reason: DenialReason::SessionExpired,
      clear_store: true,
    },
    Some(_) => Admission::FromStore,
  }
}

/* ---------------------------------------------------- */
/// Session admission gate.
///
/// Admits the client on a fresh token found in the url or in the session store,
/// publishes the resulting [`GateState`], and re-checks the stored token on a fixed period
/// between [`SessionGate::start`] and [`SessionGate::stop`] (or drop).
/// No operation returns an error: every failure ends up as a denial.
pub struct SessionGate<J, L, C>
where
  J: CookieJar + 'static,
  L: Location + 'static,
  C: Clock + 'static,
{
  inner: Arc<GateInner<J, L, C>>,
  recheck: Mutex<Option<JoinHandle<()>>>,
}

struct GateInner<J, L, C>
where
  J: CookieJar,
  L: Location,
  C: Clock,
{
  config: GateConfig,
  store: SessionStore<J, C>,
  location: L,
  state: watch::Sender<GateState>,
}

impl<J, L, C> SessionGate<J, L, C>
where
  J: CookieJar + 'static,
  L: Location + 'static,
  C: Clock + 'static,
{
  /// Build a gate in CHECKING state. Nothing is read until `start` or `check_auth`.
  pub fn new(config: GateConfig, jar: J, location: L, clock: C) -> Self {
    let store = SessionStore::new(&config, jar, clock);
    let (state, _) = watch::channel(GateState::Checking);
    Self {
      inner: Arc::new(GateInner {
        config,
        store,
        location,
        state,
      }),
      recheck: Mutex::new(None),
    }
  }

  /// Run the admission check and start the periodic expiry check.
  /// The periodic check needs a tokio runtime; without one only the admission check runs.
  pub fn start(&self) -> GateState {
    let state = self.check_auth();
    self.spawn_recheck();
    state
  }

  /// Cancel the periodic expiry check. Idempotent.
  pub fn stop(&self) {
    if let Some(handle) = self.recheck_lock().take() {
      handle.abort();
      debug!("Periodic session check stopped");
    }
  }

  /// Whether the periodic expiry check is running
  pub fn is_running(&self) -> bool {
    self.recheck_lock().as_ref().is_some_and(|h| !h.is_finished())
  }

  /// Admission check: url token first, then the session record.
  /// A url token that gets admitted is scrubbed from the visible url afterwards.
  pub fn check_auth(&self) -> GateState {
    let admission = self.inner.evaluate();
    let state = self.inner.apply(admission.clone());
    if matches!(admission, Admission::FromUrl(_)) {
      self.scrub_location();
    }
    state
  }

  /// Remove the token query parameters from the visible url without navigating
  pub fn scrub_location(&self) {
    let href = self.inner.location.href();
    let scrubbed = scrub_url(&href, &self.inner.config.url_token_params);
    if scrubbed != href {
      self.inner.location.replace_state(scrubbed);
      debug!("Token parameters removed from the url");
    }
  }

  /// Deny if the stored token has expired, otherwise leave the state untouched
  pub fn check_token_expiration(&self) -> GateState {
    self.inner.check_token_expiration()
  }

  /// Clear the session record and deny, whatever the current state
  pub fn logout(&self) -> GateState {
    self.inner.clear_store();
    self.inner.publish(GateState::Denied(DenialReason::LoggedOut));
    info!("Logged out");
    self.state()
  }

  /// Go back to CHECKING and run the admission check again, as a page reload does
  pub fn reload(&self) -> GateState {
    self.inner.publish(GateState::Checking);
    self.check_auth()
  }

  pub fn state(&self) -> GateState {
    *self.inner.state.borrow()
  }

  pub fn verdict(&self) -> Verdict {
    self.state().verdict()
  }

  /// Watch the gate state. The current state is marked as seen.
  pub fn subscribe(&self) -> watch::Receiver<GateState> {
    self.inner.state.subscribe()
  }

  /// Stored session token, only while admitted and still fresh
  pub fn session_token(&self) -> Option<SessionToken> {
    if !self.state().is_admitted() {
      return None;
    }
    let now = self.inner.store.clock().unix_seconds();
    self.inner.store.get().filter(|t| !t.is_expired_at(now))
  }

  /// `Authorization` header value for requests made on behalf of the admitted client
  pub fn bearer_authorization(&self) -> Option<String> {
    self.session_token().map(|t| format!("Bearer {}", t.as_str()))
  }

  /// Claims of the stored token, signature unchecked
  pub fn claims(&self) -> Option<Claims> {
    self.inner.store.get()?.claims().ok()
  }

  /// Remaining seconds until the stored token expires
  pub fn remaining_seconds(&self) -> Option<i64> {
    let expires_at = self.claims()?.exp?;
    Some(expires_at.saturating_sub(self.inner.store.clock().unix_seconds()))
  }

  pub fn config(&self) -> &GateConfig {
    &self.inner.config
  }

  pub fn location(&self) -> &L {
    &self.inner.location
  }

  pub fn store(&self) -> &SessionStore<J, C> {
    &self.inner.store
  }

  fn spawn_recheck(&self) {
    let mut lock = self.recheck_lock();
    if lock.as_ref().is_some_and(|h| !h.is_finished()) {
      return;
    }
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
      error!("No async runtime, periodic session check is not started");
      return;
    };

    let period = match self.inner.config.recheck_interval {
      p if p.is_zero() => Duration::from_secs(RECHECK_INTERVAL_SEC),
      p => p,
    };
    let inner = self.inner.clone();
    let first_tick = Instant::now() + period;
    let handle = runtime.spawn(async move {
      let mut ticker = interval_at(first_tick, period);
      ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
      loop {
        ticker.tick().await;
        inner.check_token_expiration();
      }
    });
    *lock = Some(handle);
    debug!("Periodic session check started: every {} secs", period.as_secs());
  }

  fn recheck_lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
    match self.recheck.lock() {
      Ok(lock) => lock,
      Err(poisoned) => poisoned.into_inner(),
    }
  }
}

impl<J, L, C> Drop for SessionGate<J, L, C>
where
  J: CookieJar + 'static,
  L: Location + 'static,
  C: Clock + 'static,
{
  fn drop(&mut self) {
    self.stop();
  }
}

impl<J, L, C> GateInner<J, L, C>
where
  J: CookieJar,
  L: Location,
  C: Clock,
{
  fn evaluate(&self) -> Admission {
    let href = self.location.href();
    let url_token = extract_url_token(&href, &self.config.url_token_params);
    let stored = match url_token {
      Some(_) => None,
      None => self.store.get(),
    };
    admit(url_token.as_deref(), stored.as_ref(), self.store.clock().unix_seconds())
  }

  fn apply(&self, admission: Admission) -> GateState {
    let next = match admission {
      Admission::FromUrl(token) => {
        if let Err(e) = self.store.set_default(&token) {
          error!("Failed to persist session token: {e}");
        }
        info!("Admitted with url token");
        GateState::Admitted
      }
      Admission::FromStore => GateState::Admitted,
      Admission::Denied { reason, clear_store } => {
        if clear_store {
          self.clear_store();
        }
        GateState::Denied(reason)
      }
    };
    self.publish(next);
    next
  }

  fn check_token_expiration(&self) -> GateState {
    let now = self.store.clock().unix_seconds();
    if let Some(token) = self.store.get() {
      if token.is_expired_at(now) {
        self.clear_store();
        self.publish(GateState::Denied(DenialReason::SessionExpired));
      }
    }
    *self.state.borrow()
  }

  fn clear_store(&self) {
    if let Err(e) = self.store.remove() {
      error!("Failed to clear session token: {e}");
    }
  }

  fn publish(&self, next: GateState) {
    let changed = self.state.send_if_modified(|current| {
      if *current == next {
        return false;
      }
      *current = next;
      true
    });
    if changed {
      info!("Session gate: {next}");
    }
  }
}
