use crate::{error::*, log::*};
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::{
  fmt,
  fs,
  path::{Path, PathBuf},
  sync::{Arc, Mutex, RwLock},
};

/// Format of the `Expires` attribute (IMF-fixdate)
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
  Strict,
  Lax,
  None,
}
impl fmt::Display for SameSite {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      SameSite::Strict => "Strict",
      SameSite::Lax => "Lax",
      SameSite::None => "None",
    };
    f.write_str(s)
  }
}

/// A single per-origin key/value slot with its attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
  pub name: String,
  pub value: String,
  pub path: String,
  pub same_site: SameSite,
  pub expires: DateTime<Utc>,
}

impl Cookie {
  /// Deletion form: empty value expiring at the epoch
  pub fn removal(name: &str, path: &str, same_site: SameSite) -> Self {
    Self {
      name: name.to_string(),
      value: String::new(),
      path: path.to_string(),
      same_site,
      expires: DateTime::<Utc>::UNIX_EPOCH,
    }
  }

  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.expires <= now
  }
}

/// Renders the cookie as a `Set-Cookie` header value
impl fmt::Display for Cookie {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}={}; Expires={}; Path={}; SameSite={}",
      self.name,
      self.value,
      self.expires.format(EXPIRES_FORMAT),
      self.path,
      self.same_site
    )
  }
}

/// Durable per-origin cookie storage.
/// Writing a cookie replaces the one with the same name. A cookie whose expiry has passed is gone.
pub trait CookieJar: Send + Sync {
  /// Read a live cookie by name
  fn get(&self, name: &str, now: DateTime<Utc>) -> GateResult<Option<Cookie>>;
  /// Write a cookie in a single step. Cookies expired at `now` are dropped.
  fn put(&self, cookie: Cookie, now: DateTime<Utc>) -> GateResult<()>;
}

impl<T> CookieJar for Arc<T>
where
  T: CookieJar + ?Sized,
{
  fn get(&self, name: &str, now: DateTime<Utc>) -> GateResult<Option<Cookie>> {
    (**self).get(name, now)
  }
  fn put(&self, cookie: Cookie, now: DateTime<Utc>) -> GateResult<()> {
    (**self).put(cookie, now)
  }
}

/* ---------------------------------------------------- */
/// In-process cookie jar
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
  inner: RwLock<HashMap<String, Cookie>>,
}

impl MemoryCookieJar {
  pub fn new() -> Self {
    Self::default()
  }
}

impl CookieJar for MemoryCookieJar {
  fn get(&self, name: &str, now: DateTime<Utc>) -> GateResult<Option<Cookie>> {
    let lock = self.inner.read().map_err(|_| GateError::CookieJarPoisoned)?;
    Ok(lock.get(name).filter(|c| !c.is_expired_at(now)).cloned())
  }

  fn put(&self, cookie: Cookie, now: DateTime<Utc>) -> GateResult<()> {
    let mut lock = self.inner.write().map_err(|_| GateError::CookieJarPoisoned)?;
    lock.retain(|_, c| !c.is_expired_at(now));
    if cookie.is_expired_at(now) {
      lock.remove(&cookie.name);
    } else {
      lock.insert(cookie.name.clone(), cookie);
    }
    Ok(())
  }
}

/* ---------------------------------------------------- */
/// Cookie jar persisted as a JSON file
#[derive(Debug)]
pub struct FileCookieJar {
  path: PathBuf,
  write_lock: Mutex<()>,
}

impl FileCookieJar {
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self {
      path: path.as_ref().to_path_buf(),
      write_lock: Mutex::new(()),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn load(&self) -> GateResult<HashMap<String, Cookie>> {
    match fs::read_to_string(&self.path) {
      Ok(content) if content.trim().is_empty() => Ok(HashMap::default()),
      Ok(content) => Ok(serde_json::from_str(&content)?),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::default()),
      Err(e) => Err(e.into()),
    }
  }

  /// Write to a sibling file then rename over the jar
  fn store(&self, cookies: &HashMap<String, Cookie>) -> GateResult<()> {
    let mut tmp = self.path.clone().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, serde_json::to_vec_pretty(cookies)?)?;
    fs::rename(&tmp, &self.path)?;
    Ok(())
  }
}

impl CookieJar for FileCookieJar {
  fn get(&self, name: &str, now: DateTime<Utc>) -> GateResult<Option<Cookie>> {
    let cookies = self.load()?;
    Ok(cookies.get(name).filter(|c| !c.is_expired_at(now)).cloned())
  }

  fn put(&self, cookie: Cookie, now: DateTime<Utc>) -> GateResult<()> {
    let _guard = self.write_lock.lock().map_err(|_| GateError::CookieJarPoisoned)?;
    let mut cookies = self.load()?;
    cookies.retain(|_, c| !c.is_expired_at(now));
    if cookie.is_expired_at(now) {
      cookies.remove(&cookie.name);
    } else {
      cookies.insert(cookie.name.clone(), cookie);
    }
    self.store(&cookies)?;
    debug!("Cookie jar written: {}", self.path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn cookie(value: &str, expires: DateTime<Utc>) -> Cookie {
    Cookie {
      name: "jwt_token".to_string(),
      value: value.to_string(),
      path: "/".to_string(),
      same_site: SameSite::Strict,
      expires,
    }
  }

  #[test]
  fn set_cookie_string() {
    let expires = DateTime::from_timestamp(1699288976, 0).unwrap();
    assert_eq!(
      cookie("aaa.bbb.ccc", expires).to_string(),
      "jwt_token=aaa.bbb.ccc; Expires=Mon, 06 Nov 2023 16:42:56 GMT; Path=/; SameSite=Strict"
    );
    assert_eq!(
      Cookie::removal("jwt_token", "/", SameSite::Strict).to_string(),
      "jwt_token=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; SameSite=Strict"
    );
  }

  #[test]
  fn memory_jar_replaces_and_expires() -> anyhow::Result<()> {
    let jar = MemoryCookieJar::new();
    let now = Utc::now();
    assert!(jar.get("jwt_token", now)?.is_none());

    jar.put(cookie("first", now + Duration::days(1)), now)?;
    jar.put(cookie("second", now + Duration::days(1)), now)?;
    assert_eq!(jar.get("jwt_token", now)?.map(|c| c.value), Some("second".to_string()));

    assert!(jar.get("jwt_token", now + Duration::days(2))?.is_none());

    jar.put(Cookie::removal("jwt_token", "/", SameSite::Strict), now)?;
    assert!(jar.get("jwt_token", now)?.is_none());
    Ok(())
  }

  #[test]
  fn file_jar_persists_across_instances() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("session-gate-jar-{}.json", std::process::id()));
    let _ = fs::remove_file(&path);
    let now = Utc::now();

    let jar = FileCookieJar::new(&path);
    assert!(jar.get("jwt_token", now)?.is_none());
    jar.put(cookie("persisted", now + Duration::days(30)), now)?;

    let reopened = FileCookieJar::new(&path);
    let got = reopened.get("jwt_token", now)?;
    assert_eq!(got.map(|c| c.value), Some("persisted".to_string()));

    reopened.put(Cookie::removal("jwt_token", "/", SameSite::Strict), now)?;
    assert!(jar.get("jwt_token", now)?.is_none());
    // idempotent
    reopened.put(Cookie::removal("jwt_token", "/", SameSite::Strict), now)?;
    assert!(jar.get("jwt_token", now)?.is_none());

    fs::remove_file(&path)?;
    Ok(())
  }

  #[test]
  fn file_jar_judges_expiry_by_given_time() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("session-gate-past-{}.json", std::process::id()));
    let _ = fs::remove_file(&path);
    // well before the wall clock
    let then = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

    let jar = FileCookieJar::new(&path);
    jar.put(cookie("written", then + Duration::days(30)), then)?;
    assert_eq!(jar.get("jwt_token", then)?.map(|c| c.value), Some("written".to_string()));
    assert!(jar.get("jwt_token", then + Duration::days(30))?.is_none());

    fs::remove_file(&path)?;
    Ok(())
  }

  #[test]
  fn file_jar_reports_garbage() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("session-gate-garbage-{}.json", std::process::id()));
    fs::write(&path, "not a cookie jar")?;
    let jar = FileCookieJar::new(&path);
    assert!(matches!(jar.get("jwt_token", Utc::now()), Err(GateError::CookieJarFormat(_))));
    fs::remove_file(&path)?;
    Ok(())
  }
}
